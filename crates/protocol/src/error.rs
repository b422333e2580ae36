//! Error types for protocol operations.

/// Errors that can occur when constructing protocol values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// A priority outside the `0..=4` range was supplied.
    #[error("priority {value} is out of range (expected 0..=4)")]
    PriorityOutOfRange {
        /// The rejected value.
        value: u8,
    },
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
