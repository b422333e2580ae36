//! Configuration management for ferry.
//!
//! This crate loads the Jira connection settings and import options from
//! files and environment variables.
//!
//! # Overview
//!
//! - [`config`]: The [`Config`] struct, loading, validation and env overrides
//! - [`auth`]: Token resolution
//! - [`persistence`]: Config file discovery, reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! 1. Environment variables (`FERRY_*`)
//! 2. Local config (`./ferry.json5` or `./ferry.json`)
//! 3. User config (`~/.config/ferry/config.json5` or `~/.config/ferry/config.json`)
//! 4. Built-in defaults
//!
//! ```json5
//! {
//!   jira_url: "https://company.atlassian.net",
//!   project: "PROJ",
//!   username: "me@company.com",
//!   // Either a project or a JQL query is required.
//!   jql: "labels = backend ORDER BY created",
//!   state: "open",
//!   prefix: "proj",
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use ferry_config::{Config, auth::resolve_token};
//!
//! # fn example() -> ferry_config::Result<()> {
//! let mut config = Config::load()?;
//! config.apply_env();
//! config.validate()?;
//!
//! let token = resolve_token(config.api_token.as_deref());
//! println!("Importing from {:?}", config.jira_url);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod persistence;

pub use config::Config;
pub use error::{ConfigError, Result};
