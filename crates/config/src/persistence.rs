//! Configuration file discovery, reading and writing.
//!
//! Files may be JSON5 (comments, unquoted keys, trailing commas) or plain
//! JSON; both are read with the JSON5 parser. Writing always produces
//! pretty-printed JSON, which the JSON5 parser reads back unchanged.
//!
//! # File Locations
//!
//! Configuration is searched in the following order:
//!
//! 1. Local: `./ferry.json5` or `./ferry.json`
//! 2. User: `~/.config/ferry/config.json5` or `~/.config/ferry/config.json`

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, Result};

/// Local configuration file names, in priority order.
const CONFIG_FILE_NAMES: &[&str] = &["ferry.json5", "ferry.json"];

/// User config directory name.
const USER_CONFIG_DIR: &str = "ferry";

/// User configuration file names, in priority order.
const USER_CONFIG_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Finds the configuration file for the current directory and user.
///
/// # Examples
///
/// ```no_run
/// use ferry_config::persistence::find_config_file;
///
/// if let Some(path) = find_config_file() {
///     println!("Found config at: {}", path.display());
/// }
/// ```
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let user_dir = user_config_dir().ok();
    find_config_file_in(Path::new("."), user_dir.as_deref())
}

/// Finds a configuration file, checking `local_dir` before `user_dir`.
///
/// Returns the first existing candidate, or `None`.
#[must_use]
pub fn find_config_file_in(local_dir: &Path, user_dir: Option<&Path>) -> Option<PathBuf> {
    let local = CONFIG_FILE_NAMES.iter().map(|name| local_dir.join(name));
    let user = user_dir
        .into_iter()
        .flat_map(|dir| USER_CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)));

    let found = local.chain(user).find(|path| path.exists());
    debug!(path = ?found, "config file lookup");
    found
}

/// Returns the user configuration directory, typically `~/.config/ferry/`.
///
/// # Errors
///
/// Returns [`ConfigError::NoHomeDirectory`] if the platform config directory
/// cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(USER_CONFIG_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Reads and parses a configuration file.
///
/// # Errors
///
/// Returns [`ConfigError::ReadFile`] if the file cannot be read and
/// [`ConfigError::ParseJson5`] if its content does not parse.
///
/// # Examples
///
/// ```no_run
/// use ferry_config::Config;
/// use ferry_config::persistence::read_config_file;
///
/// # fn main() -> ferry_config::Result<()> {
/// let config: Config = read_config_file("ferry.json5")?;
/// # Ok(())
/// # }
/// ```
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json5::from_str(&content).map_err(ConfigError::from)
}

/// Writes a configuration to a file as pretty-printed JSON.
///
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns [`ConfigError::WriteFile`] if a directory or the file cannot be
/// written and [`ConfigError::SerializeJson`] if serialization fails.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();
    let write_error = |source| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(write_error)
}
