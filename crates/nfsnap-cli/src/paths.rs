//! nfsnap user-directory resolution.
//!
//! Priority for the user-level base directory:
//!   1. `NFSNAP_HOME` env var (if set and non-empty)
//!   2. `dirs::config_dir().map(|d| d.join("nfsnap"))` (platform default)

use std::path::PathBuf;

/// Environment variable overriding the user-level directory.
pub const HOME_ENV: &str = "NFSNAP_HOME";

/// Returns the `NFSNAP_HOME` override when set and non-empty.
pub fn home_override() -> Option<String> {
    std::env::var(HOME_ENV).ok().filter(|h| !h.is_empty())
}

/// Returns the nfsnap user-level base directory.
pub fn user_dir() -> Option<PathBuf> {
    home_override()
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|d| d.join("nfsnap")))
}

/// Returns the user-level options file (`<user dir>/config.toml`).
pub fn user_config_file() -> Option<PathBuf> {
    user_dir().map(|d| d.join("config.toml"))
}
