use std::path::{Path, PathBuf};

use anyhow::Context;

use nfsnap_common::options::FilterOptions;

use crate::paths;

/// Project-local options file, looked up in the working directory.
pub const LOCAL_CONFIG: &str = ".nfsnap.toml";

/// Options files in priority order: `./.nfsnap.toml`, then
/// `<user dir>/config.toml`.
pub fn default_search_paths() -> Vec<PathBuf> {
    let mut files = Vec::new();

    // Resolved to absolute so it survives any later CWD change
    if let Ok(cwd) = std::env::current_dir() {
        files.push(cwd.join(LOCAL_CONFIG));
    }

    if let Some(user) = paths::user_config_file() {
        files.push(user);
    }

    files
}

/// Try to load options from `path`. Returns `Ok(None)` if the file does not
/// exist. Files ending in `.json` are parsed as JSON, anything else as TOML.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn try_load_options(path: &Path) -> anyhow::Result<Option<FilterOptions>> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("failed to read options file: {}", path.display())));
        }
    };
    let options = if path.extension().is_some_and(|e| e == "json") {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse options file: {}", path.display()))?
    } else {
        toml::from_str(&content)
            .with_context(|| format!("failed to parse options file: {}", path.display()))?
    };
    Ok(Some(options))
}

/// Options resolved for one invocation, with the file they came from.
#[derive(Debug, Clone, Default)]
pub struct ResolvedOptions {
    pub options: FilterOptions,
    pub source: Option<PathBuf>,
}

/// Resolve options: an explicit `--config` file must exist; otherwise the
/// first existing file from `search` wins, and defaults apply when none do.
///
/// # Errors
///
/// Returns an error if the explicit file is missing, or if any candidate
/// file exists but is malformed.
pub fn resolve_options(
    explicit: Option<&Path>,
    search: &[PathBuf],
) -> anyhow::Result<ResolvedOptions> {
    if let Some(path) = explicit {
        let options = try_load_options(path)?
            .ok_or_else(|| anyhow::anyhow!("config file not found: {}", path.display()))?;
        return Ok(ResolvedOptions {
            options,
            source: Some(path.to_path_buf()),
        });
    }

    for path in search {
        if let Some(options) = try_load_options(path)? {
            return Ok(ResolvedOptions {
                options,
                source: Some(path.clone()),
            });
        }
    }

    Ok(ResolvedOptions::default())
}
