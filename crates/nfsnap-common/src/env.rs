//! Read-only snapshot of the process context used for path and user scrubbing.
//!
//! The engine never reads the process environment itself. Callers either take
//! a snapshot with [`EnvSnapshot::capture`] once per call, or build one by
//! hand for hermetic tests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Variable holding the current user name.
pub const USER_VAR: &str = "USER";

/// Home directory variable; also the base for the default `NXF_HOME`.
pub const HOME_VAR: &str = "HOME";

/// Nextflow home; defaults to `$HOME/.nextflow` when unset.
pub const NXF_HOME_VAR: &str = "NXF_HOME";

/// Path-like variables whose values are scrubbed to `[PATH]`.
pub const PATH_VARS: &[&str] = &[
    HOME_VAR,
    "NFT_WORKDIR",
    "NXF_CACHE_DIR",
    "NXF_CONDA_CACHEDIR",
    NXF_HOME_VAR,
    "NXF_SINGULARITY_CACHEDIR",
    "NXF_SINGULARITY_LIBRARYDIR",
    "NXF_TEMP",
    "NXF_WORK",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvSnapshot {
    /// Current working directory.
    #[serde(default)]
    pub cwd: Option<String>,

    /// Current user name.
    #[serde(default)]
    pub user: Option<String>,

    /// Values of the variables in [`PATH_VARS`]. Other keys are kept but
    /// ignored by the path scrub.
    #[serde(default)]
    pub vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// A snapshot with nothing to scrub.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot the current process: working directory, `USER` and every
    /// variable in [`PATH_VARS`]. Unset, empty or non-UTF-8 values are left out.
    pub fn capture() -> Self {
        let cwd = std::env::current_dir()
            .ok()
            .and_then(|p| p.to_str().map(str::to_string))
            .filter(|s| !s.is_empty());
        let user = non_empty_var(USER_VAR);
        let vars = PATH_VARS
            .iter()
            .filter_map(|name| non_empty_var(name).map(|v| ((*name).to_string(), v)))
            .collect();
        Self { cwd, user, vars }
    }

    #[must_use]
    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Value of `name`, treating empty strings as unset.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// The user name, treating an empty string as unset.
    pub fn user_name(&self) -> Option<&str> {
        self.user.as_deref().filter(|u| !u.is_empty())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
