use serde::{Deserialize, Serialize};

const fn default_sorted() -> bool {
    true
}

/// Per-call normalization options.
///
/// The same struct is the CLI config file format and the `[options]` table of
/// a snapshot case. Keys are accepted in both `snake_case` and the camelCase
/// spelling used by nf-test named parameters:
///
/// ```toml
/// additionalPatterns = ["secret-\\d+"]
/// sorted = false
/// keep_ansi = true
/// ignore = ["DEBUG"]
/// include = ["INFO", "WARN"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterOptions {
    /// Extra regexes; every match is replaced with `[FILTERED]` after the
    /// built-in rules ran.
    #[serde(default, alias = "additionalPatterns")]
    pub additional_patterns: Vec<String>,

    /// Move sortable lines to the end in lexicographic order and collapse
    /// adjacent duplicates.
    #[serde(default = "default_sorted")]
    pub sorted: bool,

    /// Keep ANSI CSI sequences instead of stripping them.
    #[serde(default, alias = "keepAnsi")]
    pub keep_ansi: bool,

    /// Lines containing any of these substrings are dropped first.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// When non-empty, only lines containing one of these substrings survive.
    #[serde(default)]
    pub include: Vec<String>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            additional_patterns: Vec::new(),
            sorted: true,
            keep_ansi: false,
            ignore: Vec::new(),
            include: Vec::new(),
        }
    }
}

impl FilterOptions {
    /// Overlay `other` on top of `self`: list fields are appended, booleans
    /// are taken from `other` when they differ from the defaults.
    #[must_use]
    pub fn merged_with(mut self, other: &Self) -> Self {
        self.additional_patterns
            .extend(other.additional_patterns.iter().cloned());
        self.ignore.extend(other.ignore.iter().cloned());
        self.include.extend(other.include.iter().cloned());
        if !other.sorted {
            self.sorted = false;
        }
        if other.keep_ansi {
            self.keep_ansi = true;
        }
        self
    }
}
