use serde::{Deserialize, Serialize};

use crate::env::EnvSnapshot;
use crate::options::FilterOptions;

/// A declarative snapshot case: raw output in, canonical lines expected out.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SnapshotCase {
    pub name: String,
    /// Fixture file, relative to the case file.
    #[serde(default)]
    pub fixture: Option<String>,
    #[serde(default)]
    pub inline: Option<String>,
    #[serde(default)]
    pub options: FilterOptions,
    /// Environment the case is normalized under. Defaults to an empty
    /// snapshot so cases never depend on the machine running them.
    #[serde(default)]
    pub env: EnvSnapshot,
    /// Exact canonical lines.
    #[serde(default)]
    pub lines: Option<Vec<String>>,
    #[serde(rename = "expect", default)]
    pub expects: Vec<Expectation>,
}

/// Assertion on the canonical output joined with `\n`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Expectation {
    #[serde(default)]
    pub contains: Option<String>,
    #[serde(default)]
    pub not_contains: Option<String>,
    #[serde(default)]
    pub equals: Option<String>,
    #[serde(default)]
    pub starts_with: Option<String>,
    #[serde(default)]
    pub ends_with: Option<String>,
    #[serde(default)]
    pub line_count: Option<usize>,
    #[serde(default)]
    pub matches: Option<String>,
    #[serde(default)]
    pub not_matches: Option<String>,
}

/// Validate case bytes: checks UTF-8, TOML parsing, non-empty name, at least
/// one of `lines` or `[[expect]]`, and regex compilation for `matches`,
/// `not_matches` and `options.additional_patterns`.
///
/// # Errors
///
/// Returns a human-readable error string if validation fails.
#[cfg(feature = "validation")]
pub fn validate(bytes: &[u8]) -> Result<SnapshotCase, String> {
    let text = std::str::from_utf8(bytes).map_err(|_| "case file is not valid UTF-8")?;
    let case: SnapshotCase =
        toml::from_str(text).map_err(|e| format!("invalid snapshot case TOML: {e}"))?;
    if case.name.trim().is_empty() {
        return Err("snapshot case 'name' must be non-empty".to_string());
    }
    if case.lines.is_none() && case.expects.is_empty() {
        return Err("snapshot case needs `lines` or at least one [[expect]] block".to_string());
    }
    for (i, exp) in case.expects.iter().enumerate() {
        if let Some(pat) = &exp.matches {
            regex::Regex::new(pat)
                .map_err(|e| format!("expect[{i}].matches: invalid regex: {e}"))?;
        }
        if let Some(pat) = &exp.not_matches {
            regex::Regex::new(pat)
                .map_err(|e| format!("expect[{i}].not_matches: invalid regex: {e}"))?;
        }
    }
    for (i, pat) in case.options.additional_patterns.iter().enumerate() {
        regex::Regex::new(pat)
            .map_err(|e| format!("options.additional_patterns[{i}]: invalid regex: {e}"))?;
    }
    Ok(case)
}
