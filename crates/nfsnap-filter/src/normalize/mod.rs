mod cleanup;
mod custom;
pub mod markers;
mod order;
pub mod paths;
pub mod rules;
pub mod run_name;
mod skip;
pub mod vocab;

use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;
use serde_json::Value;

use nfsnap_common::env::EnvSnapshot;
use nfsnap_common::options::FilterOptions;

pub use self::custom::compile_pattern;
pub use self::order::is_sortable;
pub use self::rules::{RuleChain, ScrubContext, ScrubRule};

use self::cleanup::AnsiStripper;
use self::run_name::RunNameCapture;

/// Raw execution output: one block of text or pre-split lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOutput {
    Text(String),
    Lines(Vec<String>),
}

impl RawOutput {
    /// Coerce any JSON value into raw output.
    ///
    /// `null` is empty, strings are text, arrays are lines (non-string
    /// elements use their JSON rendering), anything else is the JSON
    /// rendering as text.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Lines(Vec::new()),
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(items) => Self::Lines(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            other => Self::Text(other.to_string()),
        }
    }

    /// Materialize lines. Text splits on `\n`; empty text has no lines. Both
    /// shapes drop one trailing `\r` per line, so CRLF input from either side
    /// normalizes alike.
    pub fn into_lines(self) -> Vec<String> {
        match self {
            Self::Text(text) => text.lines().map(|l| trim_cr(l).to_string()).collect(),
            Self::Lines(lines) => lines
                .into_iter()
                .map(|mut l| {
                    if l.ends_with('\r') {
                        l.pop();
                    }
                    l
                })
                .collect(),
        }
    }
}

fn trim_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

impl From<&str> for RawOutput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RawOutput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<String>> for RawOutput {
    fn from(lines: Vec<String>) -> Self {
        Self::Lines(lines)
    }
}

impl From<Option<String>> for RawOutput {
    fn from(raw: Option<String>) -> Self {
        raw.map_or_else(|| Self::Lines(Vec::new()), Self::Text)
    }
}

/// A non-fatal problem met while normalizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// The offending `additional_patterns` entry.
    pub pattern: String,
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn skipped_pattern(pattern: &str, message: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            message: message.to_string(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "skipped additional pattern `{}`: {}",
            self.pattern, self.message
        )
    }
}

/// Canonical output plus any diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Normalized {
    pub lines: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl Normalized {
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// The canonicalization pipeline.
///
/// Processing order:
///
/// ```text
/// 1.  materialize lines
/// 2.  capture      : run name from the first `Launching ... [name]` line
///                    (all input lines, ANSI-free)
/// 3.  ignore       : drop lines containing an ignore substring
/// 4.  include      : keep only lines containing an include substring
/// 5.  strip ANSI   : unless keep_ansi
/// 6.  rule chain   : user, timestamp, hash, revision, update-notice,
///                    path, run-name, container, version
/// 7.  additional_patterns → [FILTERED]
/// 8.  drop blank lines
/// 9.  reorder + adjacent dedup (when sorted)
/// ```
///
/// A `Normalizer` holds only compiled, immutable rules and can be shared
/// between threads; everything derived from a call's input lives in that
/// call.
#[derive(Debug, Clone)]
pub struct Normalizer {
    chain: RuleChain,
    ansi: AnsiStripper,
    capture: RunNameCapture,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self::with_chain(RuleChain::builtin())
    }

    pub fn with_chain(chain: RuleChain) -> Self {
        Self {
            chain,
            ansi: AnsiStripper::new(),
            capture: RunNameCapture::new(),
        }
    }

    pub const fn chain(&self) -> &RuleChain {
        &self.chain
    }

    pub fn normalize(
        &self,
        raw: impl Into<RawOutput>,
        opts: &FilterOptions,
        env: &EnvSnapshot,
    ) -> Normalized {
        let lines = raw.into().into_lines();
        if lines.is_empty() {
            return Normalized::default();
        }

        // Capture scans every input line, ANSI-free, before ignore/include:
        // a filtered-out launch line still names the run.
        let plain: Vec<String> = lines.iter().map(|l| self.ansi.strip(l.clone())).collect();
        let run_name = self.capture.capture(plain.iter().map(String::as_str));

        let lines = skip::apply_ignore(&opts.ignore, lines);
        let lines = skip::apply_include(&opts.include, lines);

        let lines: Vec<String> = if opts.keep_ansi {
            lines
        } else {
            lines.into_iter().map(|l| self.ansi.strip(l)).collect()
        };

        let ctx = ScrubContext::new(env, run_name);
        let (custom, diagnostics) = custom::compile(&opts.additional_patterns);

        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            let line = self.chain.apply(line, &ctx);
            let line = custom::apply(&custom, line);
            if !line.trim().is_empty() {
                out.push(line);
            }
        }

        let lines = if opts.sorted { order::reorder(out) } else { out };
        Normalized { lines, diagnostics }
    }
}

static BUILTIN: LazyLock<Normalizer> = LazyLock::new(Normalizer::new);

/// Normalize with the built-in rule chain.
pub fn normalize(
    raw: impl Into<RawOutput>,
    opts: &FilterOptions,
    env: &EnvSnapshot,
) -> Normalized {
    BUILTIN.normalize(raw, opts, env)
}

/// Normalize a block of text, split on `\n`.
pub fn normalize_text(text: &str, opts: &FilterOptions, env: &EnvSnapshot) -> Normalized {
    normalize(RawOutput::Text(text.to_string()), opts, env)
}

/// Normalize pre-split lines.
pub fn normalize_lines<S: AsRef<str>>(
    lines: &[S],
    opts: &FilterOptions,
    env: &EnvSnapshot,
) -> Normalized {
    let lines = lines.iter().map(|l| l.as_ref().to_string()).collect();
    normalize(RawOutput::Lines(lines), opts, env)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests_pipeline;
#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests_rules;
