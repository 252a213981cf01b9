use regex::{Captures, Regex};

use super::markers;
use super::rules::builtin_regex;
use super::vocab;

/// Finds the run name Nextflow prints on its `Launching` line, e.g.
/// ``Launching `main.nf` [nasty_magritte] DSL2 - revision: 1a2b3c4d5e``.
#[derive(Debug, Clone)]
pub struct RunNameCapture {
    launch: Regex,
}

impl RunNameCapture {
    pub fn new() -> Self {
        Self {
            launch: builtin_regex(r"Launching\b[^\[]*\[([A-Za-z0-9](?:[A-Za-z0-9_.-]*[A-Za-z0-9])?)\]"),
        }
    }

    /// The first acceptable run name found on a `Launching` line.
    ///
    /// Marker-shaped values such as `RUN_NAME` (no lowercase letter) are
    /// rejected so already-canonical output captures nothing.
    pub fn capture<'a>(&self, lines: impl IntoIterator<Item = &'a str>) -> Option<CapturedRunName> {
        lines
            .into_iter()
            .filter(|line| line.contains("Launching"))
            .find_map(|line| {
                let name = self.launch.captures(line)?.get(1)?.as_str();
                CapturedRunName::new(name)
            })
    }
}

impl Default for RunNameCapture {
    fn default() -> Self {
        Self::new()
    }
}

/// A run name captured for the current call, with its whole-word matcher.
#[derive(Debug, Clone)]
pub struct CapturedRunName {
    name: String,
    bracketed: String,
    bare: Regex,
}

impl CapturedRunName {
    /// Returns `None` for names that cannot be scrubbed safely.
    pub fn new(name: &str) -> Option<Self> {
        if !name.bytes().any(|b| b.is_ascii_lowercase()) {
            return None;
        }
        let bare = Regex::new(&format!(r"\b{}\b", regex::escape(name))).ok()?;
        Some(Self {
            name: name.to_string(),
            bracketed: format!("[{name}]"),
            bare,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn scrub(&self, line: &str) -> String {
        let line = line.replace(&self.bracketed, markers::RUN_NAME);
        if self.bare.is_match(&line) {
            self.bare.replace_all(&line, markers::RUN_NAME).into_owned()
        } else {
            line
        }
    }
}

/// Replaces the captured run name and any vocabulary-shaped
/// `adjective_scientist` token, bracketed or bare.
#[derive(Debug, Clone)]
pub struct RunNameScrub {
    bracketed: Regex,
    bare: Regex,
}

impl RunNameScrub {
    pub fn new() -> Self {
        Self {
            bracketed: builtin_regex(r"\[([a-z]+)_([a-z]+)\]"),
            bare: builtin_regex(r"\b([a-z]+)_([a-z]+)\b"),
        }
    }

    pub fn apply(&self, line: &str, captured: Option<&CapturedRunName>) -> String {
        let line = captured.map_or_else(|| line.to_string(), |c| c.scrub(line));
        let line = replace_vocabulary(&self.bracketed, &line);
        replace_vocabulary(&self.bare, &line)
    }
}

impl Default for RunNameScrub {
    fn default() -> Self {
        Self::new()
    }
}

fn replace_vocabulary(re: &Regex, line: &str) -> String {
    if !re.is_match(line) {
        return line.to_string();
    }
    re.replace_all(line, |caps: &Captures| {
        if vocab::is_run_name(&caps[1], &caps[2]) {
            markers::RUN_NAME.to_string()
        } else {
            caps[0].to_string()
        }
    })
    .into_owned()
}
