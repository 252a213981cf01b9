use regex::Regex;

use super::Diagnostic;
use super::markers;

/// Compile one `additional_patterns` entry the way the pipeline does.
///
/// Validators call this too, so a pattern they accept is never skipped at
/// normalization time.
///
/// # Errors
///
/// Returns a message for an empty pattern, a syntax error, or a pattern
/// whose compiled form exceeds the `regex` crate's default size limit.
pub fn compile_pattern(pattern: &str) -> Result<Regex, String> {
    if pattern.is_empty() {
        return Err("pattern is empty".to_string());
    }
    Regex::new(pattern).map_err(|e| e.to_string())
}

/// Compile `additional_patterns`, skipping the ones that cannot be used.
///
/// Returns the usable regexes in their original order plus one diagnostic per
/// skipped pattern.
pub fn compile(patterns: &[String]) -> (Vec<Regex>, Vec<Diagnostic>) {
    let mut compiled = Vec::with_capacity(patterns.len());
    let mut diagnostics = Vec::new();
    for pattern in patterns {
        match compile_pattern(pattern) {
            Ok(re) => compiled.push(re),
            Err(e) => diagnostics.push(Diagnostic::skipped_pattern(pattern, &e)),
        }
    }
    (compiled, diagnostics)
}

/// Replace every non-empty match of every pattern with `[FILTERED]`.
///
/// Empty matches (e.g. from `x*` or `\b`) are left alone; replacing them
/// would splice markers between characters.
pub fn apply(patterns: &[Regex], line: String) -> String {
    patterns.iter().fold(line, |acc, re| replace_non_empty(re, &acc).unwrap_or(acc))
}

fn replace_non_empty(re: &Regex, line: &str) -> Option<String> {
    let mut out = String::new();
    let mut last = 0;
    let mut changed = false;
    for m in re.find_iter(line) {
        if m.is_empty() {
            continue;
        }
        out.push_str(&line[last..m.start()]);
        out.push_str(markers::FILTERED);
        last = m.end();
        changed = true;
    }
    if !changed {
        return None;
    }
    out.push_str(&line[last..]);
    Some(out)
}
