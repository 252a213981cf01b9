use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use nfsnap_common::snapshot_case::{Expectation, SnapshotCase};

use crate::normalize;

/// Result of a single snapshot case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    pub name: String,
    pub passed: bool,
    pub failures: Vec<String>,
    /// Non-fatal diagnostics from normalization (e.g. skipped patterns).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl CaseResult {
    pub fn failed(name: impl Into<String>, failure: String) -> Self {
        Self {
            name: name.into(),
            passed: false,
            failures: vec![failure],
            warnings: Vec::new(),
        }
    }
}

/// Result of verifying a set of snapshot cases.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VerifyResult {
    pub cases: Vec<CaseResult>,
}

impl VerifyResult {
    /// Returns true if all cases passed.
    pub fn all_passed(&self) -> bool {
        self.cases.iter().all(|c| c.passed)
    }

    pub fn passed_count(&self) -> usize {
        self.cases.iter().filter(|c| c.passed).count()
    }
}

/// Run a single case against its inline input (all in memory).
///
/// A case loaded with [`load_case`] has its fixture already resolved into
/// `inline`; a case with neither normalizes empty input.
pub fn run_case_in_memory(case: &SnapshotCase) -> CaseResult {
    let input = case.inline.as_deref().unwrap_or("");
    let normalized = normalize::normalize_text(input, &case.options, &case.env);

    let mut failures = Vec::new();
    if let Some(expected) = &case.lines
        && let Some(msg) = compare_lines(expected, &normalized.lines)
    {
        failures.push(msg);
    }
    let output = normalized.lines.join("\n");
    for expect in &case.expects {
        if let Some(msg) = evaluate(expect, &output) {
            failures.push(msg);
        }
    }

    CaseResult {
        name: case.name.clone(),
        passed: failures.is_empty(),
        failures,
        warnings: normalized
            .diagnostics
            .iter()
            .map(ToString::to_string)
            .collect(),
    }
}

/// Verify a set of cases, each under its own environment snapshot.
pub fn verify_cases(cases: &[SnapshotCase]) -> VerifyResult {
    VerifyResult {
        cases: cases.iter().map(run_case_in_memory).collect(),
    }
}

/// Read and parse a case file, resolving `fixture` into `inline`.
///
/// Fixtures are looked up relative to the case file first, then relative to
/// the working directory.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, if the case has
/// neither `lines` nor `[[expect]]`, or if the fixture cannot be found.
pub fn load_case(case_path: &Path) -> anyhow::Result<SnapshotCase> {
    let content = std::fs::read_to_string(case_path)
        .with_context(|| format!("cannot read {}", case_path.display()))?;
    let mut case: SnapshotCase = toml::from_str(&content)
        .with_context(|| format!("cannot parse {}", case_path.display()))?;
    if case.lines.is_none() && case.expects.is_empty() {
        anyhow::bail!(
            "{}: case has neither `lines` nor [[expect]] blocks",
            case_path.display()
        );
    }
    if case.inline.is_none()
        && let Some(fixture) = &case.fixture
    {
        let text = load_fixture(fixture, case_path)?;
        case.inline = Some(text);
    }
    Ok(case)
}

fn load_fixture(fixture: &str, case_path: &Path) -> anyhow::Result<String> {
    let case_dir = case_path.parent().unwrap_or_else(|| Path::new("."));
    let relative_to_case = case_dir.join(fixture);
    if relative_to_case.exists() {
        return std::fs::read_to_string(&relative_to_case)
            .with_context(|| format!("cannot read fixture {}", relative_to_case.display()));
    }

    let path = Path::new(fixture);
    if path.exists() {
        return std::fs::read_to_string(path)
            .with_context(|| format!("cannot read fixture {fixture}"));
    }

    anyhow::bail!("fixture not found: {fixture}")
}

/// Compare canonical lines against the expected lines.
///
/// Returns `None` when they are equal, or a message naming the first
/// differing line.
pub fn compare_lines(expected: &[String], actual: &[String]) -> Option<String> {
    if expected == actual {
        return None;
    }
    let got = actual.join("\n");
    let first_diff = expected
        .iter()
        .zip(actual)
        .position(|(e, a)| e != a)
        .unwrap_or_else(|| expected.len().min(actual.len()));
    let detail = match (expected.get(first_diff), actual.get(first_diff)) {
        (Some(e), Some(a)) => format!("line {}: expected {e:?}, got {a:?}", first_diff + 1),
        (Some(e), None) => format!("line {}: expected {e:?}, got nothing", first_diff + 1),
        (None, Some(a)) => format!("line {}: unexpected {a:?}", first_diff + 1),
        (None, None) => String::new(),
    };
    Some(format!(
        "expected {} lines, got {}; {detail}\ngot:\n{got}",
        expected.len(),
        actual.len()
    ))
}

/// Evaluate a single expectation against the joined canonical output.
///
/// Returns `None` if every assertion in the block holds, or the first
/// failure followed by the output, in the same shape as [`compare_lines`].
pub fn evaluate(expect: &Expectation, output: &str) -> Option<String> {
    let failure = text_failure(expect, output)
        .or_else(|| {
            let count = output.lines().count();
            expect
                .line_count
                .filter(|&n| n != count)
                .map(|n| format!("expected {n} lines, got {count}"))
        })
        .or_else(|| regex_failure(expect.matches.as_deref(), true, output))
        .or_else(|| regex_failure(expect.not_matches.as_deref(), false, output))?;
    Some(format!("{failure}\ngot:\n{output}"))
}

type TextCheck = fn(&str, &str) -> bool;

fn text_failure(expect: &Expectation, output: &str) -> Option<String> {
    let checks: [(&Option<String>, &str, TextCheck); 5] = [
        (&expect.contains, "contain", |out, s| out.contains(s)),
        (&expect.not_contains, "NOT contain", |out, s| !out.contains(s)),
        (&expect.equals, "equal", |out, s| out == s),
        (&expect.starts_with, "start with", |out, s| out.starts_with(s)),
        (&expect.ends_with, "end with", |out, s| out.ends_with(s)),
    ];
    checks.into_iter().find_map(|(wanted, verb, holds)| {
        let wanted = wanted.as_deref()?;
        (!holds(output, wanted)).then(|| format!("expected output to {verb} {wanted:?}"))
    })
}

fn regex_failure(pattern: Option<&str>, should_match: bool, output: &str) -> Option<String> {
    let pattern = pattern?;
    let re = match regex::Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => return Some(format!("invalid regex {pattern:?}: {e}")),
    };
    if re.is_match(output) == should_match {
        return None;
    }
    let verb = if should_match { "match" } else { "NOT match" };
    Some(format!("expected output to {verb} regex {pattern:?}"))
}
