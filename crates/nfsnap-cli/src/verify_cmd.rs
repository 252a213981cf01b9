use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;

use nfsnap::output;
use nfsnap_filter::verify::{self, CaseResult, VerifyResult};

// --- Discovery ---

fn collect_cases(dir: &Path, result: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    let mut entries: Vec<_> = entries.filter_map(Result::ok).collect();
    entries.sort_by_key(std::fs::DirEntry::file_name);
    for entry in &entries {
        let path = entry.path();
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        if path.is_file() && path.extension().is_some_and(|e| e == "toml") {
            result.push(path);
        } else if path.is_dir() {
            collect_cases(&path, result);
        }
    }
}

/// Every `*.toml` file under `dir`, depth-first in file-name order.
/// Hidden entries are skipped.
pub fn discover_cases(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("snapshot directory not found: {}", dir.display());
    }
    let mut cases = Vec::new();
    collect_cases(dir, &mut cases);
    Ok(cases)
}

// --- Running ---

fn case_stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn run_case_file(path: &Path, name_filter: Option<&Regex>) -> Option<CaseResult> {
    match verify::load_case(path) {
        Ok(case) => {
            if name_filter.is_some_and(|re| !re.is_match(&case.name)) {
                return None;
            }
            Some(verify::run_case_in_memory(&case))
        }
        Err(e) => {
            let stem = case_stem(path);
            if name_filter.is_some_and(|re| !re.is_match(&stem)) {
                return None;
            }
            Some(CaseResult::failed(stem, format!("failed to load case: {e:#}")))
        }
    }
}

fn run_all(paths: &[PathBuf], name_filter: Option<&Regex>) -> VerifyResult {
    VerifyResult {
        cases: paths
            .iter()
            .filter_map(|p| run_case_file(p, name_filter))
            .collect(),
    }
}

// --- Output formatting ---

#[derive(Serialize)]
struct Report<'a> {
    dir: String,
    total: usize,
    passed: usize,
    cases: &'a [CaseResult],
}

fn print_results(result: &VerifyResult) {
    for case in &result.cases {
        if case.passed {
            println!("\u{2713} {}", case.name);
        } else {
            println!("\u{2717} {}", case.name);
            for failure in &case.failures {
                for line in failure.lines() {
                    println!("    {line}");
                }
            }
        }
        for warning in &case.warnings {
            println!("    ! {warning}");
        }
    }
    println!(
        "\n{}/{} cases passed",
        result.passed_count(),
        result.cases.len()
    );
}

/// `nfsnap verify`: run every case under `dir`. Exits 1 when any case fails
/// or none were found.
pub fn cmd_verify(dir: &Path, case_filter: Option<&str>, json: bool) -> anyhow::Result<i32> {
    let name_filter = case_filter
        .map(Regex::new)
        .transpose()
        .map_err(|e| anyhow::anyhow!("invalid --case regex: {e}"))?;
    let paths = discover_cases(dir)?;
    let result = run_all(&paths, name_filter.as_ref());

    if result.cases.is_empty() {
        eprintln!("[nfsnap] no snapshot cases found in {}", dir.display());
        return Ok(1);
    }

    if json {
        output::print_json(&Report {
            dir: dir.display().to_string(),
            total: result.cases.len(),
            passed: result.passed_count(),
            cases: &result.cases,
        });
    } else {
        print_results(&result);
    }

    Ok(i32::from(!result.all_passed()))
}
