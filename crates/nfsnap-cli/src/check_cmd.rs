use std::path::Path;

use nfsnap_common::options::FilterOptions;
use nfsnap_common::snapshot_case;
use nfsnap_filter::compile_pattern;

/// What a checked file turned out to be.
#[derive(Debug, PartialEq, Eq)]
enum Checked {
    Case(String),
    Options,
}

/// A TOML file with a top-level `name` key is a snapshot case; anything else
/// is an options file.
fn check_bytes(path: &Path, bytes: &[u8]) -> Result<Checked, String> {
    if path.extension().is_some_and(|e| e == "json") {
        let opts: FilterOptions =
            serde_json::from_slice(bytes).map_err(|e| format!("invalid options JSON: {e}"))?;
        check_patterns(&opts.additional_patterns)?;
        return Ok(Checked::Options);
    }

    let text = std::str::from_utf8(bytes).map_err(|_| "file is not valid UTF-8".to_string())?;
    let table: toml::Table = toml::from_str(text).map_err(|e| format!("invalid TOML: {e}"))?;
    if table.contains_key("name") {
        let case = snapshot_case::validate(bytes)?;
        check_patterns(&case.options.additional_patterns)
            .map_err(|e| format!("options.{e}"))?;
        return Ok(Checked::Case(case.name));
    }

    let opts: FilterOptions =
        toml::from_str(text).map_err(|e| format!("invalid options file: {e}"))?;
    check_patterns(&opts.additional_patterns)?;
    Ok(Checked::Options)
}

/// Patterns go through the same compile step the pipeline uses, so a file
/// that passes here never has a pattern skipped at normalization time.
fn check_patterns(patterns: &[String]) -> Result<(), String> {
    for (i, pat) in patterns.iter().enumerate() {
        compile_pattern(pat).map_err(|e| format!("additional_patterns[{i}]: invalid regex: {e}"))?;
    }
    Ok(())
}

/// `nfsnap check`: validate an options or snapshot case file.
pub fn cmd_check(path: &Path) -> i32 {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            eprintln!("[nfsnap] file not found: {}", path.display());
            return 1;
        }
        Err(e) => {
            eprintln!("[nfsnap] error: cannot read {}: {e}", path.display());
            return 1;
        }
    };
    match check_bytes(path, &bytes) {
        Ok(Checked::Case(name)) => {
            eprintln!(
                "[nfsnap] {} is valid (snapshot case \"{name}\")",
                path.display()
            );
            0
        }
        Ok(Checked::Options) => {
            eprintln!("[nfsnap] {} is valid (options)", path.display());
            0
        }
        Err(e) => {
            eprintln!("[nfsnap] error: {}: {e}", path.display());
            1
        }
    }
}
