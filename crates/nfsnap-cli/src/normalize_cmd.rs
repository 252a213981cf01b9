use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use nfsnap::output;
use nfsnap::runner;
use nfsnap_common::env::EnvSnapshot;
use nfsnap_common::options::FilterOptions;
use nfsnap_filter::{Normalized, RawOutput, normalize};

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn print_normalized(normalized: &Normalized, json: bool) {
    crate::report_diagnostics(&normalized.diagnostics);
    if json {
        output::print_json(&normalized.lines);
    } else {
        for line in &normalized.lines {
            println!("{line}");
        }
    }
}

/// `nfsnap normalize`: canonicalize a file or stdin.
pub fn cmd_normalize(
    file: Option<&Path>,
    opts: &FilterOptions,
    json: bool,
    json_input: bool,
) -> anyhow::Result<i32> {
    let text = read_input(file)?;
    let raw = if json_input {
        let value: Value = serde_json::from_str(&text).context("input is not valid JSON")?;
        RawOutput::from_json(&value)
    } else {
        RawOutput::Text(text)
    };
    let normalized = normalize(raw, opts, &EnvSnapshot::capture());
    print_normalized(&normalized, json);
    Ok(0)
}

/// `nfsnap run`: execute a command and canonicalize its combined output.
/// Exits with the command's own exit code.
pub fn cmd_run(
    command_args: &[String],
    opts: &FilterOptions,
    json: bool,
    verbose: bool,
) -> anyhow::Result<i32> {
    let (program, args) = command_args
        .split_first()
        .ok_or_else(|| anyhow::anyhow!("no command given"))?;
    let env = EnvSnapshot::capture();
    let result = runner::execute(program, args)?;
    if verbose {
        eprintln!(
            "[nfsnap] {program} exited with {} ({} lines captured)",
            result.exit_code,
            result.combined.len()
        );
    }
    let normalized = normalize(RawOutput::Lines(result.combined), opts, &env);
    print_normalized(&normalized, json);
    Ok(result.exit_code)
}
