use nfsnap_common::env::{EnvSnapshot, HOME_VAR, NXF_HOME_VAR, PATH_VARS};

use super::markers;

/// Literal paths to scrub for `env`, longest first.
///
/// Collects the working directory, every set variable from [`PATH_VARS`] and
/// `$HOME/.nextflow` when `NXF_HOME` is unset. Trailing slashes are dropped,
/// and bare `/` is never a target. Ties in length sort lexicographically so
/// the order is fully determined by the snapshot.
pub fn scrub_targets(env: &EnvSnapshot) -> Vec<String> {
    let mut targets: Vec<String> = Vec::new();
    if let Some(cwd) = env.cwd.as_deref() {
        targets.push(cwd.to_string());
    }
    for name in PATH_VARS {
        if let Some(value) = env.var(name) {
            targets.push(value.to_string());
        }
    }
    if env.var(NXF_HOME_VAR).is_none()
        && let Some(home) = env.var(HOME_VAR)
    {
        targets.push(format!("{}/.nextflow", home.trim_end_matches('/')));
    }

    let mut targets: Vec<String> = targets
        .into_iter()
        .map(|t| t.trim_end_matches('/').to_string())
        .filter(|t| !t.is_empty())
        .collect();
    targets.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    targets.dedup();
    targets
}

/// Replace every target in `line` with `[PATH]`, in the given order.
pub fn scrub_paths(line: &str, targets: &[String]) -> String {
    let mut out = line.to_string();
    for target in targets {
        if out.contains(target.as_str()) {
            out = out.replace(target.as_str(), markers::PATH);
        }
    }
    out
}
