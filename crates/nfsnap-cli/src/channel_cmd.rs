use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use nfsnap::output;
use nfsnap_filter::channel::{path_exists_on_disk, sanitize_channel};

/// `nfsnap channel`: print the sanitized channel map as JSON.
pub fn cmd_channel(file: &Path, unstable_keys: &[String]) -> anyhow::Result<i32> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", file.display()))?;
    let Value::Object(channel) = value else {
        anyhow::bail!("{}: expected a JSON object of channels", file.display());
    };
    let sanitized = sanitize_channel(&channel, unstable_keys, path_exists_on_disk);
    output::print_json(&sanitized);
    Ok(0)
}
