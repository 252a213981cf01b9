use std::path::{Path, PathBuf};

use serde::Serialize;

use nfsnap::config;
use nfsnap::output;
use nfsnap::paths;
use nfsnap_common::env::EnvSnapshot;
use nfsnap_filter::normalize::RuleChain;
use nfsnap_filter::normalize::paths::scrub_targets;

#[derive(Serialize)]
struct SearchPath {
    scope: &'static str,
    path: String,
    exists: bool,
}

#[derive(Serialize)]
struct ScrubSet {
    rules: Vec<&'static str>,
    /// Literal paths replaced with `[PATH]`, in application order.
    paths: Vec<String>,
    user: Option<String>,
}

#[derive(Serialize)]
struct InfoOutput {
    version: String,
    /// `NFSNAP_HOME` value when set; moves the user-level config file.
    home_override: Option<String>,
    search_paths: Vec<SearchPath>,
    /// The options file that would be used, if any.
    active_options: Option<String>,
    scrub: ScrubSet,
}

fn collect_search_paths(explicit: Option<&Path>, search: &[PathBuf]) -> Vec<SearchPath> {
    let mut out = Vec::new();
    if let Some(path) = explicit {
        out.push(SearchPath {
            scope: "explicit",
            path: path.display().to_string(),
            exists: path.exists(),
        });
    }
    out.extend(search.iter().enumerate().map(|(i, path)| SearchPath {
        scope: if i == 0 { "local" } else { "user" },
        path: path.display().to_string(),
        exists: path.exists(),
    }));
    out
}

fn collect_info(explicit: Option<&Path>) -> InfoOutput {
    let search = config::default_search_paths();
    let search_paths = collect_search_paths(explicit, &search);
    let active_options = match config::resolve_options(explicit, &search) {
        Ok(resolved) => resolved.source.map(|p| p.display().to_string()),
        Err(e) => {
            eprintln!("[nfsnap] error resolving options: {e:#}");
            None
        }
    };

    let env = EnvSnapshot::capture();
    InfoOutput {
        version: env!("CARGO_PKG_VERSION").to_string(),
        home_override: paths::home_override(),
        search_paths,
        active_options,
        scrub: ScrubSet {
            rules: RuleChain::builtin().names(),
            paths: scrub_targets(&env),
            user: env.user_name().map(str::to_string),
        },
    }
}

fn print_human(info: &InfoOutput) {
    println!("nfsnap {}", info.version);

    println!("\nhome override:");
    println!(
        "  NFSNAP_HOME: {}",
        info.home_override.as_deref().unwrap_or("(not set)")
    );

    println!("\noptions search paths:");
    for p in &info.search_paths {
        let status = if p.exists { "exists" } else { "not found" };
        println!("  [{}] {} ({status})", p.scope, p.path);
    }
    println!(
        "  active: {}",
        info.active_options.as_deref().unwrap_or("(defaults)")
    );

    println!("\nscrub rules:");
    println!("  {}", info.scrub.rules.join(", "));

    println!("\nscrubbed paths (longest first):");
    if info.scrub.paths.is_empty() {
        println!("  (none)");
    }
    for p in &info.scrub.paths {
        println!("  {p}");
    }
    println!(
        "\nscrubbed user: {}",
        info.scrub.user.as_deref().unwrap_or("(not set)")
    );
}

/// `nfsnap info`: show version, options search paths and the scrub set.
pub fn cmd_info(explicit: Option<&Path>, json: bool) -> i32 {
    let info = collect_info(explicit);
    if json {
        output::print_json(&info);
    } else {
        print_human(&info);
    }
    0
}
