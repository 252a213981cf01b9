use super::rules::BUILTIN_RULES;
use super::*;

fn scrub_with(names: &[&str], line: &str, env: &EnvSnapshot) -> String {
    let chain = RuleChain::builtin().only(names);
    let ctx = ScrubContext::new(env, None);
    chain.apply(line.to_string(), &ctx)
}

fn scrub(names: &[&str], line: &str) -> String {
    scrub_with(names, line, &EnvSnapshot::empty())
}

// --- chain as data ---

#[test]
fn builtin_chain_order() {
    assert_eq!(RuleChain::builtin().names(), BUILTIN_RULES);
}

#[test]
fn without_drops_rules() {
    let chain = RuleChain::builtin().without(&["path", "container", "nope"]);
    assert_eq!(chain.len(), BUILTIN_RULES.len() - 2);
    assert!(!chain.names().contains(&"path"));
}

#[test]
fn only_reorders() {
    let chain = RuleChain::builtin().only(&["version", "timestamp"]);
    assert_eq!(chain.names(), vec!["version", "timestamp"]);
}

#[test]
fn custom_rule_runs_in_position() {
    let mut chain = RuleChain::builtin().only(&["timestamp"]);
    chain.insert_before(
        "timestamp",
        ScrubRule::custom("slash-to-dash", |line, _| line.replace('/', "-")),
    );
    let normalizer = Normalizer::with_chain(chain);
    let out = normalizer.normalize(
        "at 01/15/2024 10:30:00",
        &FilterOptions::default(),
        &EnvSnapshot::empty(),
    );
    // The custom rule rewrites the US date before the timestamp rule runs,
    // so the US pattern no longer matches.
    assert_eq!(out.lines, vec!["at 01-15-2024 10:30:00"]);
}

#[test]
fn empty_chain_only_drops_blanks() {
    let normalizer = Normalizer::with_chain(RuleChain::empty());
    let out = normalizer.normalize(
        "2024-01-15T10:30:00Z\n\n[ab/cdef01] x",
        &FilterOptions::default(),
        &EnvSnapshot::empty(),
    );
    assert_eq!(out.lines, vec!["2024-01-15T10:30:00Z", "[ab/cdef01] x"]);
}

#[test]
fn path_must_precede_container_scrub() {
    let env = EnvSnapshot::empty().with_var("NXF_CONDA_CACHEDIR", "/cache/conda");
    assert_eq!(
        scrub_with(&["path", "container"], "env at /cache/conda/fastqc", &env),
        "env at [PATH]/fastqc"
    );
    // Reversed, the technology name splits the path and it is no longer found.
    assert_eq!(
        scrub_with(&["container", "path"], "env at /cache/conda/fastqc", &env),
        "env at /cache/[CONTAINER]/fastqc"
    );
}

// --- timestamp ---

#[test]
fn iso_timestamp_variants() {
    let names = ["timestamp"];
    assert_eq!(scrub(&names, "2024-01-15T10:30:00"), "[TIMESTAMP]");
    assert_eq!(scrub(&names, "2024-01-15 10:30:00"), "[TIMESTAMP]");
    assert_eq!(scrub(&names, "trace_2024-01-15_10-30-00.txt"), "trace_[TIMESTAMP].txt");
    assert_eq!(scrub(&names, "2024-01-15T10:30:00.123456+02:00 x"), "[TIMESTAMP] x");
    assert_eq!(scrub(&names, "2024-01-15T10:30:00Z"), "[TIMESTAMP]");
}

#[test]
fn us_timestamp() {
    assert_eq!(
        scrub(&["timestamp"], "Jan: 01/15/2024  10:30:00 start"),
        "Jan: [TIMESTAMP] start"
    );
}

#[test]
fn bare_dates_are_kept() {
    assert_eq!(scrub(&["timestamp"], "release 2024-01-15"), "release 2024-01-15");
}

// --- hash / revision ---

#[test]
fn process_hash() {
    assert_eq!(
        scrub(&["hash"], "[a1/b2c3d4] process > X"),
        "[NXF_HASH] process > X"
    );
    assert_eq!(scrub(&["hash"], "[A1/B2C3D4] x"), "[A1/B2C3D4] x");
}

#[test]
fn long_hex_hash() {
    let h30 = "0123456789abcdef0123456789abcd";
    let h32 = "0123456789abcdef0123456789abcdef";
    let h40 = "0123456789abcdef0123456789abcdef01234567";
    assert_eq!(scrub(&["hash"], &format!("dir {h30}")), "dir [NFT_HASH]");
    assert_eq!(scrub(&["hash"], &format!("md5 {h32}")), "md5 [NFT_HASH]");
    assert_eq!(scrub(&["hash"], &format!("sha {h40}")), format!("sha {h40}"));
}

#[test]
fn revision() {
    assert_eq!(
        scrub(&["revision"], "DSL2 - revision: 1a2b3c4d5e"),
        "DSL2 - revision: [REVISION]"
    );
    assert_eq!(scrub(&["revision"], "revision: main"), "revision: main");
}

// --- update notice ---

#[test]
fn update_notice_blanks_line() {
    assert_eq!(
        scrub(&["update-notice"], "Nextflow 24.10.1 is available - Please consider updating"),
        ""
    );
    assert_eq!(
        scrub(&["update-notice"], "Nextflow 24.10.1 started"),
        "Nextflow 24.10.1 started"
    );
}

#[test]
fn blank_line_short_circuits_later_rules() {
    let mut chain = RuleChain::builtin().only(&["update-notice"]);
    chain.push(ScrubRule::custom("mark", |line, _| format!("{line}!")));
    let ctx = ScrubContext::default();
    assert_eq!(
        chain.apply("Please consider updating your version".to_string(), &ctx),
        ""
    );
    assert_eq!(chain.apply("x".to_string(), &ctx), "x!");
}

// --- user ---

#[test]
fn user_requires_snapshot_user() {
    assert_eq!(scrub(&["user"], "userName : alice"), "userName : alice");
    let env = EnvSnapshot::empty().with_user("alice");
    assert_eq!(
        scrub_with(&["user"], "userName: alice, userName : alice", &env),
        "userName: [USER], userName : [USER]"
    );
}

#[test]
fn user_with_regex_metacharacters() {
    let env = EnvSnapshot::empty().with_user("a.b+c");
    assert_eq!(
        scrub_with(&["user"], "userName : a.b+c", &env),
        "userName : [USER]"
    );
    assert_eq!(
        scrub_with(&["user"], "userName : aXb+c", &env),
        "userName : aXb+c"
    );
}

#[test]
fn user_must_be_the_whole_value() {
    let env = EnvSnapshot::empty().with_user("alice");
    assert_eq!(
        scrub_with(&["user"], "userName : alicent", &env),
        "userName : alicent"
    );
    assert_eq!(
        scrub_with(&["user"], "userName : alice-2", &env),
        "userName : alice-2"
    );
    assert_eq!(
        scrub_with(&["user"], "userName : alice (uid 1000)", &env),
        "userName : [USER] (uid 1000)"
    );
}

// --- container ---

#[test]
fn container_technologies() {
    let names = ["container"];
    assert_eq!(scrub(&names, "-profile docker,test"), "-profile [CONTAINER],test");
    assert_eq!(scrub(&names, "Apptainer image"), "[CONTAINER] image");
    assert_eq!(scrub(&names, "SINGULARITY_CACHEDIR"), "SINGULARITY_CACHEDIR");
    assert_eq!(scrub(&names, "micromamba env"), "[CONTAINER] env");
    assert_eq!(scrub(&names, "dockerfile"), "dockerfile");
}

// --- version ---

#[test]
fn pipeline_versions() {
    let names = ["version"];
    assert_eq!(scrub(&names, "nf-core/rnaseq 3.14.0"), "nf-core/rnaseq [VERSION]");
    assert_eq!(scrub(&names, "nf-core/sarek  3.4dev"), "nf-core/sarek  [VERSION]");
    assert_eq!(scrub(&names, "nf-core/sarek v3.4"), "nf-core/sarek v3.4");
    assert_eq!(
        scrub(&names, "N E X T F L O W  ~  version 23.10.1"),
        "N E X T F L O W  ~  version [VERSION]"
    );
}

// --- markers are stable ---

#[test]
fn markers_survive_every_rule() {
    let env = EnvSnapshot::empty()
        .with_cwd("/work")
        .with_user("alice")
        .with_var("HOME", "/home/alice");
    let chain = RuleChain::builtin();
    let ctx = ScrubContext::new(&env, None);
    for marker in [
        markers::USER,
        markers::TIMESTAMP,
        markers::NXF_HASH,
        markers::NFT_HASH,
        markers::REVISION,
        markers::PATH,
        markers::RUN_NAME,
        markers::CONTAINER,
        markers::VERSION,
        markers::FILTERED,
    ] {
        assert_eq!(chain.apply(marker.to_string(), &ctx), marker);
    }
}
