use super::*;

fn alice() -> EnvSnapshot {
    EnvSnapshot::empty()
        .with_cwd("/home/alice/project")
        .with_user("alice")
        .with_var("HOME", "/home/alice")
        .with_var("NXF_WORK", "/home/alice/project/work")
}

const RUN_LOG: &str = "\
\x1b[1;32mN E X T F L O W  ~  version 24.04.2\x1b[0m
Launching `main.nf` [nasty_magritte] DSL2 - revision: 0123456789
Nextflow 24.10.0 is available - Please consider updating your version to it

executor >  local (2)
[6a/1b2c3d] process > FASTQC (sample1) [100%] 1 of 1 \u{2714}
Pulling Singularity image docker://quay.io/biocontainers/fastqc:0.12.1
WARN: Task runtime metrics are not reported
userName : alice
workDir : /home/alice/project/work/6a/1b2c3d4e5f60718293a4b5c6d7e8f9
Completed at: 2024-01-15 10:30:00
Duration    : 1m 2s
WARN: Task runtime metrics are not reported
Run name nasty_magritte done
nf-core/rnaseq 3.14.0
";

fn expected() -> Vec<&'static str> {
    vec![
        "N E X T F L O W  ~  version [VERSION]",
        "Launching `main.nf` [RUN_NAME] DSL2 - revision: [REVISION]",
        "executor >  local (2)",
        "[NXF_HASH] process > FASTQC (sample1) [100%] 1 of 1 \u{2714}",
        "userName : [USER]",
        "workDir : [PATH]/6a/[NFT_HASH]",
        "Completed at: [TIMESTAMP]",
        "Duration    : 1m 2s",
        "Run name [RUN_NAME] done",
        "nf-core/rnaseq [VERSION]",
        "Pulling [CONTAINER] image [CONTAINER]://quay.io/biocontainers/fastqc:0.12.1",
        "WARN: Task runtime metrics are not reported",
    ]
}

#[test]
fn full_run_log() {
    let out = normalize_text(RUN_LOG, &FilterOptions::default(), &alice());
    assert_eq!(out.lines, expected());
    assert!(out.diagnostics.is_empty());
}

#[test]
fn text_and_lines_agree() {
    let lines: Vec<&str> = RUN_LOG.split('\n').collect();
    let opts = FilterOptions::default();
    assert_eq!(
        normalize_text(RUN_LOG, &opts, &alice()),
        normalize_lines(&lines, &opts, &alice())
    );
}

#[test]
fn normalizing_canonical_output_is_a_no_op() {
    let opts = FilterOptions::default();
    let once = normalize_text(RUN_LOG, &opts, &alice()).into_lines();
    let twice = normalize_lines(&once, &opts, &alice()).into_lines();
    assert_eq!(once, twice);
}

#[test]
fn idempotent_without_sorting() {
    let opts = FilterOptions {
        sorted: false,
        ..FilterOptions::default()
    };
    let once = normalize_text(RUN_LOG, &opts, &alice()).into_lines();
    let twice = normalize_lines(&once, &opts, &alice()).into_lines();
    assert_eq!(once, twice);
}

#[test]
fn repeated_calls_are_identical() {
    let opts = FilterOptions::default();
    let first = normalize_text(RUN_LOG, &opts, &alice());
    for _ in 0..5 {
        assert_eq!(normalize_text(RUN_LOG, &opts, &alice()), first);
    }
}

#[test]
fn unsorted_keeps_original_order_and_duplicates() {
    let opts = FilterOptions {
        sorted: false,
        ..FilterOptions::default()
    };
    let out = normalize_text(RUN_LOG, &opts, &alice()).into_lines();
    let warn_count = out.iter().filter(|l| l.starts_with("WARN:")).count();
    assert_eq!(warn_count, 2);
    assert!(out[4].starts_with("Pulling "), "got: {out:?}");
}

#[test]
fn sortable_lines_follow_order_preserving_lines() {
    let input = [
        "[ab/cdef01] Submitted process > B (2)",
        "Plan: 3 tasks",
        "[12/345678] Submitted process > A (1)",
        "Staging foreign file: s3://bucket/x",
        "Summary",
        "ERROR ~ Error executing process",
    ];
    let out = normalize_lines(&input, &FilterOptions::default(), &EnvSnapshot::empty());
    let first_sortable = out
        .lines
        .iter()
        .position(|l| is_sortable(l))
        .expect("sortable lines survive");
    assert!(out.lines[..first_sortable].iter().all(|l| !is_sortable(l)));
    assert!(out.lines[first_sortable..].iter().all(|l| is_sortable(l)));
    assert_eq!(&out.lines[..first_sortable], &["Plan: 3 tasks", "Summary"]);
    let tail = &out.lines[first_sortable..];
    assert!(tail.windows(2).all(|w| w[0] <= w[1]), "got: {tail:?}");
}

#[test]
fn submitted_process_lines_collapse_after_scrubbing() {
    // Different hashes, same process: identical once hashes are markers.
    let input = [
        "[ab/cdef01] Submitted process > FASTQC (1)",
        "[12/345678] Submitted process > FASTQC (1)",
    ];
    let out = normalize_lines(&input, &FilterOptions::default(), &EnvSnapshot::empty());
    assert_eq!(out.lines, vec!["[NXF_HASH] Submitted process > FASTQC (1)"]);
}

#[test]
fn separated_duplicates_survive() {
    let out = normalize_lines(&["A", "B", "A"], &FilterOptions::default(), &EnvSnapshot::empty());
    assert_eq!(out.lines, vec!["A", "B", "A"]);
}

#[test]
fn conda_env_creation_is_sortable_after_scrub() {
    let input = [
        "Creating env using conda: bioconda::multiqc=1.21",
        "Creating env using conda: bioconda::fastqc=0.12.1",
        "done",
    ];
    let out = normalize_lines(&input, &FilterOptions::default(), &EnvSnapshot::empty());
    assert_eq!(
        out.lines,
        vec![
            "done",
            "Creating env using [CONTAINER]: bioconda::fastqc=0.12.1",
            "Creating env using [CONTAINER]: bioconda::multiqc=1.21",
        ]
    );
}

#[test]
fn nextflow_home_defaults_under_home() {
    let env = EnvSnapshot::empty().with_var("HOME", "/home/alice");
    let out = normalize_text(
        "assets: /home/alice/.nextflow/assets/nf-core/rnaseq",
        &FilterOptions::default(),
        &env,
    );
    assert_eq!(out.lines, vec!["assets: [PATH]/assets/nf-core/rnaseq"]);
}

#[test]
fn update_notice_lines_disappear() {
    let input = [
        "Nextflow 25.04.0 is available - Please consider updating your version to it",
        "  Please consider updating your version",
        "kept",
    ];
    let out = normalize_lines(&input, &FilterOptions::default(), &EnvSnapshot::empty());
    assert_eq!(out.lines, vec!["kept"]);
}

#[test]
fn large_input_is_handled() {
    let line = "[ab/cdef01] Submitted process > TASK (1) at 2024-01-15T10:30:00Z";
    let input: Vec<&str> = std::iter::repeat_n(line, 10_000).collect();
    let out = normalize_lines(&input, &FilterOptions::default(), &EnvSnapshot::empty());
    assert_eq!(
        out.lines,
        vec!["[NXF_HASH] Submitted process > TASK (1) at [TIMESTAMP]"]
    );
}
