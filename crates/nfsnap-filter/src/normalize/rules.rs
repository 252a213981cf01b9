use std::fmt;
use std::sync::Arc;

use regex::Regex;

use nfsnap_common::env::EnvSnapshot;

use super::markers;
use super::paths;
use super::run_name::{CapturedRunName, RunNameScrub};

/// Compile one of the built-in literal patterns.
///
/// Every caller passes a constant pattern exercised by the unit tests, so a
/// failure here is a programming error rather than a runtime condition.
#[allow(clippy::expect_used)]
pub(crate) fn builtin_regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern must compile")
}

/// Per-call state shared by every rule: resolved from the environment
/// snapshot and the captured run name, then read-only.
#[derive(Debug, Clone, Default)]
pub struct ScrubContext {
    pub user: Option<String>,
    pub paths: Vec<String>,
    pub run_name: Option<CapturedRunName>,
}

impl ScrubContext {
    pub fn new(env: &EnvSnapshot, run_name: Option<CapturedRunName>) -> Self {
        Self {
            user: env.user_name().map(str::to_string),
            paths: paths::scrub_targets(env),
            run_name,
        }
    }
}

/// A regex and the text substituted for each match (`$1`-style groups expand).
#[derive(Debug, Clone)]
pub struct Replacement {
    pub pattern: Regex,
    pub with: &'static str,
}

impl Replacement {
    fn new(pattern: &str, with: &'static str) -> Self {
        Self {
            pattern: builtin_regex(pattern),
            with,
        }
    }
}

/// Caller-supplied scrub step.
#[derive(Clone)]
pub struct CustomScrub(pub Arc<dyn Fn(&str, &ScrubContext) -> String + Send + Sync>);

impl fmt::Debug for CustomScrub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomScrub(..)")
    }
}

#[derive(Debug, Clone)]
pub enum RuleAction {
    /// Apply each replacement in turn.
    Replace(Vec<Replacement>),
    /// Blank the whole line when any pattern matches.
    BlankLine(Vec<Regex>),
    /// `userName : <user>` → `userName : [USER]`; the regex matches the key
    /// and separator.
    User(Regex),
    /// Working directory and path-like variables → `[PATH]`.
    Paths,
    RunName(RunNameScrub),
    Custom(CustomScrub),
}

#[derive(Debug, Clone)]
pub struct ScrubRule {
    pub name: &'static str,
    pub action: RuleAction,
}

impl ScrubRule {
    pub const fn new(name: &'static str, action: RuleAction) -> Self {
        Self { name, action }
    }

    /// Wrap a closure as a rule.
    pub fn custom(
        name: &'static str,
        f: impl Fn(&str, &ScrubContext) -> String + Send + Sync + 'static,
    ) -> Self {
        Self::new(name, RuleAction::Custom(CustomScrub(Arc::new(f))))
    }

    pub fn apply(&self, line: String, ctx: &ScrubContext) -> String {
        match &self.action {
            RuleAction::Replace(replacements) => replacements.iter().fold(line, |acc, r| {
                if r.pattern.is_match(&acc) {
                    r.pattern.replace_all(&acc, r.with).into_owned()
                } else {
                    acc
                }
            }),
            RuleAction::BlankLine(patterns) => {
                if patterns.iter().any(|p| p.is_match(&line)) {
                    String::new()
                } else {
                    line
                }
            }
            RuleAction::User(key) => match ctx.user.as_deref() {
                Some(user) => scrub_user(key, &line, user),
                None => line,
            },
            RuleAction::Paths => {
                if ctx.paths.is_empty() {
                    line
                } else {
                    paths::scrub_paths(&line, &ctx.paths)
                }
            }
            RuleAction::RunName(scrub) => scrub.apply(&line, ctx.run_name.as_ref()),
            RuleAction::Custom(CustomScrub(f)) => f(&line, ctx),
        }
    }
}

fn scrub_user(key: &Regex, line: &str, user: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut last = 0;
    for m in key.find_iter(line) {
        if m.start() < last {
            continue;
        }
        let rest = &line[m.end()..];
        if rest.starts_with(user) && ends_user_name(&rest[user.len()..]) {
            out.push_str(&line[last..m.end()]);
            out.push_str(markers::USER);
            last = m.end() + user.len();
        }
    }
    out.push_str(&line[last..]);
    out
}

/// The user value must stop where `rest` begins: `alice` is not a prefix
/// of `alicent` or `alice_b`.
fn ends_user_name(rest: &str) -> bool {
    rest.chars()
        .next()
        .is_none_or(|c| !(c.is_alphanumeric() || c == '_' || c == '-'))
}

/// Names of the built-in rules, in application order.
pub const BUILTIN_RULES: &[&str] = &[
    "user",
    "timestamp",
    "hash",
    "revision",
    "update-notice",
    "path",
    "run-name",
    "container",
    "version",
];

/// Ordered scrub rules. Order matters: paths are replaced before run names
/// and technology names so that neither can split a path.
#[derive(Debug, Clone, Default)]
pub struct RuleChain {
    rules: Vec<ScrubRule>,
}

impl RuleChain {
    pub const fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn builtin() -> Self {
        let rules = vec![
            ScrubRule::new("user", RuleAction::User(builtin_regex(r"userName\s*:\s*"))),
            ScrubRule::new(
                "timestamp",
                RuleAction::Replace(vec![
                    Replacement::new(
                        r"[0-9]{4}-[0-9]{2}-[0-9]{2}[T\s_][0-9]{2}[:-][0-9]{2}[:-][0-9]{2}(?:\.[0-9]+)?(?:Z|[+-][0-9]{2}:[0-9]{2})?",
                        markers::TIMESTAMP,
                    ),
                    Replacement::new(
                        r"[0-9]{2}/[0-9]{2}/[0-9]{4}\s+[0-9]{2}:[0-9]{2}:[0-9]{2}",
                        markers::TIMESTAMP,
                    ),
                ]),
            ),
            ScrubRule::new(
                "hash",
                RuleAction::Replace(vec![
                    Replacement::new(r"\[[0-9a-f]{2}/[0-9a-f]{6}\]", markers::NXF_HASH),
                    Replacement::new(r"\b[0-9a-f]{30,32}\b", markers::NFT_HASH),
                ]),
            ),
            ScrubRule::new(
                "revision",
                RuleAction::Replace(vec![Replacement::new(
                    r"revision: [0-9a-f]{10}",
                    "revision: [REVISION]",
                )]),
            ),
            ScrubRule::new(
                "update-notice",
                RuleAction::BlankLine(vec![
                    builtin_regex(r"Nextflow\s+[0-9]+\.[0-9]+\.[0-9]+.*is available"),
                    builtin_regex(r"Please consider updating your version"),
                ]),
            ),
            ScrubRule::new("path", RuleAction::Paths),
            ScrubRule::new("run-name", RuleAction::RunName(RunNameScrub::new())),
            ScrubRule::new(
                "container",
                RuleAction::Replace(vec![Replacement::new(
                    r"(?i)\b(?:docker|podman|singularity|apptainer|charliecloud|shifter|sarus|conda|mamba|micromamba|spack)\b",
                    markers::CONTAINER,
                )]),
            ),
            ScrubRule::new(
                "version",
                RuleAction::Replace(vec![
                    Replacement::new(
                        r"(nf-core/\S+\s+)[0-9]+\.[0-9]+(?:\.[0-9]+)?[a-zA-Z]*",
                        "${1}[VERSION]",
                    ),
                    Replacement::new(
                        r"N E X T F L O W  ~  version [0-9]+\.[0-9]+\.[0-9]+",
                        "N E X T F L O W  ~  version [VERSION]",
                    ),
                ]),
            ),
        ];
        Self { rules }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Drop the named rules. Unknown names are ignored.
    #[must_use]
    pub fn without(mut self, names: &[&str]) -> Self {
        self.rules.retain(|r| !names.contains(&r.name));
        self
    }

    /// Keep only the named rules, in the order given by `names`.
    #[must_use]
    pub fn only(self, names: &[&str]) -> Self {
        let mut rules = self.rules;
        let mut picked = Vec::with_capacity(names.len());
        for name in names {
            if let Some(pos) = rules.iter().position(|r| r.name == *name) {
                picked.push(rules.remove(pos));
            }
        }
        Self { rules: picked }
    }

    pub fn push(&mut self, rule: ScrubRule) {
        self.rules.push(rule);
    }

    /// Insert `rule` before the rule called `before`, or at the end when no
    /// such rule exists.
    pub fn insert_before(&mut self, before: &str, rule: ScrubRule) {
        let pos = self
            .rules
            .iter()
            .position(|r| r.name == before)
            .unwrap_or(self.rules.len());
        self.rules.insert(pos, rule);
    }

    pub fn apply(&self, line: String, ctx: &ScrubContext) -> String {
        self.rules.iter().fold(line, |acc, rule| {
            if acc.is_empty() {
                acc
            } else {
                rule.apply(acc, ctx)
            }
        })
    }
}
