//! Static gate configuration.
//!
//! The check battery, the executor allowlist and the secret-scan exclusions
//! are fixed at build time. [`GateConfig::default`] constructs them once at
//! startup and the result is passed explicitly to the gate.

use crate::security::ProgramAllowlist;

/// Patterns the secret/insecure-pattern scan searches for (extended regex).
pub const SECRET_PATTERNS: &[&str] = &[
    r#"(password|passwd|secret|api_key|apikey|token)\s*=\s*"[^"]+""#,
    r"InsecureSkipVerify\s*:\s*true",
    r"math/rand.*Intn.*crypto",
];

/// How a check's exit code and output map to pass/fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitContract {
    /// Exit 0 passes, anything else fails with the full output.
    ZeroPasses,
    /// grep semantics: exit 0 means lines matched (the problem), a non-zero
    /// exit with no output means nothing matched.
    MatchesFail,
}

/// One configured external check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSpec {
    pub label: String,
    pub program: String,
    pub args: Vec<String>,
    pub contract: ExitContract,
}

impl CheckSpec {
    pub fn new(label: &str, program: &str, args: &[&str], contract: ExitContract) -> Self {
        Self {
            label: label.to_string(),
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            contract,
        }
    }
}

/// Which secret-scan matches are ignored, decided from the match's path only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanExclusions {
    /// Directory names whose subtrees are vendored dependencies.
    pub vendored_dirs: Vec<String>,
    /// File name suffixes that mark test files.
    pub test_file_suffixes: Vec<String>,
}

impl Default for ScanExclusions {
    fn default() -> Self {
        Self {
            vendored_dirs: vec!["vendor".to_string()],
            test_file_suffixes: vec!["_test.go".to_string()],
        }
    }
}

impl ScanExclusions {
    /// Whether a match at `path` should be dropped.
    pub fn excludes(&self, path: &str) -> bool {
        let mut components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
        let file_name = components.pop().unwrap_or("");

        if components
            .iter()
            .any(|dir| self.vendored_dirs.iter().any(|v| v == dir))
        {
            return true;
        }

        self.test_file_suffixes
            .iter()
            .any(|suffix| file_name.ends_with(suffix.as_str()))
    }
}

/// Immutable configuration for one gate run.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Checks in canonical report order.
    pub checks: Vec<CheckSpec>,
    pub exclusions: ScanExclusions,
}

impl Default for GateConfig {
    fn default() -> Self {
        let secret_pattern = SECRET_PATTERNS.join("|");
        Self {
            checks: vec![
                CheckSpec::new(
                    "static analysis (go vet)",
                    "go",
                    &["vet", "./..."],
                    ExitContract::ZeroPasses,
                ),
                CheckSpec::new(
                    "lint (golangci-lint)",
                    "golangci-lint",
                    &[
                        "run",
                        "--enable=gosec,errcheck,bodyclose,noctx",
                        "--timeout=120s",
                    ],
                    ExitContract::ZeroPasses,
                ),
                CheckSpec::new(
                    "secret/insecure pattern scan",
                    "grep",
                    &["-rn", "--include=*.go", "-E", secret_pattern.as_str(), "."],
                    ExitContract::MatchesFail,
                ),
            ],
            exclusions: ScanExclusions::default(),
        }
    }
}

impl GateConfig {
    /// Allowlist holding exactly the programs the configured checks need.
    pub fn allowlist(&self) -> ProgramAllowlist {
        ProgramAllowlist::new(self.checks.iter().map(|c| c.program.as_str()))
    }
}
