//! Aggregates check outcomes into the final verdict and its report text.

use serde::Serialize;

use super::checks::CheckOutcome;
use super::sanitize::sanitize;

pub const PASS_BANNER: &str =
    "Security gate: PASS - all checks clean. Proceeding with PR creation.";
pub const FAIL_HEADLINE: &str = "SECURITY GATE: FAIL - PR creation blocked";
const FAIL_INTRO: &str = "The following automated security checks failed:";
const FAIL_OUTRO: &str = "Fix the issues above, then retry PR creation.";
const RULE_WIDTH: usize = 60;

/// Whether the intercepted action may go ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Proceed,
    Blocked,
}

impl Decision {
    pub fn exit_code(self) -> u8 {
        match self {
            Decision::Proceed => 0,
            Decision::Blocked => 1,
        }
    }
}

/// Final result of one gate invocation.
///
/// `report` is empty exactly when the command was not gated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateVerdict {
    pub decision: Decision,
    pub report: String,
}

impl GateVerdict {
    /// Verdict for a command the gate does not apply to.
    pub fn not_gated() -> Self {
        Self {
            decision: Decision::Proceed,
            report: String::new(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.decision.exit_code()
    }

    pub fn is_blocked(&self) -> bool {
        self.decision == Decision::Blocked
    }
}

/// Render outcomes, given in canonical check order, into a verdict.
pub fn format(outcomes: &[CheckOutcome]) -> GateVerdict {
    let failures: Vec<&CheckOutcome> = outcomes.iter().filter(|o| !o.passed).collect();

    if failures.is_empty() {
        return GateVerdict {
            decision: Decision::Proceed,
            report: PASS_BANNER.to_string(),
        };
    }

    let rule = "=".repeat(RULE_WIDTH);
    let mut report = String::new();
    report.push_str(&rule);
    report.push('\n');
    report.push_str(FAIL_HEADLINE);
    report.push('\n');
    report.push_str(&rule);
    report.push_str("\n\n");
    report.push_str(FAIL_INTRO);
    report.push_str("\n\n");
    for failure in failures {
        report.push('[');
        report.push_str(&sanitize(&failure.label));
        report.push_str("]\n");
        report.push_str(&sanitize(&failure.detail));
        report.push_str("\n\n");
    }
    report.push_str(FAIL_OUTRO);
    report.push('\n');
    report.push_str(&rule);
    report.push('\n');

    GateVerdict {
        decision: Decision::Blocked,
        report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcomes(vet: Option<&str>, lint: Option<&str>, scan: Option<&str>) -> Vec<CheckOutcome> {
        [
            ("static analysis (go vet)", vet),
            ("lint (golangci-lint)", lint),
            ("secret/insecure pattern scan", scan),
        ]
        .into_iter()
        .map(|(label, failure)| match failure {
            Some(detail) => CheckOutcome::fail(label, detail),
            None => CheckOutcome::pass(label),
        })
        .collect()
    }

    #[test]
    fn test_all_passed() {
        let verdict = format(&outcomes(None, None, None));
        assert_eq!(verdict.exit_code(), 0);
        assert_eq!(verdict.report, PASS_BANNER);
        assert!(verdict.report.contains("PASS"));
        assert!(!verdict.report.contains('\n'));
    }

    #[test]
    fn test_single_failure_layout() {
        let verdict = format(&outcomes(Some("./cmd/foo.go:12: unreachable code"), None, None));
        assert!(verdict.is_blocked());
        assert_eq!(verdict.exit_code(), 1);

        let rule = "=".repeat(60);
        let expected = format!(
            "{rule}\n{FAIL_HEADLINE}\n{rule}\n\n{FAIL_INTRO}\n\n\
             [static analysis (go vet)]\n./cmd/foo.go:12: unreachable code\n\n\
             {FAIL_OUTRO}\n{rule}\n"
        );
        assert_eq!(verdict.report, expected);
    }

    #[test]
    fn test_passing_checks_omitted() {
        let verdict = format(&outcomes(Some("vet error"), None, None));
        assert!(verdict.report.contains("[static analysis (go vet)]"));
        assert!(!verdict.report.contains("lint"));
        assert!(!verdict.report.contains("secret"));
    }

    #[test]
    fn test_failures_in_check_order() {
        let verdict = format(&outcomes(Some("vet error"), Some("lint error"), Some("a.go:1: x")));
        let vet = verdict.report.find("[static analysis (go vet)]");
        let lint = verdict.report.find("[lint (golangci-lint)]");
        let scan = verdict.report.find("[secret/insecure pattern scan]");
        match (vet, lint, scan) {
            (Some(v), Some(l), Some(s)) => assert!(v < l && l < s),
            _ => panic!("missing section in report: {}", verdict.report),
        }
    }

    #[test]
    fn test_detail_sanitized() {
        let verdict = format(&outcomes(Some("\x1b[31merror: bad code\x1b[0m"), None, None));
        assert!(!verdict.report.contains('\x1b'));
        assert!(verdict.report.contains("error: bad code"));
    }

    #[test]
    fn test_deterministic() {
        let input = outcomes(Some("a"), None, Some("b"));
        assert_eq!(format(&input), format(&input));
    }

    #[test]
    fn test_verdict_serializes_as_structured_data() {
        let verdict = format(&outcomes(Some("vet error"), None, None));
        let value = match serde_json::to_value(&verdict) {
            Ok(value) => value,
            Err(e) => panic!("serialize verdict: {e}"),
        };
        assert_eq!(value["decision"], "blocked");
        assert_eq!(value["report"], verdict.report.as_str());

        let value = match serde_json::to_value(GateVerdict::not_gated()) {
            Ok(value) => value,
            Err(e) => panic!("serialize verdict: {e}"),
        };
        assert_eq!(value, serde_json::json!({"decision": "proceed", "report": ""}));
    }

    #[test]
    fn test_outcome_serializes_as_structured_data() {
        let outcome = CheckOutcome::fail("lint (golangci-lint)", "a.go:1: G104");
        let value = match serde_json::to_value(&outcome) {
            Ok(value) => value,
            Err(e) => panic!("serialize outcome: {e}"),
        };
        assert_eq!(
            value,
            serde_json::json!({
                "label": "lint (golangci-lint)",
                "passed": false,
                "detail": "a.go:1: G104"
            })
        );
    }

    #[test]
    fn test_not_gated_has_empty_report() {
        let verdict = GateVerdict::not_gated();
        assert_eq!(verdict.exit_code(), 0);
        assert!(verdict.report.is_empty());
    }
}
