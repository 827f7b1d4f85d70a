//! Decides whether an invocation is a publish action the gate applies to.

use serde_json::Value;

/// Phrase that marks a pull-request creation, matched case-insensitively.
pub const GATED_PHRASE: &str = "gh pr create";

/// Outcome of classifying a raw invocation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Not a gated command, or not a parsable invocation. Allowed silently.
    NotGated,
    /// A pull-request creation; the checks must run.
    Gated { command: String },
}

impl Classification {
    pub fn is_gated(&self) -> bool {
        matches!(self, Classification::Gated { .. })
    }
}

/// Classify a raw JSON payload.
///
/// Only the top-level `command` string is consulted. Anything that is not a
/// JSON object carrying a string `command` is [`Classification::NotGated`].
pub fn classify(raw: &str) -> Classification {
    let Some(command) = parse_command(raw) else {
        return Classification::NotGated;
    };

    if command.to_lowercase().contains(GATED_PHRASE) {
        Classification::Gated { command }
    } else {
        Classification::NotGated
    }
}

fn parse_command(raw: &str) -> Option<String> {
    let value: Value = serde_json::from_str(raw).ok()?;
    value.as_object()?.get("command")?.as_str().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gated(raw: &str) -> bool {
        classify(raw).is_gated()
    }

    #[test]
    fn test_plain_pr_create() {
        assert_eq!(
            classify(r#"{"command": "gh pr create --title foo"}"#),
            Classification::Gated {
                command: "gh pr create --title foo".to_string()
            }
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert!(gated(r#"{"command": "GH PR CREATE --title foo"}"#));
        assert!(gated(r#"{"command": "Gh Pr Create"}"#));
    }

    #[test]
    fn test_phrase_anywhere_in_shell_syntax() {
        assert!(gated(r#"{"command": "git push && gh pr create --fill"}"#));
        assert!(gated(r#"{"command": "cd repo; gh pr create"}"#));
        assert!(gated(r#"{"command": "echo 'gh pr create'"}"#));
        assert!(gated(r#"{"command": "FOO=1 gh pr create -d"}"#));
    }

    #[test]
    fn test_other_commands_not_gated() {
        assert!(!gated(r#"{"command": "git status"}"#));
        assert!(!gated(r#"{"command": "gh pr list"}"#));
        assert!(!gated(r#"{"command": "gh pr view 12"}"#));
        assert!(!gated(r#"{"command": "gh  pr create"}"#));
        assert!(!gated(r#"{"command": ""}"#));
    }

    #[test]
    fn test_unparsable_input_not_gated() {
        assert!(!gated("not json"));
        assert!(!gated(""));
        assert!(!gated("gh pr create"));
        assert!(!gated(r#"{"command": "gh pr create""#));
    }

    #[test]
    fn test_wrong_shape_not_gated() {
        assert!(!gated(r#"{"other": "gh pr create"}"#));
        assert!(!gated(r#"{"command": 42}"#));
        assert!(!gated(r#"{"command": null}"#));
        assert!(!gated(r#"{"command": ["gh pr create"]}"#));
        assert!(!gated(r#"["gh pr create"]"#));
        assert!(!gated(r#""gh pr create""#));
        assert!(!gated("null"));
    }

    #[test]
    fn test_extra_fields_ignored() {
        assert!(gated(
            r#"{"command": "gh pr create", "description": "open PR", "timeout": 5}"#
        ));
    }
}
