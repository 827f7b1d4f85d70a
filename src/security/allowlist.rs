//! Program allowlist for the gate's executor.
//!
//! The executor may only launch programs whose name appears here verbatim.
//! Matching is exact: no prefixes, no path resolution, no case folding, so
//! `/usr/bin/go` or `go; rm -rf .` never match an entry for `go`.

use std::collections::BTreeSet;

/// Closed set of program names the executor is permitted to launch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramAllowlist {
    programs: BTreeSet<String>,
}

impl ProgramAllowlist {
    /// Build an allowlist from a fixed set of program names.
    pub fn new<I, S>(programs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            programs: programs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn permits(&self, program: &str) -> bool {
        self.programs.contains(program)
    }

    /// Iterate the permitted names in sorted order.
    pub fn programs(&self) -> impl Iterator<Item = &str> {
        self.programs.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate_allowlist() -> ProgramAllowlist {
        ProgramAllowlist::new(["go", "golangci-lint", "grep"])
    }

    #[test]
    fn test_permits_exact_names() {
        let allowlist = gate_allowlist();
        assert!(allowlist.permits("go"));
        assert!(allowlist.permits("golangci-lint"));
        assert!(allowlist.permits("grep"));
    }

    #[test]
    fn test_rejects_unknown_programs() {
        let allowlist = gate_allowlist();
        assert!(!allowlist.permits("sh"));
        assert!(!allowlist.permits("bash"));
        assert!(!allowlist.permits("curl"));
        assert!(!allowlist.permits(""));
    }

    #[test]
    fn test_rejects_near_misses() {
        let allowlist = gate_allowlist();
        // Paths, prefixes and padding must not slip through
        assert!(!allowlist.permits("/usr/bin/go"));
        assert!(!allowlist.permits("./go"));
        assert!(!allowlist.permits("golang"));
        assert!(!allowlist.permits("g"));
        assert!(!allowlist.permits(" go"));
        assert!(!allowlist.permits("go "));
        assert!(!allowlist.permits("GO"));
        assert!(!allowlist.permits("go; rm -rf ."));
    }

    #[test]
    fn test_programs_sorted_and_deduplicated() {
        let allowlist = ProgramAllowlist::new(["grep", "go", "grep"]);
        assert_eq!(allowlist.programs().collect::<Vec<_>>(), vec!["go", "grep"]);
    }

    #[test]
    fn test_empty_allowlist_permits_nothing() {
        let allowlist = ProgramAllowlist::default();
        assert_eq!(allowlist.programs().count(), 0);
        assert!(!allowlist.permits("go"));
    }
}
