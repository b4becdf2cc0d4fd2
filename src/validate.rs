//! Diagnostic validation of raw PATH entries.
//!
//! A sibling report to the optimization pipeline: every entry is classified
//! into zero or more issue buckets, nothing is removed or reordered. Quoting,
//! unquoted spaces and excessive length are advisory; empty, malformed and
//! non-existent entries make an entry invalid.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::config::Config;
use crate::core::{normalized_key, strip_outer_quotes, DirectoryProbe};

/// Windows rejects individual path components longer than MAX_PATH.
pub const MAX_ENTRY_LENGTH: usize = 260;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum PathIssue {
    Empty,
    Malformed,
    NonExistent,
    Quoted,
    SpacesUnquoted,
    TooLong,
}

impl PathIssue {
    /// Whether this issue makes an entry invalid, as opposed to advisory.
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            PathIssue::Empty | PathIssue::Malformed | PathIssue::NonExistent
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryDiagnostics {
    pub raw: String,
    pub issues: BTreeSet<PathIssue>,
}

impl EntryDiagnostics {
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(|i| i.is_fatal())
    }
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ValidationReport {
    pub entries: Vec<EntryDiagnostics>,
    pub issue_counts: BTreeMap<PathIssue, usize>,
    pub valid_count: usize,
    pub invalid_count: usize,
    /// Combined length of the scope strings handed in, counting the
    /// separators that re-joining would insert within each scope.
    pub total_length: usize,
    pub exceeds_limit: bool,
}

impl ValidationReport {
    fn push(&mut self, diagnostics: EntryDiagnostics) {
        for issue in &diagnostics.issues {
            *self.issue_counts.entry(*issue).or_insert(0) += 1;
        }
        if diagnostics.is_valid() {
            self.valid_count += 1;
        } else {
            self.invalid_count += 1;
        }
        self.entries.push(diagnostics);
    }
}

/// Characters that cannot appear in a resolvable Windows path entry.
const ILLEGAL_CHARS: &[char] = &['<', '>', '|', '?', '*'];

fn diagnose(raw: &str, probe: &DirectoryProbe) -> EntryDiagnostics {
    let mut issues = BTreeSet::new();
    let trimmed = raw.trim();
    let quoted = trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"');
    let unquoted = strip_outer_quotes(trimmed);

    if trimmed.is_empty() {
        issues.insert(PathIssue::Empty);
    } else {
        if unquoted.contains(ILLEGAL_CHARS)
            || unquoted.contains('"')
            || unquoted.contains("\\\\")
        {
            issues.insert(PathIssue::Malformed);
        }
        let key = normalized_key(raw);
        if !probe.exists(&key, unquoted) {
            issues.insert(PathIssue::NonExistent);
        }
        if quoted {
            issues.insert(PathIssue::Quoted);
        } else if trimmed.contains(' ') {
            issues.insert(PathIssue::SpacesUnquoted);
        }
        if raw.len() > MAX_ENTRY_LENGTH {
            issues.insert(PathIssue::TooLong);
        }
    }

    EntryDiagnostics {
        raw: raw.to_string(),
        issues,
    }
}

/// Length of the scope string the entries came from: entry lengths plus one
/// separator between each pair.
fn scope_length(entries: &[String]) -> usize {
    let chars: usize = entries.iter().map(|e| e.len()).sum();
    chars + entries.len().saturating_sub(1)
}

/// Validates one scope's entries.
pub fn validate(
    entries: &[String],
    config: &Config,
    probe: &DirectoryProbe,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    for raw in entries {
        report.push(diagnose(raw, probe));
    }
    report.total_length = scope_length(entries);
    report.exceeds_limit = report.total_length > config.max_path_length;
    report
}

/// Validates both scopes into one report. The length accounting sums the two
/// scope strings, since Windows stores and limits them together.
pub fn validate_scopes(
    user: &[String],
    system: &[String],
    config: &Config,
    probe: &DirectoryProbe,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    for raw in system.iter().chain(user) {
        report.push(diagnose(raw, probe));
    }
    report.total_length = scope_length(user) + scope_length(system);
    report.exceeds_limit = report.total_length > config.max_path_length;
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issues_of(raw: &str) -> BTreeSet<PathIssue> {
        diagnose(raw, &DirectoryProbe::new()).issues
    }

    #[test]
    fn test_empty_entry() {
        assert_eq!(issues_of("   "), [PathIssue::Empty].into_iter().collect());
    }

    #[test]
    fn test_malformed_illegal_characters() {
        assert!(issues_of("C:\\bad<dir>").contains(&PathIssue::Malformed));
        assert!(issues_of("C:\\bad|pipe").contains(&PathIssue::Malformed));
        assert!(issues_of("C:\\doubled\\\\sep").contains(&PathIssue::Malformed));
    }

    #[test]
    fn test_quoted_is_advisory_not_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let raw = format!("\"{}\"", dir.path().display());
        let d = diagnose(&raw, &DirectoryProbe::new());
        assert!(d.issues.contains(&PathIssue::Quoted));
        assert!(!d.issues.contains(&PathIssue::Malformed));
        assert!(d.is_valid());
    }

    #[test]
    fn test_spaces_unquoted() {
        assert!(issues_of("C:\\Program Dir\\bin").contains(&PathIssue::SpacesUnquoted));
        assert!(!issues_of("\"C:\\Program Dir\\bin\"").contains(&PathIssue::SpacesUnquoted));
    }

    #[test]
    fn test_too_long() {
        let raw = format!("C:\\{}", "x".repeat(300));
        assert!(issues_of(&raw).contains(&PathIssue::TooLong));
    }

    #[test]
    fn test_existing_directory_is_valid() {
        let dir = tempfile::tempdir().unwrap();
        let d = diagnose(&dir.path().to_string_lossy(), &DirectoryProbe::new());
        assert!(d.is_valid());
        assert!(!d.issues.contains(&PathIssue::NonExistent));
    }

    #[test]
    fn test_nonexistent_is_fatal() {
        let d = diagnose("C:\\definitely\\missing", &DirectoryProbe::new());
        assert!(d.issues.contains(&PathIssue::NonExistent));
        assert!(!d.is_valid());
    }

    #[test]
    fn test_report_counts() {
        let config = Config::default();
        let probe = DirectoryProbe::new();
        let dir = tempfile::tempdir().unwrap();
        let entries = vec![
            dir.path().to_string_lossy().to_string(),
            String::new(),
            "C:\\missing".to_string(),
        ];
        let report = validate(&entries, &config, &probe);
        assert_eq!(report.valid_count, 1);
        assert_eq!(report.invalid_count, 2);
        assert_eq!(report.issue_counts[&PathIssue::Empty], 1);
        assert_eq!(report.entries.len(), 3);
    }

    #[test]
    fn test_length_accounting_across_scopes() {
        let config = Config::default();
        let probe = DirectoryProbe::new();
        // One 4000-char user string and one 4200-char system string.
        let user = vec!["u".repeat(4000)];
        let system = vec!["s".repeat(4200)];
        let report = validate_scopes(&user, &system, &config, &probe);
        assert_eq!(report.total_length, 8200);
        assert!(report.exceeds_limit);
    }

    #[test]
    fn test_scope_length_counts_separators() {
        let entries = vec!["ab".to_string(), "cd".to_string(), "ef".to_string()];
        assert_eq!(scope_length(&entries), 8);
    }

    #[test]
    fn test_validator_never_filters() {
        let config = Config::default();
        let probe = DirectoryProbe::new();
        let entries = vec![String::new(), "C:\\missing".to_string()];
        let report = validate(&entries, &config, &probe);
        assert_eq!(report.entries.len(), entries.len());
        assert_eq!(report.entries[0].raw, "");
    }
}
