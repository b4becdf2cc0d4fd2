//! The cleanup stages applied to a scope's entry list.
//!
//! Each stage is a pure list-to-list transform that only ever removes
//! entries; surviving entries keep their relative order. Which stages run is
//! decided by the active fix-type set intersected with the configuration's
//! behavior flags.

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

use crate::config::Config;
use crate::core::{DirectoryProbe, PathEntry};

/// One concrete cleanup stage. `Ordering` and `ToolDuplicates` are listed
/// here because they belong to the fix-type vocabulary, but they are executed
/// by the orderer and the tool resolver rather than by this pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FixType {
    EmptyPaths,
    Duplicates,
    NonExistent,
    TemporaryPaths,
    KnownIssues,
    ToolDuplicates,
    Ordering,
}

pub type FixTypeSet = BTreeSet<FixType>;

/// The caller-selected cleanup focus, as accepted from the CLI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FixFocus {
    Duplicates,
    Ordering,
    NonExistent,
    ToolSpecific,
    All,
}

/// Expands a fix focus into the concrete set of stages to run.
pub fn resolve_fix_types(focus: FixFocus) -> FixTypeSet {
    let fixes: &[FixType] = match focus {
        FixFocus::Duplicates => &[FixType::Duplicates, FixType::EmptyPaths],
        FixFocus::Ordering => &[FixType::Ordering],
        FixFocus::NonExistent => &[FixType::NonExistent],
        FixFocus::ToolSpecific => &[FixType::ToolDuplicates, FixType::KnownIssues],
        FixFocus::All => &[
            FixType::EmptyPaths,
            FixType::Duplicates,
            FixType::NonExistent,
            FixType::TemporaryPaths,
            FixType::KnownIssues,
            FixType::ToolDuplicates,
            FixType::Ordering,
        ],
    };
    fixes.iter().copied().collect()
}

/// An entry that cannot name a real directory: blank, a bare separator, too
/// short to be a path, or containing a doubled separator.
pub fn is_empty_like(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || trimmed == "\\" || trimmed.len() <= 2 || trimmed.contains("\\\\")
}

/// EmptyPaths stage.
pub fn remove_empty(entries: Vec<PathEntry>) -> Vec<PathEntry> {
    entries
        .into_iter()
        .filter(|e| !is_empty_like(&e.raw))
        .collect()
}

/// Duplicates stage: first occurrence per normalized key wins. `seen` is
/// threaded by the caller so cross-scope de-duplication can share one set.
pub fn remove_duplicates(entries: Vec<PathEntry>, seen: &mut HashSet<String>) -> Vec<PathEntry> {
    entries
        .into_iter()
        .filter(|e| seen.insert(e.key.clone()))
        .collect()
}

/// NonExistent stage.
pub fn remove_nonexistent(entries: Vec<PathEntry>, probe: &DirectoryProbe) -> Vec<PathEntry> {
    entries
        .into_iter()
        .filter(|e| probe.exists(&e.key, e.probe_path()))
        .collect()
}

/// TemporaryPaths stage: drops entries matching any configured ignore regex.
pub fn remove_ignored(entries: Vec<PathEntry>, config: &Config) -> Vec<PathEntry> {
    entries
        .into_iter()
        .filter(|e| !config.ignore_patterns.iter().any(|p| p.is_match(&e.raw)))
        .collect()
}

/// KnownIssues stage. `only` restricts the applied patterns to a subset of
/// issue names; names that match no configured issue are ignored silently.
pub fn remove_known_issues(
    entries: Vec<PathEntry>,
    config: &Config,
    only: Option<&[String]>,
) -> Vec<PathEntry> {
    let active: Vec<_> = config
        .known_issues
        .iter()
        .filter(|issue| match only {
            Some(names) => names.iter().any(|n| n == &issue.name),
            None => true,
        })
        .collect();
    entries
        .into_iter()
        .filter(|e| !active.iter().any(|issue| issue.pattern.is_match(&e.raw)))
        .collect()
}

/// Runs the removal stages in canonical order, gated by the fix-type set and
/// the configuration flags. Tool-duplicate resolution and ordering happen
/// outside this pipeline.
pub fn run_filter_pipeline(
    entries: Vec<PathEntry>,
    config: &Config,
    fixes: &FixTypeSet,
    probe: &DirectoryProbe,
) -> Vec<PathEntry> {
    let mut seen = HashSet::new();
    run_filter_pipeline_with_seen(entries, config, fixes, probe, &mut seen)
}

/// Pipeline variant sharing a seen-key set across calls, used when the two
/// scopes de-duplicate against each other.
pub fn run_filter_pipeline_with_seen(
    mut entries: Vec<PathEntry>,
    config: &Config,
    fixes: &FixTypeSet,
    probe: &DirectoryProbe,
    seen: &mut HashSet<String>,
) -> Vec<PathEntry> {
    if fixes.contains(&FixType::EmptyPaths) && config.remove_empty_paths {
        entries = logged_stage("empty", entries, remove_empty);
    }
    if fixes.contains(&FixType::Duplicates) && config.remove_duplicates {
        entries = logged_stage("duplicates", entries, |e| remove_duplicates(e, seen));
    }
    if fixes.contains(&FixType::NonExistent) && config.remove_nonexistent {
        entries = logged_stage("nonexistent", entries, |e| remove_nonexistent(e, probe));
    }
    if fixes.contains(&FixType::TemporaryPaths) {
        entries = logged_stage("temporary", entries, |e| remove_ignored(e, config));
    }
    if fixes.contains(&FixType::KnownIssues) {
        entries = logged_stage("known-issues", entries, |e| {
            remove_known_issues(e, config, None)
        });
    }
    entries
}

fn logged_stage(
    name: &str,
    entries: Vec<PathEntry>,
    stage: impl FnOnce(Vec<PathEntry>) -> Vec<PathEntry>,
) -> Vec<PathEntry> {
    let before = entries.len();
    let entries = stage(entries);
    if entries.len() < before {
        log::debug!("{} stage removed {} entries", name, before - entries.len());
    }
    entries
}
