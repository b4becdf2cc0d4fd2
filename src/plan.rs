//! Plan assembly: the one place that wires the filter pipeline, tool
//! resolver, orderer and diff engine together for both scopes.
//!
//! Building a plan never mutates anything outside the run: the engine is a
//! pure function from (current entries, configuration) to (proposed entries,
//! diagnostics). Applying the plan is a separate collaborator's job.

use serde::Serialize;
use std::collections::HashSet;

use crate::analysis::{detect_tools, tool_duplicate_losers, ToolDetection};
use crate::config::Config;
use crate::core::{normalized_key, DirectoryProbe, PathEntry, Scope};
use crate::diff::diff;
use crate::filter::{resolve_fix_types, run_filter_pipeline_with_seen, FixFocus, FixType, FixTypeSet};
use crate::order::order;

/// Before/after description for one scope.
#[derive(Debug, Clone, Serialize)]
pub struct ScopePlan {
    pub scope: Scope,
    pub original: Vec<String>,
    pub proposed: Vec<String>,
    /// Entries absent from `proposed`, in original order and casing.
    pub removed: Vec<String>,
}

impl ScopePlan {
    pub fn original_count(&self) -> usize {
        self.original.len()
    }

    pub fn proposed_count(&self) -> usize {
        self.proposed.len()
    }

    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    fn joined_length(entries: &[String]) -> usize {
        entries.iter().map(|e| e.len()).sum::<usize>() + entries.len().saturating_sub(1)
    }

    /// Characters saved by the proposed list relative to the original.
    pub fn chars_saved(&self) -> usize {
        Self::joined_length(&self.original).saturating_sub(Self::joined_length(&self.proposed))
    }
}

/// The complete result of one engine run over both scopes.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationPlan {
    pub user: ScopePlan,
    pub system: ScopePlan,
    /// The concrete fix-type set the plan was produced with.
    pub fixes: FixTypeSet,
    pub tools: Vec<ToolDetection>,
}

impl OptimizationPlan {
    pub fn chars_saved(&self) -> usize {
        self.user.chars_saved() + self.system.chars_saved()
    }

    /// True when the plan proposes no change to either scope.
    pub fn is_noop(&self) -> bool {
        self.user.original == self.user.proposed && self.system.original == self.system.proposed
    }
}

/// Builds an optimization plan for both scopes.
///
/// Total for any well-formed input: empty lists produce an empty plan, no
/// entry-level condition aborts the run, and filesystem probe failures only
/// ever exclude entries.
pub fn build_plan(
    user_entries: &[String],
    system_entries: &[String],
    config: &Config,
    focus: FixFocus,
) -> OptimizationPlan {
    let probe = DirectoryProbe::new();
    let fixes = resolve_fix_types(focus);

    let original_user: Vec<PathEntry> = user_entries.iter().map(PathEntry::new).collect();
    let original_system: Vec<PathEntry> = system_entries.iter().map(PathEntry::new).collect();

    // System first: with merged de-duplication, a user entry duplicating a
    // system entry is the one that goes, because resolution consults the
    // system scope first.
    let mut seen = HashSet::new();
    let mut system =
        run_filter_pipeline_with_seen(original_system.clone(), config, &fixes, &probe, &mut seen);
    if config.separate_user_system {
        seen.clear();
    }
    let mut user =
        run_filter_pipeline_with_seen(original_user.clone(), config, &fixes, &probe, &mut seen);

    let ordering_active =
        fixes.contains(&FixType::Ordering) && config.optimize_order && !config.preserve_order;
    if ordering_active {
        system = ensure_critical_paths(system, config, &probe);
    }

    let combined: Vec<PathEntry> = system.iter().chain(user.iter()).cloned().collect();
    let tools = detect_tools(&combined, config, &probe);
    if fixes.contains(&FixType::ToolDuplicates) {
        let losers = tool_duplicate_losers(&tools);
        system.retain(|e| !losers.contains(&e.key));
        user.retain(|e| !losers.contains(&e.key));
    }

    if fixes.contains(&FixType::Ordering) {
        system = order(system, config, Scope::System, &probe);
        user = order(user, config, Scope::User, &probe);
    }

    let user_plan = scope_plan(Scope::User, &original_user, user);
    let system_plan = scope_plan(Scope::System, &original_system, system);

    OptimizationPlan {
        user: user_plan,
        system: system_plan,
        fixes,
        tools,
    }
}

/// Inserts any configured critical path that is missing from the system list
/// and exists on disk, at the front, preserving configured order. Critical
/// paths that do not exist are left alone; inventing dead entries would
/// trade one problem for another.
fn ensure_critical_paths(
    entries: Vec<PathEntry>,
    config: &Config,
    probe: &DirectoryProbe,
) -> Vec<PathEntry> {
    let mut missing: Vec<PathEntry> = Vec::new();
    for critical in &config.critical_paths {
        let needle = critical.to_lowercase();
        let present = entries.iter().any(|e| e.key.contains(&needle));
        if present {
            continue;
        }
        let key = normalized_key(critical);
        if probe.exists(&key, critical) {
            log::debug!("reinstating missing critical path {critical}");
            missing.push(PathEntry::new(critical.as_str()));
        }
    }
    if missing.is_empty() {
        return entries;
    }
    missing.extend(entries);
    missing
}

fn scope_plan(scope: Scope, original: &[PathEntry], proposed: Vec<PathEntry>) -> ScopePlan {
    let removed = diff(original, &proposed)
        .into_iter()
        .map(|e| e.raw)
        .collect();
    ScopePlan {
        scope,
        original: original.iter().map(|e| e.raw.clone()).collect(),
        proposed: proposed.into_iter().map(|e| e.raw).collect(),
        removed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(raws: &[&str]) -> Vec<String> {
        raws.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_input_yields_empty_plan() {
        let config = Config::default();
        let plan = build_plan(&[], &[], &config, FixFocus::All);
        assert!(plan.user.proposed.is_empty());
        assert!(plan.system.proposed.is_empty());
        assert!(plan.is_noop());
        assert_eq!(plan.chars_saved(), 0);
    }

    #[test]
    fn test_duplicates_focus_leaves_ordering_alone() {
        let config = Config::default();
        let user = strings(&["D:\\b", "D:\\a", "D:\\b"]);
        let plan = build_plan(&user, &[], &config, FixFocus::Duplicates);
        // Duplicate dropped, survivors in original order, no scoring pass.
        assert_eq!(plan.user.proposed, strings(&["D:\\b", "D:\\a"]));
        // The diff is key-based: the key "d:\b" survives, so nothing counts
        // as removed even though one occurrence was dropped.
        assert!(plan.user.removed.is_empty());
    }

    #[test]
    fn test_tool_specific_focus_keeps_plain_duplicates() {
        let config = Config::default();
        let user = strings(&["D:\\x", "D:\\x"]);
        let plan = build_plan(&user, &[], &config, FixFocus::ToolSpecific);
        assert_eq!(plan.user.proposed.len(), 2);
    }

    #[test]
    fn test_cross_scope_dedup_when_scopes_merged() {
        let mut raw = crate::config::PathtidyConfig::default();
        raw.behavior.separate_user_system = false;
        let config = raw.compile().unwrap();
        let user = strings(&["C:\\Shared", "D:\\mine"]);
        let system = strings(&["c:\\shared\\"]);
        let plan = build_plan(&user, &system, &config, FixFocus::Duplicates);
        assert_eq!(plan.system.proposed, strings(&["c:\\shared\\"]));
        assert_eq!(plan.user.proposed, strings(&["D:\\mine"]));
        assert_eq!(plan.user.removed, strings(&["C:\\Shared"]));
    }

    #[test]
    fn test_separate_scopes_keep_cross_scope_duplicates() {
        let config = Config::default();
        let user = strings(&["C:\\Shared"]);
        let system = strings(&["c:\\shared"]);
        let plan = build_plan(&user, &system, &config, FixFocus::Duplicates);
        assert_eq!(plan.user.proposed.len(), 1);
        assert_eq!(plan.system.proposed.len(), 1);
    }

    #[test]
    fn test_plan_records_fix_set() {
        let config = Config::default();
        let plan = build_plan(&[], &[], &config, FixFocus::ToolSpecific);
        assert_eq!(
            plan.fixes,
            [FixType::ToolDuplicates, FixType::KnownIssues]
                .into_iter()
                .collect()
        );
    }

    #[test]
    fn test_nonexistent_focus_prunes_dead_entries_only() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().to_string_lossy().to_string();
        let config = Config::default();
        let user = vec![real.clone(), "C:\\definitely\\gone".to_string()];
        let plan = build_plan(&user, &[], &config, FixFocus::NonExistent);
        assert_eq!(plan.user.proposed, vec![real]);
        assert_eq!(plan.user.removed, strings(&["C:\\definitely\\gone"]));
    }

    #[test]
    fn test_chars_saved() {
        let config = Config::default();
        let user = strings(&["D:\\abcd", "D:\\abcd"]);
        let plan = build_plan(&user, &[], &config, FixFocus::Duplicates);
        // "D:\abcd;D:\abcd" (15) down to "D:\abcd" (7).
        assert_eq!(plan.chars_saved(), 8);
    }
}
