//! Priority ordering of surviving entries.
//!
//! The user scope is a plain score-descending sort. The system scope first
//! pins the best match for each configured critical path, in configured
//! order, then appends the rest by score. Ties always keep original relative
//! order so runs are reproducible.

use crate::analysis::score_entries;
use crate::config::Config;
use crate::core::{DirectoryProbe, PathEntry, Scope};

/// Orders a scope's surviving entries by priority. Passes the list through
/// untouched when ordering is disabled by configuration.
pub fn order(
    entries: Vec<PathEntry>,
    config: &Config,
    scope: Scope,
    probe: &DirectoryProbe,
) -> Vec<PathEntry> {
    if config.preserve_order || !config.optimize_order {
        return entries;
    }
    let mut entries = entries;
    score_entries(&mut entries, config, probe);
    match scope {
        Scope::System => order_system(entries, config),
        Scope::User => sort_by_score(entries),
    }
}

/// Stable score-descending sort. `sort_by` is stable, so equal scores keep
/// their original relative order.
fn sort_by_score(mut entries: Vec<PathEntry>) -> Vec<PathEntry> {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}

fn order_system(entries: Vec<PathEntry>, config: &Config) -> Vec<PathEntry> {
    let mut pinned: Vec<usize> = Vec::new();
    for critical in &config.critical_paths {
        let needle = critical.to_lowercase();
        let best = entries
            .iter()
            .enumerate()
            .filter(|(i, e)| !pinned.contains(i) && e.key.contains(&needle))
            // Strictly-greater keeps the earliest candidate on score ties.
            .fold(None::<(usize, i64)>, |best, (i, e)| match best {
                Some((_, s)) if e.score <= s => best,
                _ => Some((i, e.score)),
            });
        if let Some((i, _)) = best {
            pinned.push(i);
        }
    }

    let rest: Vec<PathEntry> = entries
        .iter()
        .enumerate()
        .filter(|(i, _)| !pinned.contains(i))
        .map(|(_, e)| e.clone())
        .collect();

    let mut out: Vec<PathEntry> = pinned.iter().map(|&i| entries[i].clone()).collect();
    out.extend(sort_by_score(rest));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn raws(entries: &[PathEntry]) -> Vec<String> {
        entries.iter().map(|e| e.raw.clone()).collect()
    }

    fn entries(raws: &[&str]) -> Vec<PathEntry> {
        raws.iter().map(|r| PathEntry::new(*r)).collect()
    }

    #[test]
    fn test_disabled_ordering_passes_through() {
        let mut config = Config::default();
        config.preserve_order = true;
        let probe = DirectoryProbe::new();
        let input = entries(&["D:\\low", "C:\\Windows\\system32"]);
        let out = order(input.clone(), &config, Scope::System, &probe);
        assert_eq!(raws(&out), raws(&input));
    }

    #[test]
    fn test_system_scope_pins_critical_paths_in_configured_order() {
        let config = Config::default();
        let probe = DirectoryProbe::new();
        // Input order deliberately reversed relative to the critical list.
        let out = order(
            entries(&["D:\\tools", "C:\\Windows", "C:\\Windows\\system32"]),
            &config,
            Scope::System,
            &probe,
        );
        assert_eq!(raws(&out)[0], "C:\\Windows\\system32");
        assert_eq!(raws(&out)[1], "C:\\Windows");
    }

    #[test]
    fn test_system_scope_skips_unmatched_critical_substrings() {
        let config = Config::default();
        let probe = DirectoryProbe::new();
        let out = order(
            entries(&["D:\\tools", "C:\\Windows"]),
            &config,
            Scope::System,
            &probe,
        );
        assert_eq!(raws(&out)[0], "C:\\Windows");
    }

    #[test]
    fn test_user_scope_sorts_by_score_descending() {
        let config = Config::default();
        let probe = DirectoryProbe::new();
        // PowerShell (90) outranks Languages (50) outranks Unknown (10).
        let out = order(
            entries(&["D:\\misc", "D:\\Python311", "C:\\Program Files\\PowerShell\\7"]),
            &config,
            Scope::User,
            &probe,
        );
        assert_eq!(
            raws(&out),
            vec!["C:\\Program Files\\PowerShell\\7", "D:\\Python311", "D:\\misc"]
        );
    }

    #[test]
    fn test_equal_scores_keep_original_relative_order() {
        let config = Config::default();
        let probe = DirectoryProbe::new();
        let out = order(
            entries(&["D:\\first", "D:\\second", "D:\\third"]),
            &config,
            Scope::User,
            &probe,
        );
        assert_eq!(raws(&out), vec!["D:\\first", "D:\\second", "D:\\third"]);
    }

    #[test]
    fn test_user_scope_ignores_critical_pinning() {
        let config = Config::default();
        let probe = DirectoryProbe::new();
        // A critical match in the user scope is still just sorted by score,
        // which here puts it first anyway through the critical bonus.
        let out = order(
            entries(&["D:\\misc", "C:\\Windows\\system32"]),
            &config,
            Scope::User,
            &probe,
        );
        assert_eq!(raws(&out)[0], "C:\\Windows\\system32");
    }
}
