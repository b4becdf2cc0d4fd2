use once_cell::sync::Lazy;
use regex::Regex;

use super::classifier::{classify, critical_index};
use crate::config::Config;
use crate::core::{Category, DirectoryProbe, PathEntry};

/// Marker for long-term-support or otherwise pinned tool installs. Matched
/// case-insensitively against the raw entry text.
pub static LTS_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)lts|stable|release").expect("valid lts marker pattern"));

const EXECUTABLE_BONUS_PER_FILE: i64 = 5;
const EXECUTABLE_BONUS_CAP: i64 = 50;
const CRITICAL_BONUS_BASE: i64 = 100;
const CRITICAL_BONUS_STEP: i64 = 10;
const LTS_BONUS: i64 = 25;

/// Computes the priority score for a path given its category.
///
/// `base + executable bonus + critical bonus + LTS bonus`, where the
/// executable bonus is 5 per executable-like direct child capped at 50, the
/// critical bonus decays from 100 by 10 per critical-list index (WindowsSystem
/// entries only), and the LTS bonus is a flat 25 for entries whose text names
/// an LTS/stable/release install. Deterministic for a fixed filesystem state.
pub fn score(
    entry: &PathEntry,
    category: Category,
    config: &Config,
    probe: &DirectoryProbe,
) -> i64 {
    let base = config.base_priority(category);
    let executable_bonus = if probe.exists(&entry.key, entry.probe_path()) {
        (EXECUTABLE_BONUS_PER_FILE * probe.executable_count(&entry.key, entry.probe_path()) as i64)
            .min(EXECUTABLE_BONUS_CAP)
    } else {
        0
    };
    let critical_bonus = if category == Category::WindowsSystem {
        critical_index(&entry.key, config)
            .map(|i| (CRITICAL_BONUS_BASE - CRITICAL_BONUS_STEP * i as i64).max(0))
            .unwrap_or(0)
    } else {
        0
    };
    let lts_bonus = if LTS_MARKER.is_match(&entry.raw) {
        LTS_BONUS
    } else {
        0
    };

    base + executable_bonus + critical_bonus + lts_bonus
}

/// Classifies and scores every entry in place. The single pass that is
/// allowed to write `category` and `score`.
pub fn score_entries(entries: &mut [PathEntry], config: &Config, probe: &DirectoryProbe) {
    for entry in entries.iter_mut() {
        entry.category = classify(entry, config, probe);
        entry.score = score(entry, entry.category, config, probe);
    }
}
