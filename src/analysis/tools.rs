use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use super::classifier::classify;
use super::scorer::{score, LTS_MARKER};
use crate::config::Config;
use crate::core::{DirectoryProbe, PathEntry};

/// First embedded dotted version in the raw entry text, e.g. the `3.11` in
/// `C:\Python\3.11\Scripts`.
static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+(\.\d+)+").expect("valid version pattern"));

/// One path that provides a detected tool, with everything the tie-break
/// chain needs precomputed.
#[derive(Debug, Clone, Serialize)]
pub struct ToolProvider {
    pub path: String,
    pub key: String,
    pub matched: Vec<String>,
    pub score: i64,
    pub lts: bool,
    pub version: Option<String>,
}

/// Detection result for one configured tool across all candidate paths.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDetection {
    pub tool: String,
    pub detected: bool,
    /// Normalized key of the provider that wins the tie-break, when any
    /// provider exists.
    pub kept: Option<String>,
    pub providers: Vec<ToolProvider>,
}

/// Scans every candidate path for every configured tool.
///
/// A path is a provider for a tool when at least one of the tool's
/// executable-name globs matches a direct child file. Providers are listed in
/// candidate order; a duplicated normalized key only counts once.
pub fn detect_tools(
    entries: &[PathEntry],
    config: &Config,
    probe: &DirectoryProbe,
) -> Vec<ToolDetection> {
    config
        .tools
        .iter()
        .map(|tool| {
            let mut seen = HashSet::new();
            let providers: Vec<ToolProvider> = entries
                .iter()
                .filter(|entry| seen.insert(entry.key.clone()))
                .filter_map(|entry| {
                    let matched =
                        probe.matching_files(&entry.key, entry.probe_path(), &tool.patterns);
                    if matched.is_empty() {
                        return None;
                    }
                    let category = classify(entry, config, probe);
                    Some(ToolProvider {
                        path: entry.raw.clone(),
                        key: entry.key.clone(),
                        score: score(entry, category, config, probe),
                        lts: LTS_MARKER.is_match(&entry.raw),
                        version: VERSION_RE
                            .find(&entry.raw)
                            .map(|m| m.as_str().to_string()),
                        matched,
                    })
                })
                .collect();

            let kept = pick_winner(&providers).map(|p| p.key.clone());
            ToolDetection {
                tool: tool.name.clone(),
                detected: !providers.is_empty(),
                kept,
                providers,
            }
        })
        .collect()
}

/// Tie-break chain for competing providers of the same tool, strongest
/// difference first: LTS marker, priority score, embedded version text,
/// matched-executable count. Equal on all four keeps the earlier provider.
///
/// Versions compare as plain strings, matching the behavior this replaces:
/// "2.10" sorts before "2.9". Kept deliberately for compatibility.
fn provider_rank(a: &ToolProvider, b: &ToolProvider) -> Ordering {
    a.lts
        .cmp(&b.lts)
        .then_with(|| a.score.cmp(&b.score))
        .then_with(|| {
            a.version
                .as_deref()
                .unwrap_or("")
                .cmp(b.version.as_deref().unwrap_or(""))
        })
        .then_with(|| a.matched.len().cmp(&b.matched.len()))
}

fn pick_winner(providers: &[ToolProvider]) -> Option<&ToolProvider> {
    let mut best: Option<&ToolProvider> = None;
    for candidate in providers {
        match best {
            // Strict improvement only, so the first provider wins full ties.
            Some(current) if provider_rank(candidate, current) != Ordering::Greater => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// Normalized keys of paths that provide at least one tool but win for none.
/// Only these may be removed; a path that loses for one tool while winning
/// another is retained.
pub fn tool_duplicate_losers(detections: &[ToolDetection]) -> HashSet<String> {
    let mut won_any: HashMap<String, bool> = HashMap::new();
    for detection in detections {
        for provider in &detection.providers {
            let won = detection.kept.as_deref() == Some(provider.key.as_str());
            let slot = won_any.entry(provider.key.clone()).or_insert(false);
            *slot |= won;
        }
    }
    won_any
        .into_iter()
        .filter_map(|(key, won)| (!won).then_some(key))
        .collect()
}

/// Removes duplicate tool providers from a single candidate list, returning
/// the survivors together with the per-tool detection results.
pub fn resolve_tool_duplicates(
    entries: Vec<PathEntry>,
    config: &Config,
    probe: &DirectoryProbe,
) -> (Vec<PathEntry>, Vec<ToolDetection>) {
    let detections = detect_tools(&entries, config, probe);
    let losers = tool_duplicate_losers(&detections);
    let survivors = entries
        .into_iter()
        .filter(|entry| !losers.contains(&entry.key))
        .collect();
    (survivors, detections)
}
