//! Pure set comparison between an original list and its proposed
//! replacement.

use std::collections::HashSet;

use crate::core::PathEntry;

/// Every entry from `original` whose normalized key does not appear in
/// `new`, in original order and original casing.
pub fn diff(original: &[PathEntry], new: &[PathEntry]) -> Vec<PathEntry> {
    let kept: HashSet<&str> = new.iter().map(|e| e.key.as_str()).collect();
    original
        .iter()
        .filter(|e| !kept.contains(e.key.as_str()))
        .cloned()
        .collect()
}
