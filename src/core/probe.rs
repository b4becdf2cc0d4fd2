use glob::Pattern;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// File extensions that count as "executable-like" when scoring a directory.
const EXECUTABLE_EXTENSIONS: &[&str] = &["exe", "bat", "cmd", "com", "ps1", "msc"];

/// Direct-child file names of a directory, lower-cased for case-insensitive
/// matching. Subdirectories are not recorded; tool detection and executable
/// counting only ever look at direct child files.
#[derive(Debug, Clone, Default)]
pub struct DirListing {
    files: Vec<String>,
}

impl DirListing {
    pub fn executable_count(&self) -> usize {
        self.files
            .iter()
            .filter(|name| {
                name.rsplit_once('.')
                    .is_some_and(|(_, ext)| EXECUTABLE_EXTENSIONS.contains(&ext))
            })
            .count()
    }

    pub fn matching_files(&self, patterns: &[Pattern]) -> Vec<String> {
        self.files
            .iter()
            .filter(|name| patterns.iter().any(|p| p.matches(name)))
            .cloned()
            .collect()
    }
}

/// Memoized directory-contents lookup shared by classification, scoring and
/// tool detection within a single run.
///
/// Every filesystem question (existence, executable count, pattern matches)
/// goes through one `read_dir` per normalized key. Probe failures of any kind
/// (missing path, access denied, invalid characters) are treated as
/// non-existence and never propagated.
#[derive(Debug, Default)]
pub struct DirectoryProbe {
    cache: RefCell<HashMap<String, Option<DirListing>>>,
}

impl DirectoryProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the path exists as a readable directory. Fail-open: any probe
    /// error reads as "does not exist".
    pub fn exists(&self, key: &str, probe_path: &str) -> bool {
        self.with_listing(key, probe_path, |listing| listing.is_some())
    }

    /// Number of executable-like direct children, zero for missing paths.
    pub fn executable_count(&self, key: &str, probe_path: &str) -> usize {
        self.with_listing(key, probe_path, |listing| {
            listing.map(DirListing::executable_count).unwrap_or(0)
        })
    }

    /// Whether any direct child file matches one of the given name patterns.
    pub fn has_matching_file(&self, key: &str, probe_path: &str, patterns: &[Pattern]) -> bool {
        !self.matching_files(key, probe_path, patterns).is_empty()
    }

    /// Direct child files matching any of the given name patterns.
    pub fn matching_files(&self, key: &str, probe_path: &str, patterns: &[Pattern]) -> Vec<String> {
        self.with_listing(key, probe_path, |listing| {
            listing
                .map(|l| l.matching_files(patterns))
                .unwrap_or_default()
        })
    }

    fn with_listing<R>(
        &self,
        key: &str,
        probe_path: &str,
        f: impl FnOnce(Option<&DirListing>) -> R,
    ) -> R {
        let mut cache = self.cache.borrow_mut();
        let listing = cache
            .entry(key.to_string())
            .or_insert_with(|| read_listing(probe_path));
        f(listing.as_ref())
    }
}

fn read_listing(probe_path: &str) -> Option<DirListing> {
    if probe_path.is_empty() {
        return None;
    }
    let dir = fs::read_dir(Path::new(probe_path)).ok()?;
    let mut files = Vec::new();
    for dent in dir.flatten() {
        let is_file = dent.file_type().map(|t| t.is_file()).unwrap_or(false);
        if is_file {
            files.push(dent.file_name().to_string_lossy().to_lowercase());
        }
    }
    Some(DirListing { files })
}
