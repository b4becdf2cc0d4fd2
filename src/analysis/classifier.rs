use crate::config::Config;
use crate::core::{Category, DirectoryProbe, PathEntry};

/// Language-runtime marker substrings checked by the Languages rule.
const LANGUAGE_MARKERS: &[&str] = &["python", "java", "ruby", "go", "node"];

const PROGRAM_FILES_ROOT: &str = "c:\\program files";
const LOCAL_APP_DATA_ROOT: &str = "appdata\\local";

/// The classification decision table. Rules are evaluated in this fixed
/// order; the first rule that fires decides the category.
const RULES: &[(
    fn(&PathEntry, &Config, &DirectoryProbe) -> bool,
    Category,
)] = &[
    (is_critical, Category::WindowsSystem),
    (is_powershell, Category::PowerShell),
    (is_program_files, Category::ProgramFiles),
    (is_windows_apps, Category::WindowsApps),
    (is_dev_tools, Category::DevTools),
    (is_language_runtime, Category::Languages),
    (is_local_apps, Category::LocalApps),
];

/// Assigns a category to a single path entry, first match wins.
///
/// Matching is done against the normalized (lower-cased) key, so it is
/// case-insensitive like Windows path resolution. Only the DevTools rule
/// touches the filesystem, and that goes through the shared memoized probe.
pub fn classify(entry: &PathEntry, config: &Config, probe: &DirectoryProbe) -> Category {
    RULES
        .iter()
        .find(|(rule, _)| rule(entry, config, probe))
        .map(|(_, category)| *category)
        .unwrap_or(Category::Unknown)
}

/// Index of the first critical-path substring contained in the key, if any.
/// The index doubles as the pin order and the critical-bonus magnitude.
pub fn critical_index(key: &str, config: &Config) -> Option<usize> {
    config
        .critical_paths
        .iter()
        .position(|critical| key.contains(&critical.to_lowercase()))
}

fn is_critical(entry: &PathEntry, config: &Config, _probe: &DirectoryProbe) -> bool {
    critical_index(&entry.key, config).is_some()
}

fn is_powershell(entry: &PathEntry, _config: &Config, _probe: &DirectoryProbe) -> bool {
    entry.key.contains("powershell")
}

fn is_program_files(entry: &PathEntry, _config: &Config, _probe: &DirectoryProbe) -> bool {
    entry.key.starts_with(PROGRAM_FILES_ROOT)
}

fn is_windows_apps(entry: &PathEntry, _config: &Config, _probe: &DirectoryProbe) -> bool {
    entry.key.contains("windowsapps")
}

fn is_dev_tools(entry: &PathEntry, config: &Config, probe: &DirectoryProbe) -> bool {
    config
        .tools
        .iter()
        .any(|tool| probe.has_matching_file(&entry.key, entry.probe_path(), &tool.patterns))
}

fn is_language_runtime(entry: &PathEntry, _config: &Config, _probe: &DirectoryProbe) -> bool {
    LANGUAGE_MARKERS
        .iter()
        .any(|marker| entry.key.contains(marker))
}

fn is_local_apps(entry: &PathEntry, _config: &Config, _probe: &DirectoryProbe) -> bool {
    entry.key.contains(LOCAL_APP_DATA_ROOT)
}
