use anyhow::Result;
use std::path::PathBuf;

use crate::config::CONFIG_FILE_NAME;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let default_config = r#"# Pathtidy Configuration

# Substrings pinned to the front of the system scope, in priority order.
# Entries matching one of these are never removed.
critical_paths = [
    "C:\\Windows\\system32",
    "C:\\Windows",
    "C:\\Windows\\System32\\Wbem",
    "C:\\Windows\\System32\\WindowsPowerShell\\v1.0",
]

# Regexes (case-insensitive) for transient directories to drop outright.
ignore_patterns = [
    "\\\\Temp\\\\",
    "\\\\AppData\\\\Local\\\\Temp",
]

max_path_length = 8191

[behavior]
remove_empty_paths = true
remove_duplicates = true
remove_nonexistent = true
preserve_order = false
optimize_order = true
separate_user_system = true

# Executable-name globs per tool, matched against direct child files.
[tools]
git = ["git.exe"]
node = ["node.exe", "npm.cmd"]
python = ["python.exe", "python*.exe"]

# Named regexes for path shapes with a diagnosed problem.
[known_issues]
msys-shell-duplicates = "\\\\(msys64|mingw(32|64)|cygwin(64)?)\\\\"
nested-node-modules = "\\\\node_modules\\\\"

# Base priority per category.
[priorities]
WindowsSystem = 100
PowerShell = 90
ProgramFiles = 80
WindowsApps = 70
DevTools = 60
Languages = 50
LocalApps = 40
Unknown = 10
"#;

    std::fs::write(&config_path, default_config)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[test]
    fn test_template_parses_and_compiles() {
        // A reduced config in the same shape the init template writes.
        let template = r#"
critical_paths = ["C:\\Windows\\system32"]
ignore_patterns = ["\\\\Temp\\\\"]
max_path_length = 8191

[behavior]
preserve_order = false

[tools]
git = ["git.exe"]

[known_issues]
nested-node-modules = "\\\\node_modules\\\\"

[priorities]
WindowsSystem = 100
"#;
        let schema = parse_config(template).unwrap();
        let config = schema.compile().unwrap();
        assert_eq!(config.max_path_length, 8191);
        assert!(config.known_issues[0].pattern.is_match("C:\\p\\node_modules\\.bin"));
    }
}
