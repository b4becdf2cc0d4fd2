use chrono::Utc;
use colored::*;
use serde_json::json;
use std::io::Write;

use crate::plan::OptimizationPlan;
use crate::validate::{PathIssue, ValidationReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

pub trait OutputWriter {
    fn write_plan(&mut self, plan: &OptimizationPlan) -> anyhow::Result<()>;
    fn write_report(&mut self, report: &ValidationReport) -> anyhow::Result<()>;
}

pub fn create_writer(format: OutputFormat, out: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(out)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(out)),
    }
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_plan(&mut self, plan: &OptimizationPlan) -> anyhow::Result<()> {
        let envelope = json!({
            "generated_at": Utc::now().to_rfc3339(),
            "chars_saved": plan.chars_saved(),
            "plan": plan,
        });
        serde_json::to_writer_pretty(&mut self.writer, &envelope)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_report(&mut self, report: &ValidationReport) -> anyhow::Result<()> {
        let envelope = json!({
            "generated_at": Utc::now().to_rfc3339(),
            "report": report,
        });
        serde_json::to_writer_pretty(&mut self.writer, &envelope)?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_scope_plan(
        &mut self,
        plan: &crate::plan::ScopePlan,
    ) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{}",
            format!("[{} scope]", plan.scope).bold()
        )?;
        writeln!(
            self.writer,
            "  {} entries -> {} entries ({} removed)",
            plan.original_count(),
            plan.proposed_count(),
            plan.removed_count(),
        )?;
        for removed in &plan.removed {
            writeln!(self.writer, "  {} {}", "-".red(), removed.red())?;
        }
        for (i, entry) in plan.proposed.iter().enumerate() {
            writeln!(self.writer, "  {:>3}. {}", i + 1, entry)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_plan(&mut self, plan: &OptimizationPlan) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "PATH Optimization Plan".bold().underline())?;
        writeln!(self.writer)?;
        self.write_scope_plan(&plan.system)?;
        self.write_scope_plan(&plan.user)?;

        let detected: Vec<_> = plan.tools.iter().filter(|t| t.detected).collect();
        if !detected.is_empty() {
            writeln!(self.writer, "{}", "Detected tools".bold())?;
            for tool in detected {
                let providers = tool.providers.len();
                let marker = if providers > 1 {
                    format!("{} providers, keeping one", providers).yellow()
                } else {
                    "ok".green()
                };
                writeln!(self.writer, "  {:<10} {}", tool.tool, marker)?;
            }
            writeln!(self.writer)?;
        }

        if plan.is_noop() {
            writeln!(self.writer, "{}", "Nothing to change.".green())?;
        } else {
            writeln!(
                self.writer,
                "Estimated savings: {} characters",
                plan.chars_saved().to_string().green()
            )?;
        }
        Ok(())
    }

    fn write_report(&mut self, report: &ValidationReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "PATH Validation Report".bold().underline())?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "  {} valid, {} invalid of {} entries",
            report.valid_count.to_string().green(),
            report.invalid_count.to_string().red(),
            report.entries.len()
        )?;
        for (issue, count) in &report.issue_counts {
            writeln!(self.writer, "  {:<16} {}", issue_label(*issue), count)?;
        }
        writeln!(self.writer)?;
        for entry in report.entries.iter().filter(|e| !e.issues.is_empty()) {
            let tags: Vec<&str> = entry.issues.iter().map(|i| issue_label(*i)).collect();
            let line = format!("  {} [{}]", display_raw(&entry.raw), tags.join(", "));
            if entry.is_valid() {
                writeln!(self.writer, "{}", line.yellow())?;
            } else {
                writeln!(self.writer, "{}", line.red())?;
            }
        }
        writeln!(
            self.writer,
            "\n  Combined length: {} characters{}",
            report.total_length,
            if report.exceeds_limit {
                " (exceeds limit)".red().to_string()
            } else {
                String::new()
            }
        )?;
        Ok(())
    }
}

fn issue_label(issue: PathIssue) -> &'static str {
    match issue {
        PathIssue::Empty => "empty",
        PathIssue::Malformed => "malformed",
        PathIssue::NonExistent => "non-existent",
        PathIssue::Quoted => "quoted",
        PathIssue::SpacesUnquoted => "unquoted-spaces",
        PathIssue::TooLong => "too-long",
    }
}

fn display_raw(raw: &str) -> &str {
    if raw.trim().is_empty() {
        "<empty>"
    } else {
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::DirectoryProbe;
    use crate::filter::FixFocus;
    use crate::plan::build_plan;
    use crate::validate::validate_scopes;

    fn plan_fixture() -> OptimizationPlan {
        let config = Config::default();
        let user = vec!["D:\\a".to_string(), "D:\\a".to_string()];
        build_plan(&user, &[], &config, FixFocus::Duplicates)
    }

    #[test]
    fn test_json_plan_is_valid_json() {
        let mut buf = Vec::new();
        {
            let mut writer = JsonWriter::new(&mut buf);
            writer.write_plan(&plan_fixture()).unwrap();
        }
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["plan"]["user"]["proposed"][0], "D:\\a");
        assert!(value["generated_at"].is_string());
    }

    #[test]
    fn test_json_report_round_trips() {
        let config = Config::default();
        let probe = DirectoryProbe::new();
        let report = validate_scopes(&["".to_string()], &[], &config, &probe);
        let mut buf = Vec::new();
        {
            let mut writer = JsonWriter::new(&mut buf);
            writer.write_report(&report).unwrap();
        }
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["report"]["invalid_count"], 1);
    }

    #[test]
    fn test_terminal_plan_mentions_counts() {
        let mut buf = Vec::new();
        {
            let mut writer = TerminalWriter::new(&mut buf);
            writer.write_plan(&plan_fixture()).unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("2 entries -> 1 entries"));
    }

    #[test]
    fn test_terminal_report_flags_empty_entry() {
        let config = Config::default();
        let probe = DirectoryProbe::new();
        let report = validate_scopes(&["".to_string()], &[], &config, &probe);
        let mut buf = Vec::new();
        {
            let mut writer = TerminalWriter::new(&mut buf);
            writer.write_report(&report).unwrap();
        }
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("<empty>"));
        assert!(text.contains("empty"));
    }
}
