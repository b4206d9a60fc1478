//! Results reporting

use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{EvaluationSummary, SolutionCheck};
use crate::exercises::Exercise;

/// JSON export of one scored answer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    pub exercise_id: String,
    pub timestamp: String,
    pub user_input: String,
    pub summary: EvaluationSummary,
}

impl JsonReport {
    pub fn new(exercise: &Exercise, user_input: impl Into<String>, summary: EvaluationSummary) -> Self {
        Self {
            exercise_id: exercise.id.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            user_input: user_input.into(),
            summary,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write to JSON file
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }
}

/// Render a scored answer for the terminal
pub fn render_console_report(exercise: &Exercise, summary: &EvaluationSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== Evaluation: {} ===\n", exercise.display_name());

    if summary.total_criteria == 0 {
        let _ = writeln!(out, "Nothing to evaluate.");
    } else {
        let _ = writeln!(
            out,
            "Overall Score: {:.1} ({}/{} criteria passed)\n",
            summary.overall_score, summary.passed_criteria, summary.total_criteria
        );
        let _ = writeln!(out, "Criteria:");
        let _ = writeln!(out, "{:-<60}", "");

        for (criterion, result) in &summary.results {
            let badge = if result.passed { "PASS" } else { "FAIL" };
            let _ = writeln!(out, "  [{}] {:>5.1}  {}", badge, result.score, criterion);
            let _ = writeln!(out, "         {}", result.feedback);
            if !result.matched_keywords.is_empty() {
                let matched: Vec<_> = result.matched_keywords.iter().map(String::as_str).collect();
                let _ = writeln!(out, "         matched: {}", matched.join(", "));
            }
            if !result.missing_keywords.is_empty() {
                let missing: Vec<_> = result.missing_keywords.iter().map(String::as_str).collect();
                let _ = writeln!(out, "         missing: {}", missing.join(", "));
            }
        }
    }

    if !summary.suggestions.is_empty() {
        let _ = writeln!(out, "\nSuggestions:");
        let _ = writeln!(out, "{:-<60}", "");
        for suggestion in &summary.suggestions {
            let _ = writeln!(out, "  - {}", suggestion);
        }
    }

    let _ = writeln!(out, "\n{:=<60}", "");
    out
}

/// Generate a console report
pub fn print_console_report(exercise: &Exercise, summary: &EvaluationSummary) {
    print!("{}", render_console_report(exercise, summary));
}

/// Render solution self-check results, one block per exercise
pub fn render_validation_report(checks: &[(&Exercise, SolutionCheck)]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n=== Solution Self-Check ===\n");

    let valid = checks.iter().filter(|(_, c)| c.is_valid).count();
    for (exercise, check) in checks {
        let badge = if check.is_valid { "OK" } else { "INVALID" };
        let _ = writeln!(
            out,
            "  [{}] {} - {:.1}",
            badge,
            exercise.id,
            check.score
        );
        for issue in &check.issues {
            let _ = writeln!(out, "         {}", issue);
        }
    }

    let _ = writeln!(out, "\n{}/{} exercises valid", valid, checks.len());
    out
}
