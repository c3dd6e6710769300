//! Markdown report generator
//!
//! Generates GPA reports as plain Markdown tables. These render well in
//! GitHub, GitLab, and VS Code.

use crate::core::models::Semester;
use crate::core::report::{fill_template, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        fill_template(MARKDOWN_TEMPLATE, |name| {
            let text = match name {
                "title" => ctx.title.clone(),
                "cgpa" => ctx.cgpa_display(),
                "counted_credits" => format!("{:.1}", ctx.counted_credits()),
                "semester_count" => ctx.history().len().to_string(),
                "selected_label" => ctx.selected_label(),
                "selected_sgpa" => ctx.selected_sgpa_display(),
                "selected_percentage" => ctx.selected_percentage_display(),
                "selected_band" => ctx.selected_band().message().to_string(),
                "course_table" => ctx.selected().map_or_else(
                    || "_No semester selected._\n".to_string(),
                    Self::course_table,
                ),
                "history_table" => Self::history_table(ctx),
                _ => return None,
            };
            Some(text)
        })
    }

    /// Course table of one semester
    fn course_table(semester: &Semester) -> String {
        if semester.is_manual() {
            return format!(
                "_SGPA entered manually over {:.1} credits._\n",
                semester.total_credits()
            );
        }
        if semester.courses().is_empty() {
            return "_No courses._\n".to_string();
        }

        let mut table = String::new();
        table.push_str("| # | Course | Credits | Grade | Points |\n");
        table.push_str("|---|---|---|---|---|\n");
        for (i, course) in semester.courses().iter().enumerate() {
            let _ = writeln!(
                table,
                "| {} | {} | {:.1} | {} | {} |",
                i + 1,
                course.name.replace('|', "\\|"),
                course.credits,
                course.letter_grade(),
                course.grade_point
            );
        }
        let _ = writeln!(
            table,
            "| | **Total** | **{:.1}** | | |",
            semester.total_credits()
        );
        table
    }

    /// CGPA history table
    fn history_table(ctx: &ReportContext) -> String {
        let history = ctx.history();
        if history.is_empty() {
            return "_No semesters with grades yet._\n".to_string();
        }

        let mut table = String::new();
        table.push_str("| Semester | Credits | SGPA | Type |\n");
        table.push_str("|---|---|---|---|\n");
        for entry in &history {
            let _ = writeln!(
                table,
                "| {} | {:.1} | {:.2} | {} |",
                entry.key.label(),
                entry.total_credits,
                entry.sgpa,
                entry.entry_type()
            );
        }
        table
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}
