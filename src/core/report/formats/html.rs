//! HTML report generator
//!
//! The generated HTML is self-contained with embedded CSS.

use crate::core::models::Semester;
use crate::core::report::{fill_template, ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded HTML report template
const HTML_TEMPLATE: &str = include_str!("../templates/report.html");

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    #[allow(clippy::unused_self)]
    fn render_template(&self, ctx: &ReportContext) -> String {
        fill_template(HTML_TEMPLATE, |name| {
            let text = match name {
                "title" => escape(&ctx.title),
                "cgpa" => ctx.cgpa_display(),
                "counted_credits" => format!("{:.1}", ctx.counted_credits()),
                "semester_count" => ctx.history().len().to_string(),
                "selected_label" => ctx.selected_label(),
                "selected_sgpa" => ctx.selected_sgpa_display(),
                "selected_percentage" => ctx.selected_percentage_display(),
                "selected_band" => escape(ctx.selected_band().message()),
                "course_table" => ctx.selected().map_or_else(
                    || "<p class=\"empty\">No semester selected.</p>".to_string(),
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
                "<p class=\"manual\">SGPA entered manually over {:.1} credits.</p>",
                semester.total_credits()
            );
        }
        if semester.courses().is_empty() {
            return "<p class=\"empty\">No courses.</p>".to_string();
        }

        let mut html = String::new();
        let _ = writeln!(html, "<table>");
        let _ = writeln!(
            html,
            "  <tr><th>#</th><th>Course</th><th>Credits</th><th>Grade</th><th>Points</th></tr>"
        );
        for (i, course) in semester.courses().iter().enumerate() {
            let _ = writeln!(
                html,
                "  <tr><td>{}</td><td>{}</td><td class=\"num\">{:.1}</td><td>{}</td><td class=\"num\">{}</td></tr>",
                i + 1,
                escape(&course.name),
                course.credits,
                course.letter_grade(),
                course.grade_point
            );
        }
        let _ = writeln!(
            html,
            "  <tr><th></th><th>Total</th><th class=\"num\">{:.1}</th><th></th><th></th></tr>",
            semester.total_credits()
        );
        let _ = writeln!(html, "</table>");
        html
    }

    /// CGPA history table
    fn history_table(ctx: &ReportContext) -> String {
        let history = ctx.history();
        if history.is_empty() {
            return "<p class=\"empty\">No semesters with grades yet.</p>".to_string();
        }

        let mut html = String::new();
        let _ = writeln!(html, "<table>");
        let _ = writeln!(
            html,
            "  <tr><th>Semester</th><th>Credits</th><th>SGPA</th><th>Type</th></tr>"
        );
        for entry in &history {
            let class = if entry.is_manual { " class=\"manual\"" } else { "" };
            let _ = writeln!(
                html,
                "  <tr{class}><td>{}</td><td class=\"num\">{:.1}</td><td class=\"num\">{:.2}</td><td>{}</td></tr>",
                entry.key.label(),
                entry.total_credits,
                entry.sgpa,
                entry.entry_type()
            );
        }
        let _ = writeln!(html, "</table>");
        html
    }
}

/// Escape text for HTML element content
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(self.render_template(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("R&D <lab>"), "R&amp;D &lt;lab&gt;");
        assert_eq!(escape("plain"), "plain");
    }
}
