//! Report generation module for GPA summaries
//!
//! Renders the overall CGPA, the selected semester and the CGPA history in
//! Markdown or HTML from embedded templates.

pub mod formats;

use crate::core::gpa::{format_gpa, percentage, PerformanceBand};
use crate::core::models::Semester;
use crate::core::session::{HistoryEntry, Session};
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, MarkdownReporter, ReportFormat};

/// Default report title
pub const DEFAULT_TITLE: &str = "GPA Report";

/// Data context for report generation
///
/// Everything a template needs is derived from the borrowed session on demand.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Session being reported
    pub session: &'a Session,
    /// Document title
    pub title: String,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context with the default title
    #[must_use]
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            title: DEFAULT_TITLE.to_string(),
        }
    }

    /// Replace the document title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Overall CGPA, `N/A` if undefined
    #[must_use]
    pub fn cgpa_display(&self) -> String {
        format_gpa(self.session.cgpa())
    }

    /// Credits counted towards the CGPA
    #[must_use]
    pub fn counted_credits(&self) -> f64 {
        self.session.counted_credits()
    }

    /// Selected semester, if any has a record
    #[must_use]
    pub fn selected(&self) -> Option<&'a Semester> {
        self.session.selected_semester()
    }

    /// Human label of the selected semester
    #[must_use]
    pub fn selected_label(&self) -> String {
        self.session
            .selected()
            .map_or_else(|| "None".to_string(), |k| k.label())
    }

    /// SGPA of the selected semester, `N/A` if undefined
    #[must_use]
    pub fn selected_sgpa_display(&self) -> String {
        format_gpa(self.session.current_sgpa())
    }

    /// Percentage of the selected semester, `N/A` if undefined
    #[must_use]
    pub fn selected_percentage_display(&self) -> String {
        self.session
            .current_sgpa()
            .map_or_else(|| "N/A".to_string(), |s| format!("{:.1}%", percentage(s)))
    }

    /// Performance band of the selected semester
    #[must_use]
    pub fn selected_band(&self) -> PerformanceBand {
        PerformanceBand::from_sgpa(self.session.current_sgpa())
    }

    /// Rows of the CGPA history
    #[must_use]
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.session.history()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

/// Fill `{{name}}` placeholders in `template` in a single left-to-right pass.
///
/// Substituted text is never scanned again, so braces in titles or course
/// names come out literally. Placeholders `value` does not know are kept.
pub(crate) fn fill_template(template: &str, value: impl Fn(&str) -> Option<String>) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let filled = after
            .find("}}")
            .and_then(|end| value(&after[..end]).map(|text| (end, text)));
        match filled {
            Some((end, text)) => {
                output.push_str(&text);
                rest = &after[end + 2..];
            }
            None => {
                output.push_str("{{");
                rest = after;
            }
        }
    }
    output.push_str(rest);
    output
}

/// Reporter for `format`
#[must_use]
pub fn reporter_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(name: &str) -> Option<String> {
        match name {
            "a" => Some("{{b}}".to_string()),
            "b" => Some("B".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_fill_template_single_pass() {
        assert_eq!(fill_template("[{{a}}|{{b}}]", lookup), "[{{b}}|B]");
    }

    #[test]
    fn test_fill_template_keeps_unknown_and_unclosed() {
        assert_eq!(fill_template("{{x}} {{b}} {{", lookup), "{{x}} B {{");
        assert_eq!(fill_template("no placeholders", lookup), "no placeholders");
    }
}
