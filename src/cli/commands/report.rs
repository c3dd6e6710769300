//! Report command handler
//!
//! Writes the GPA overview and history as Markdown or HTML.

use gpa_guru::config::Config;
use gpa_guru::core::report::{reporter_for, ReportContext, ReportFormat};
use gpa_guru::Session;
use logger::{error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default report file name, without extension
const DEFAULT_REPORT_NAME: &str = "gpa-report";

/// Run the report command.
pub fn run(
    session: &Session,
    format_str: &str,
    output_file: Option<&Path>,
    title: Option<&str>,
    config: &Config,
) -> Result<(), String> {
    let path = generate_report(session, format_str, output_file, title, config)?;
    println!("✓ Report generated: {}", path.display());
    Ok(())
}

fn generate_report(
    session: &Session,
    format_str: &str,
    output_file: Option<&Path>,
    title: Option<&str>,
    config: &Config,
) -> Result<PathBuf, String> {
    let format = ReportFormat::from_str(format_str).map_err(|e| format!("✗ {e}"))?;

    let output_path = output_file.map_or_else(
        || {
            config
                .reports_dir()
                .join(format!("{DEFAULT_REPORT_NAME}.{}", format.extension()))
        },
        Path::to_path_buf,
    );

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            error!("Failed to create {}: {e}", parent.display());
            format!("✗ Failed to create reports directory {}: {e}", parent.display())
        })?;
    }

    let mut ctx = ReportContext::new(session);
    if let Some(title) = title {
        ctx = ctx.with_title(title);
    }

    reporter_for(format)
        .generate(&ctx, &output_path)
        .map_err(|e| {
            error!("Report generation failed: {e}");
            format!("✗ Failed to write {}: {e}", output_path.display())
        })?;

    info!("{format} report written to {}", output_path.display());
    Ok(output_path)
}
