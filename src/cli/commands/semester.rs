//! Semester selection and manual SGPA entry

use crate::commands::course::print_courses;
use gpa_guru::core::gpa::{format_gpa, percentage, PerformanceBand};
use gpa_guru::{GpaError, SelectOutcome, SemesterKey, Session};
use logger::info;

fn parse_key(key: &str) -> Result<SemesterKey, String> {
    key.parse().map_err(|e| format!("✗ {e}"))
}

/// Handle `select <KEY>`
pub fn select(session: &mut Session, key: &str) -> Result<(), String> {
    let key = parse_key(key)?;
    match session.select(key) {
        SelectOutcome::Populated(0) => {
            println!("✓ Selected {} (no default courses)", key.label());
        }
        SelectOutcome::Populated(count) => {
            println!("✓ Selected {} with {count} default course(s)", key.label());
        }
        SelectOutcome::Existing => println!("✓ Selected {}", key.label()),
    }
    info!("Semester {key} selected");
    Ok(())
}

/// Handle `show`
pub fn show(session: &Session) -> Result<(), String> {
    let semester = session
        .selected_semester()
        .ok_or_else(|| "✗ No semester selected. Use `guru select <KEY>` first.".to_string())?;

    println!("\n=== {} ({}) ===\n", semester.key.label(), semester.key);
    print_courses(semester);

    let sgpa = semester.sgpa();
    println!("\nTotal credits: {:.1}", semester.total_credits());
    match sgpa {
        Some(value) => println!("SGPA: {value:.2} ({:.1}%)", percentage(value)),
        None => println!("SGPA: {}", format_gpa(None)),
    }
    println!("{}", PerformanceBand::from_sgpa(sgpa));
    Ok(())
}

/// Handle `manual <KEY> --sgpa --credits [--force]`
pub fn manual(
    session: &mut Session,
    key: &str,
    sgpa: f64,
    credits: f64,
    force: bool,
) -> Result<(), String> {
    let key = parse_key(key)?;
    let result = if force {
        session.override_manual(key, sgpa, credits)
    } else {
        session.enter_manual(key, sgpa, credits)
    };
    result.map_err(|e| manual_error_message(&e))?;

    info!("Manual SGPA recorded for {key}");
    println!("✓ {}: SGPA {sgpa:.2} over {credits} credits (manual)", key.label());
    Ok(())
}

/// Only a conflict with existing data can be resolved by `--force`
fn manual_error_message(e: &GpaError) -> String {
    match e {
        GpaError::ManualEntryConflict(_) => format!("✗ {e} (pass --force)"),
        _ => format!("✗ {e}"),
    }
}

/// Handle `clear-manual <KEY>`
pub fn clear_manual(session: &mut Session, key: &str) -> Result<(), String> {
    let key = parse_key(key)?;
    let cleared = session.clear_manual(key).map_err(|e| format!("✗ {e}"))?;
    if cleared {
        println!(
            "✓ Cleared manual entry for {}; select it to load default courses",
            key.label()
        );
    } else {
        println!("✓ {} is not a manual entry", key.label());
    }
    Ok(())
}
