//! Reset command handler

use gpa_guru::Session;
use logger::warn;
use std::io::{self, Write};

/// Handle `reset [--yes]`
pub fn run(session: &mut Session, yes: bool) -> Result<(), String> {
    if session.is_empty() && session.selected().is_none() {
        println!("✓ Nothing to reset");
        return Ok(());
    }

    if !yes {
        print!(
            "Delete all {} semester(s) and the selection? (y/n): ",
            session.len()
        );
        io::stdout().flush().ok();

        let mut response = String::new();
        io::stdin().read_line(&mut response).ok();

        let answer = response.trim();
        if !(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")) {
            println!("✗ Reset cancelled");
            return Ok(());
        }
    }

    warn!("Deleting {} saved semester(s)", session.len());
    session.reset();
    println!("✓ All semesters cleared");
    Ok(())
}
