//! Read-only views: summary, CGPA history and the grade scale

use gpa_guru::core::gpa::{format_gpa, percentage};
use gpa_guru::{LetterGrade, Session};

/// Handle `summary`
pub fn summary(session: &Session) {
    println!("\n=== GPA Summary ===\n");
    match session.selected() {
        Some(key) => {
            let sgpa = session.current_sgpa();
            let pct = sgpa.map_or_else(|| "N/A".to_string(), |s| format!("{:.1}%", percentage(s)));
            println!("Current semester: {}", key.label());
            println!("Current SGPA:     {} ({pct})", format_gpa(sgpa));
        }
        None => println!("Current semester: none selected"),
    }

    let history = session.history();
    println!("Overall CGPA:     {}", format_gpa(session.cgpa()));
    println!(
        "Counted credits:  {:.1} over {} semester(s)",
        session.counted_credits(),
        history.len()
    );
}

/// Handle `history`
pub fn history(session: &Session) {
    let history = session.history();
    if history.is_empty() {
        println!("No semesters with grades yet.");
        return;
    }

    println!("{:<22} {:>8} {:>6}  Type", "Semester", "Credits", "SGPA");
    for entry in &history {
        println!(
            "{:<22} {:>8.1} {:>6.2}  {}",
            entry.key.label(),
            entry.total_credits,
            entry.sgpa,
            entry.entry_type()
        );
    }
    println!("\nOverall CGPA: {}", format_gpa(session.cgpa()));
}

/// Handle `grades`
pub fn grades() {
    println!("Grade  Points");
    for grade in LetterGrade::ALL {
        println!("{:<6} {:>6}", grade.as_str(), grade.points());
    }
}
