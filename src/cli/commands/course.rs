//! Course command handlers

use crate::args::CourseSubcommand;
use gpa_guru::core::gpa::format_gpa;
use gpa_guru::{LetterGrade, NewCourse, Semester, Session};
use logger::{info, verbose};

/// Dispatch course subcommands against the selected semester
pub fn run(subcommand: CourseSubcommand, session: &mut Session) -> Result<(), String> {
    let key = session
        .require_selected()
        .map_err(|e| format!("✗ {e}. Use `guru select <KEY>` first."))?;

    match subcommand {
        CourseSubcommand::Add {
            name,
            credits,
            grade,
        } => {
            let grade_point = parse_grade(&grade)?;
            let course = session
                .add_course(key, NewCourse::new(name, credits, grade_point))
                .map_err(|e| format!("✗ {e}"))?;
            info!("Added course {} to {key}", course.id);
            println!(
                "✓ Added {} ({} credits, {}) as {}",
                course.name,
                course.credits,
                course.letter_grade(),
                course.id
            );
        }
        CourseSubcommand::Remove { course } => {
            let id = resolve_course(session, &course)?;
            let removed = session
                .remove_course(key, &id)
                .map_err(|e| format!("✗ {e}"))?;
            info!("Removed course {id} from {key}");
            println!("✓ Removed {}", removed.name);
        }
        CourseSubcommand::Grade { course, grade } => {
            let id = resolve_course(session, &course)?;
            let grade_point = parse_grade(&grade)?;
            session
                .update_grade(key, &id, grade_point)
                .map_err(|e| format!("✗ {e}"))?;
            println!("✓ Grade of {id} set to {grade_point}");
        }
        CourseSubcommand::List => {
            let semester = session
                .selected_semester()
                .ok_or_else(|| format!("✗ No data for {}", key.label()))?;
            print_courses(semester);
            return Ok(());
        }
    }

    verbose!("Semester SGPA is now {}", format_gpa(session.current_sgpa()));
    Ok(())
}

/// Accept a numeric grade point or a letter grade
pub fn parse_grade(input: &str) -> Result<f64, String> {
    let trimmed = input.trim();
    if let Ok(point) = trimmed.parse::<f64>() {
        return Ok(point);
    }
    trimmed
        .parse::<LetterGrade>()
        .map(LetterGrade::grade_point)
        .map_err(|e| format!("✗ {e}"))
}

/// Map a course id or 1-based position in the selected semester to its id
pub fn resolve_course(session: &Session, arg: &str) -> Result<String, String> {
    let semester = session
        .selected_semester()
        .ok_or_else(|| "✗ No semester selected".to_string())?;
    let courses = semester.courses();

    if let Ok(position) = arg.trim().parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|i| courses.get(i))
            .map(|c| c.id.clone())
            .ok_or_else(|| {
                format!(
                    "✗ No course at position {position} ({} course(s) listed)",
                    courses.len()
                )
            });
    }

    semester
        .course(arg)
        .map(|c| c.id.clone())
        .ok_or_else(|| format!("✗ No course '{arg}' in {}", semester.key.label()))
}

/// Print the course table of a semester
pub fn print_courses(semester: &Semester) {
    if semester.is_manual() {
        println!(
            "SGPA for {} was entered manually ({} credits); there is no course list.",
            semester.key.label(),
            semester.total_credits()
        );
        return;
    }
    if semester.courses().is_empty() {
        println!("No courses in {}.", semester.key.label());
        return;
    }

    println!(
        "{:>3}  {:<40} {:>7}  {:<5} {:>6}",
        "#", "Course", "Credits", "Grade", "Points"
    );
    for (i, course) in semester.courses().iter().enumerate() {
        println!(
            "{:>3}  {:<40} {:>7.1}  {:<5} {:>6}",
            i + 1,
            course.name,
            course.credits,
            course.letter_grade().as_str(),
            course.grade_point
        );
    }
    verbose!(
        "Course ids: {}",
        semester
            .courses()
            .iter()
            .map(|c| c.id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
}
