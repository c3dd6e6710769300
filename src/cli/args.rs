//! CLI argument definitions for `guru`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use gpa_guru::config::ConfigOverrides;
use logger::Level;

/// CLI log level argument
///
/// Represents log levels that can be passed via CLI arguments. Converts to lowercase
/// strings for config storage and to `logger::Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `data_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

/// Course operations on the selected semester
#[derive(Debug, Subcommand)]
pub enum CourseSubcommand {
    /// Add a course.
    Add {
        /// Course name (at least two characters)
        #[arg(value_name = "NAME")]
        name: String,
        /// Credit weight (0.5 to 10)
        #[arg(short, long, value_name = "CREDITS")]
        credits: f64,
        /// Grade point (0-10) or letter grade (A+, A, B, C, D, E, F)
        #[arg(short, long, value_name = "GRADE", default_value = "0")]
        grade: String,
    },
    /// Remove a course.
    Remove {
        /// Course id or 1-based position in `course list`
        #[arg(value_name = "COURSE")]
        course: String,
    },
    /// Change the grade of a course.
    Grade {
        /// Course id or 1-based position in `course list`
        #[arg(value_name = "COURSE")]
        course: String,
        /// Grade point (0-10) or letter grade
        #[arg(value_name = "GRADE")]
        grade: String,
    },
    /// List the courses of the selected semester.
    List,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Select a semester (e.g. Y1S2).
    ///
    /// A semester without data is filled from its default course template.
    Select {
        /// Semester key
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Show the selected semester with its SGPA.
    Show,
    /// Add, remove, grade or list courses of the selected semester.
    Course {
        #[command(subcommand)]
        subcommand: CourseSubcommand,
    },
    /// Enter a semester's SGPA and credits directly.
    Manual {
        /// Semester key
        #[arg(value_name = "KEY")]
        key: String,
        /// Semester GPA (0-10)
        #[arg(long, value_name = "SGPA")]
        sgpa: f64,
        /// Total credits of the semester (0.5 to 100)
        #[arg(long, value_name = "CREDITS")]
        credits: f64,
        /// Replace existing course data for the semester
        #[arg(long)]
        force: bool,
    },
    /// Turn a manually entered semester back into a course-based one.
    ClearManual {
        /// Semester key
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Show the current SGPA and the overall CGPA.
    Summary,
    /// Show every semester counting towards the CGPA.
    History,
    /// Show the grade scale.
    Grades,
    /// Write a GPA report.
    Report {
        /// Report format: markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "md")]
        format: String,

        /// Output file path (defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Report title
        #[arg(long, value_name = "TITLE")]
        title: Option<String>,
    },
    /// Delete all semesters and the selection.
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
}

impl Command {
    /// Whether the command may change the saved semesters
    pub const fn mutates_session(&self) -> bool {
        matches!(
            self,
            Self::Select { .. }
                | Self::Manual { .. }
                | Self::ClearManual { .. }
                | Self::Reset { .. }
                | Self::Course {
                    subcommand: CourseSubcommand::Add { .. }
                        | CourseSubcommand::Remove { .. }
                        | CourseSubcommand::Grade { .. }
                }
        )
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "guru",
    about = "Semester and cumulative GPA tracker",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the directory holding saved semesters
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override the reports output directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Use a custom course template file
    #[arg(long = "templates-file", value_name = "FILE")]
    pub templates_file: Option<PathBuf>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// `None` means no override. The runtime `--log-file` flag is handled
    /// separately and never written to the config.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: None,
            verbose: self.config_verbose,
            data_dir: self.data_dir.as_ref().map(path_string),
            reports_dir: self.reports_dir.as_ref().map(path_string),
            templates_file: self.templates_file.as_ref().map(path_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let cli = Cli::parse_from(["guru", "summary"]);

        let overrides = cli.to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.data_dir.is_none());
        assert!(overrides.reports_dir.is_none());
        assert!(overrides.templates_file.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli::parse_from([
            "guru",
            "--config-level",
            "debug",
            "--config-verbose",
            "yes",
            "--data-dir",
            "/data",
            "--reports-dir",
            "/reports",
            "--templates-file",
            "/t.toml",
            "history",
        ]);

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.data_dir, Some("/data".to_string()));
        assert_eq!(overrides.reports_dir, Some("/reports".to_string()));
        assert_eq!(overrides.templates_file, Some("/t.toml".to_string()));
    }

    #[test]
    fn test_course_add_parses() {
        let cli = Cli::parse_from(["guru", "course", "add", "Data Structures", "-c", "4", "-g", "A+"]);
        match cli.command {
            Command::Course {
                subcommand:
                    CourseSubcommand::Add {
                        name,
                        credits,
                        grade,
                    },
            } => {
                assert_eq!(name, "Data Structures");
                assert!((credits - 4.0).abs() < f64::EPSILON);
                assert_eq!(grade, "A+");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_manual_requires_sgpa_and_credits() {
        assert!(Cli::try_parse_from(["guru", "manual", "Y1S1", "--sgpa", "8"]).is_err());
        let cli =
            Cli::parse_from(["guru", "manual", "Y1S1", "--sgpa", "8", "--credits", "21", "--force"]);
        assert!(matches!(cli.command, Command::Manual { force: true, .. }));
    }

    #[test]
    fn test_mutating_commands() {
        assert!(Cli::parse_from(["guru", "select", "Y1S1"]).command.mutates_session());
        assert!(Cli::parse_from(["guru", "course", "grade", "1", "A"])
            .command
            .mutates_session());
        assert!(!Cli::parse_from(["guru", "course", "list"]).command.mutates_session());
        assert!(!Cli::parse_from(["guru", "summary"]).command.mutates_session());
        assert!(!Cli::parse_from(["guru", "config"]).command.mutates_session());
    }
}
