//! Command-line interface entry point for `guru`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use gpa_guru::config::Config;
use gpa_guru::{CourseTemplates, FileStore, Session};
use logger::{
    enable_debug, enable_verbose, error, info, init_file_logging, set_level, warn, Level,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // CLI flag overrides config; otherwise use config logging.level; fallback warn
    let effective_level = args
        .log_level
        .map(std::convert::Into::into)
        .or_else(|| config.logging.level.parse::<Level>().ok())
        .unwrap_or(Level::Warn);

    let mut level = effective_level;
    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // File logging: CLI flag wins, otherwise use config logging.file if set
    if let Some(log_path) = args.log_file.clone().or_else(|| config.log_file()) {
        let display_path = log_path.to_string_lossy();
        if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let _ = std::fs::create_dir_all(parent);
        }
        if init_file_logging(&log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let mutates = args.command.mutates_session();
    let result = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Grades => {
            commands::summary::grades();
            Ok(())
        }
        command => run_session_command(command, &config, mutates),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

/// Load the saved session, run `command` against it, and save it again if
/// the command succeeded and may have changed it.
fn run_session_command(command: Command, config: &Config, mutates: bool) -> Result<(), String> {
    let templates = load_templates(config);
    let mut store = FileStore::new(config.data_dir());
    let mut session = Session::load(&store, templates.clone()).unwrap_or_else(|e| {
        error!("Could not read saved semesters from {}: {e}", store.dir().display());
        eprintln!("✗ Could not read saved semesters: {e}");
        Session::new(templates)
    });

    let outcome = match command {
        Command::Select { key } => commands::semester::select(&mut session, &key),
        Command::Show => commands::semester::show(&session),
        Command::Course { subcommand } => commands::course::run(subcommand, &mut session),
        Command::Manual {
            key,
            sgpa,
            credits,
            force,
        } => commands::semester::manual(&mut session, &key, sgpa, credits, force),
        Command::ClearManual { key } => commands::semester::clear_manual(&mut session, &key),
        Command::Summary => {
            commands::summary::summary(&session);
            Ok(())
        }
        Command::History => {
            commands::summary::history(&session);
            Ok(())
        }
        Command::Report {
            format,
            output,
            title,
        } => commands::report::run(
            &session,
            &format,
            output.as_deref(),
            title.as_deref(),
            config,
        ),
        Command::Reset { yes } => commands::reset::run(&mut session, yes),
        Command::Config { .. } | Command::Grades => Ok(()),
    };
    outcome?;

    if mutates {
        if let Err(e) = session.save(&mut store) {
            error!("Could not save semesters to {}: {e}", store.dir().display());
            eprintln!("✗ Could not save semesters: {e}");
        }
    }
    Ok(())
}

/// Custom template file if configured and readable, otherwise the built-in table
fn load_templates(config: &Config) -> CourseTemplates {
    let Some(path) = config.templates_file() else {
        return CourseTemplates::builtin();
    };
    match CourseTemplates::load(&path) {
        Ok(templates) => {
            info!("Course templates loaded from {}", path.display());
            templates
        }
        Err(e) => {
            warn!("{e}; using built-in templates");
            eprintln!("✗ {e} ({}); using built-in templates", path.display());
            CourseTemplates::builtin()
        }
    }
}
