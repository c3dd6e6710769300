//! User configuration for the `guru` CLI
//!
//! Settings live in a TOML file under the platform config directory. Path
//! values may use `$GURU`, which expands to that directory. Every setting is
//! addressed by a [`ConfigKey`] for `config get/set/unset`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Embedded defaults, chosen by build profile
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory in path values
const DIR_VARIABLE: &str = "$GURU";

/// `[logging]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path (empty logs to the terminal)
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// `[paths]` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the saved semesters
    #[serde(default)]
    pub data_dir: String,
    /// Directory for report output files
    #[serde(default)]
    pub reports_dir: String,
    /// Custom course template table (empty uses the built-in one)
    #[serde(default)]
    pub templates_file: String,
}

/// Full configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Where semesters, reports and templates live
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Per-run values from command-line flags; never written back to the file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// `--log-level`
    pub level: Option<String>,
    /// `--log-file`
    pub file: Option<String>,
    /// `--verbose`
    pub verbose: Option<bool>,
    /// `--data-dir`
    pub data_dir: Option<String>,
    /// `--reports-dir`
    pub reports_dir: Option<String>,
    /// `--templates`
    pub templates_file: Option<String>,
}

/// A single addressable setting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    /// `logging.level`
    Level,
    /// `logging.file`
    File,
    /// `logging.verbose`
    Verbose,
    /// `paths.data_dir`
    DataDir,
    /// `paths.reports_dir`
    ReportsDir,
    /// `paths.templates_file`
    TemplatesFile,
}

impl ConfigKey {
    /// Every key, in file order
    pub const ALL: [Self; 6] = [
        Self::Level,
        Self::File,
        Self::Verbose,
        Self::DataDir,
        Self::ReportsDir,
        Self::TemplatesFile,
    ];

    /// Name as written in the TOML file
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Level => "level",
            Self::File => "file",
            Self::Verbose => "verbose",
            Self::DataDir => "data_dir",
            Self::ReportsDir => "reports_dir",
            Self::TemplatesFile => "templates_file",
        }
    }

    /// TOML table holding the key
    #[must_use]
    pub const fn section(self) -> &'static str {
        match self {
            Self::Level | Self::File | Self::Verbose => "logging",
            Self::DataDir | Self::ReportsDir | Self::TemplatesFile => "paths",
        }
    }

    /// Whether `$GURU` is expanded in the value
    #[must_use]
    pub const fn is_path(self) -> bool {
        !matches!(self, Self::Level | Self::Verbose)
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    /// Accepts dashes in place of underscores (`data-dir`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|key| key.name() == normalized)
            .ok_or_else(|| format!("Unknown config key: '{s}'"))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Config {
    /// Directory `$GURU` stands for: `<config_dir>/guru`
    #[must_use]
    pub fn guru_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("guru")
    }

    /// User config file (`dconfig.toml` in debug builds)
    #[must_use]
    pub fn config_file_path() -> PathBuf {
        Self::guru_dir().join(CONFIG_FILE_NAME)
    }

    /// Parse a TOML document, expanding `$GURU` in path values.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or has the wrong shape.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;
        for key in ConfigKey::ALL.into_iter().filter(|k| k.is_path()) {
            if let Some(value) = config.text_mut(key) {
                *value = expand_variables(value);
            }
        }
        Ok(config)
    }

    /// Built-in defaults for this build profile
    ///
    /// # Panics
    /// Panics if the embedded defaults do not parse; they are compiled in and
    /// covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load the user config file, creating it from defaults on first run
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::config_file_path())
    }

    /// Load `config_file`.
    ///
    /// A missing file is created from the defaults. A file with empty settings
    /// has them filled in and is rewritten. An unreadable or malformed file is
    /// left alone and the defaults are used for this run.
    #[must_use]
    pub fn load_from(config_file: &Path) -> Self {
        let defaults = Self::from_defaults();

        if !config_file.exists() {
            let _ = defaults.save_to(config_file);
            return defaults;
        }

        let parsed = fs::read_to_string(config_file)
            .ok()
            .and_then(|content| Self::from_toml(&content).ok());
        match parsed {
            Some(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save_to(config_file);
                }
                config
            }
            None => defaults,
        }
    }

    /// Write to the user config file.
    ///
    /// # Errors
    /// Returns an error if serialization, directory creation or the write fails.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::config_file_path())
    }

    /// Write to `config_file`, creating its directory.
    ///
    /// # Errors
    /// Same as [`save`](Self::save).
    pub fn save_to(&self, config_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(config_file, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Delete the user config file so the next load starts from defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Fill settings that are empty here from `defaults`.
    ///
    /// Returns whether anything changed. `verbose` is never touched.
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;
        for key in ConfigKey::ALL {
            let Some(fallback) = defaults.text(key).filter(|v| !v.is_empty()) else {
                continue;
            };
            if let Some(value) = self.text_mut(key).filter(|v| v.is_empty()) {
                value.clone_from(fallback);
                changed = true;
            }
        }
        changed
    }

    /// Apply flag values for this run only
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        let text_overrides = [
            (ConfigKey::Level, &overrides.level),
            (ConfigKey::File, &overrides.file),
            (ConfigKey::DataDir, &overrides.data_dir),
            (ConfigKey::ReportsDir, &overrides.reports_dir),
            (ConfigKey::TemplatesFile, &overrides.templates_file),
        ];
        for (key, value) in text_overrides {
            if let Some(value) = value {
                self.assign_text(key, value);
            }
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
    }

    /// Current value of `key` as shown by `config get`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let key = key.parse().ok()?;
        Some(self.value(key))
    }

    /// Change one setting in memory; call [`save`](Self::save) to persist it.
    ///
    /// # Errors
    /// Returns an error for an unknown key, a level the logger does not know,
    /// or a non-boolean `verbose`. The config is unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let key: ConfigKey = key.parse()?;
        match key {
            ConfigKey::Verbose => {
                self.logging.verbose = value
                    .parse()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            ConfigKey::Level => {
                value
                    .parse::<logger::Level>()
                    .map_err(|e| format!("Invalid value for 'level': {e}"))?;
                self.assign_text(key, value);
            }
            _ => self.assign_text(key, value),
        }
        Ok(())
    }

    /// Restore one setting from `defaults`.
    ///
    /// # Errors
    /// Returns an error for an unknown key.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        let key: ConfigKey = key.parse()?;
        if key == ConfigKey::Verbose {
            self.logging.verbose = defaults.logging.verbose;
        } else if let (Some(value), Some(fallback)) = (self.text_mut(key), defaults.text(key)) {
            value.clone_from(fallback);
        }
        Ok(())
    }

    /// Directory holding the saved semesters (`$GURU/data` if unset)
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        non_empty_path(&self.paths.data_dir)
            .unwrap_or_else(|| Self::guru_dir().join("data"))
    }

    /// Directory for generated reports (`$GURU/reports` if unset)
    #[must_use]
    pub fn reports_dir(&self) -> PathBuf {
        non_empty_path(&self.paths.reports_dir)
            .unwrap_or_else(|| Self::guru_dir().join("reports"))
    }

    /// Custom course template file, if one is configured
    #[must_use]
    pub fn templates_file(&self) -> Option<PathBuf> {
        non_empty_path(&self.paths.templates_file)
    }

    /// Log file, if one is configured
    #[must_use]
    pub fn log_file(&self) -> Option<PathBuf> {
        non_empty_path(&self.logging.file)
    }

    fn value(&self, key: ConfigKey) -> String {
        self.text(key)
            .cloned()
            .unwrap_or_else(|| self.logging.verbose.to_string())
    }

    fn text(&self, key: ConfigKey) -> Option<&String> {
        match key {
            ConfigKey::Level => Some(&self.logging.level),
            ConfigKey::File => Some(&self.logging.file),
            ConfigKey::Verbose => None,
            ConfigKey::DataDir => Some(&self.paths.data_dir),
            ConfigKey::ReportsDir => Some(&self.paths.reports_dir),
            ConfigKey::TemplatesFile => Some(&self.paths.templates_file),
        }
    }

    fn text_mut(&mut self, key: ConfigKey) -> Option<&mut String> {
        match key {
            ConfigKey::Level => Some(&mut self.logging.level),
            ConfigKey::File => Some(&mut self.logging.file),
            ConfigKey::Verbose => None,
            ConfigKey::DataDir => Some(&mut self.paths.data_dir),
            ConfigKey::ReportsDir => Some(&mut self.paths.reports_dir),
            ConfigKey::TemplatesFile => Some(&mut self.paths.templates_file),
        }
    }

    fn assign_text(&mut self, key: ConfigKey, value: &str) {
        let value = if key.is_path() {
            expand_variables(value)
        } else {
            value.to_string()
        };
        if let Some(slot) = self.text_mut(key) {
            *slot = value;
        }
    }
}

fn expand_variables(value: &str) -> String {
    if value.contains(DIR_VARIABLE) {
        let guru_dir = Config::guru_dir();
        value.replace(DIR_VARIABLE, &guru_dir.to_string_lossy())
    } else {
        value.to_string()
    }
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut section = "";
        for key in ConfigKey::ALL {
            if key.section() != section {
                if !section.is_empty() {
                    writeln!(f)?;
                }
                section = key.section();
                writeln!(f, "[{section}]")?;
            }
            match key {
                ConfigKey::Verbose => writeln!(f, "  {key} = {}", self.logging.verbose)?,
                _ => writeln!(f, "  {key} = \"{}\"", self.value(key))?,
            }
        }
        Ok(())
    }
}
