use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::errors::GrepResult;
use crate::search::matcher::MatchOptions;

/// Name of the per-directory configuration file
pub const LOCAL_CONFIG_FILE: &str = ".grrs.yaml";

/// How to handle invalid UTF-8 sequences in searched files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingMode {
    /// Stop searching the file and report an error
    #[default]
    FailFast,
    /// Replace invalid sequences with U+FFFD and keep going
    Lossy,
}

impl std::str::FromStr for EncodingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "failfast" => Ok(Self::FailFast),
            "lossy" => Ok(Self::Lossy),
            other => Err(format!(
                "unknown encoding mode `{}` (expected failfast or lossy)",
                other
            )),
        }
    }
}

/// Settings for one search run.
///
/// Option values can come from configuration files, loaded in this order with
/// later files overriding earlier ones:
/// 1. `$CONFIG_DIR/grrs/config.yaml`
/// 2. `.grrs.yaml` in the current directory
/// 3. a file named with `--config`
///
/// Command-line flags are applied last with [`GrepConfig::merge_with_cli`].
/// The pattern and paths only ever come from the command line.
///
/// ```yaml
/// ignore_case: true
/// line_numbers: true
/// file_extensions: ["rs", "toml"]
/// ignore_patterns: ["target/**"]
/// thread_count: 4
/// log_level: "info"
/// encoding_mode: "lossy"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrepConfig {
    #[serde(skip)]
    pub pattern: String,

    #[serde(skip)]
    pub paths: Vec<PathBuf>,

    /// Treat the pattern as a regular expression
    pub is_regex: bool,

    pub ignore_case: bool,

    /// Prefix each printed line with its line number
    pub line_numbers: bool,

    /// Print per-file match counts instead of lines
    pub count_only: bool,

    /// Print only the summary line
    pub stats_only: bool,

    /// Descend into directories
    pub recursive: bool,

    /// Extensions to include while walking directories; None includes all
    pub file_extensions: Option<Vec<String>>,

    /// Glob patterns to skip while walking directories
    pub ignore_patterns: Vec<String>,

    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    pub encoding_mode: EncodingMode,
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for GrepConfig {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            paths: Vec::new(),
            is_regex: false,
            ignore_case: false,
            line_numbers: false,
            count_only: false,
            stats_only: false,
            recursive: false,
            file_extensions: None,
            ignore_patterns: Vec::new(),
            thread_count: default_thread_count(),
            log_level: default_log_level(),
            encoding_mode: EncodingMode::default(),
        }
    }
}

/// Values given on the command line; `None` leaves the file value alone
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub pattern: String,
    pub paths: Vec<PathBuf>,
    pub is_regex: Option<bool>,
    pub ignore_case: Option<bool>,
    pub line_numbers: Option<bool>,
    pub count_only: Option<bool>,
    pub stats_only: Option<bool>,
    pub recursive: Option<bool>,
    pub file_extensions: Option<Vec<String>>,
    pub ignore_patterns: Vec<String>,
    pub thread_count: Option<NonZeroUsize>,
    pub log_level: Option<String>,
    pub encoding_mode: Option<EncodingMode>,
}

impl GrepConfig {
    /// Builds a config for `pattern` over `paths` with default options
    pub fn new(pattern: impl Into<String>, paths: Vec<PathBuf>) -> Self {
        Self {
            pattern: pattern.into(),
            paths,
            ..Default::default()
        }
    }

    /// Loads configuration from the default locations plus an explicit file.
    ///
    /// Default locations are optional; an explicit file must exist.
    pub fn load_from(config_path: Option<&Path>) -> GrepResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let defaults = [
            dirs::config_dir().map(|p| p.join("grrs").join("config.yaml")),
            Some(PathBuf::from(LOCAL_CONFIG_FILE)),
        ];
        for path in defaults.iter().flatten() {
            if path.is_file() {
                builder = builder.add_source(File::from(path.as_path()).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Applies command-line values on top of file values
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        self.pattern = cli.pattern;
        self.paths = cli.paths;
        let switches = [
            (&mut self.is_regex, cli.is_regex),
            (&mut self.ignore_case, cli.ignore_case),
            (&mut self.line_numbers, cli.line_numbers),
            (&mut self.count_only, cli.count_only),
            (&mut self.stats_only, cli.stats_only),
            (&mut self.recursive, cli.recursive),
        ];
        for (field, value) in switches {
            if let Some(value) = value {
                *field = value;
            }
        }
        if cli.file_extensions.is_some() {
            self.file_extensions = cli.file_extensions;
        }
        if !cli.ignore_patterns.is_empty() {
            self.ignore_patterns = cli.ignore_patterns;
        }
        if let Some(threads) = cli.thread_count {
            self.thread_count = threads;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if let Some(mode) = cli.encoding_mode {
            self.encoding_mode = mode;
        }
        self
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            is_regex: self.is_regex,
            ignore_case: self.ignore_case,
        }
    }

    /// True when output lines need a file name prefix
    pub fn is_multi_file(&self) -> bool {
        self.recursive || self.paths.len() > 1
    }
}
