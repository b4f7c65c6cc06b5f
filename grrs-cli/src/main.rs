use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grrs::{
    search, CliOverrides, EncodingMode, GrepConfig, NoProgress, SearchOutcome, SearchProgress,
};
use std::io::{self, BufWriter, IsTerminal};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

mod logging;
mod output;
mod progress;

use output::{OutputMode, Printer};
use progress::FileProgressBar;

/// Search for a pattern in files and print the lines that contain it
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The pattern to look for
    pattern: String,

    /// The files (or, with --recursive, directories) to search
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Treat the pattern as a regular expression
    #[arg(short = 'e', long, overrides_with = "no_regex")]
    regex: bool,

    /// Match the pattern literally, even if a config file enables regex
    #[arg(long, overrides_with = "regex")]
    no_regex: bool,

    /// Match without regard to case
    #[arg(short = 'i', long, overrides_with = "no_ignore_case")]
    ignore_case: bool,

    /// Match case exactly
    #[arg(long, overrides_with = "ignore_case")]
    no_ignore_case: bool,

    /// Prefix each line with its line number
    #[arg(short = 'n', long, overrides_with = "no_line_number")]
    line_number: bool,

    /// Do not print line numbers
    #[arg(long, overrides_with = "line_number")]
    no_line_number: bool,

    /// Print the number of matching lines per file
    #[arg(short = 'c', long, conflicts_with = "stats", overrides_with = "no_count")]
    count: bool,

    /// Print matching lines rather than counts
    #[arg(long, overrides_with = "count")]
    no_count: bool,

    /// Search directories recursively
    #[arg(short = 'r', long, overrides_with = "no_recursive")]
    recursive: bool,

    /// Do not descend into directories
    #[arg(long, overrides_with = "recursive")]
    no_recursive: bool,

    /// File extensions to include when searching directories (e.g. rs,toml)
    #[arg(long = "ext")]
    extensions: Option<String>,

    /// Glob patterns to skip when searching directories
    #[arg(long)]
    ignore: Vec<String>,

    /// Show only statistics, not matches
    #[arg(short, long, overrides_with = "no_stats")]
    stats: bool,

    /// Show matches rather than only statistics
    #[arg(long, overrides_with = "stats")]
    no_stats: bool,

    /// Number of threads to use
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// How to handle invalid UTF-8 sequences (failfast|lossy)
    #[arg(long)]
    encoding: Option<EncodingMode>,

    /// When to color output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Show a progress bar while searching
    #[arg(long)]
    progress: bool,

    /// Configuration file to load on top of the default locations
    #[arg(long)]
    config: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => io::stdout().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            pattern: self.pattern.clone(),
            paths: self.paths.clone(),
            is_regex: switch(self.regex, self.no_regex),
            ignore_case: switch(self.ignore_case, self.no_ignore_case),
            line_numbers: switch(self.line_number, self.no_line_number),
            count_only: switch(self.count, self.no_count),
            stats_only: switch(self.stats, self.no_stats),
            recursive: switch(self.recursive, self.no_recursive),
            file_extensions: self.extensions.as_ref().map(|e| {
                e.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            }),
            ignore_patterns: self.ignore.clone(),
            thread_count: self.threads,
            log_level: logging::level_from_verbosity(self.verbose, self.quiet),
            encoding_mode: self.encoding,
        }
    }
}

/// Maps a `--flag`/`--no-flag` pair to an override; neither keeps the config value
fn switch(on: bool, off: bool) -> Option<bool> {
    if on {
        Some(true)
    } else if off {
        Some(false)
    } else {
        None
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:?}", err);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = GrepConfig::load_from(cli.config.as_deref())
        .context("could not load configuration")?
        .merge_with_cli(cli.overrides());

    logging::init(&config.log_level)?;
    debug!("Effective configuration: {:?}", config);

    let outcome = if cli.progress {
        let bar = FileProgressBar::new()?;
        run_search(&config, &bar)?
    } else {
        run_search(&config, &NoProgress)?
    };

    let printer = Printer {
        mode: if config.stats_only {
            OutputMode::Stats
        } else if config.count_only {
            OutputMode::Count
        } else {
            OutputMode::Lines
        },
        with_path: config.is_multi_file(),
        line_numbers: config.line_numbers,
        color: cli.color.enabled(),
    };
    colored::control::set_override(printer.color);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if let Err(e) = printer.write_outcome(&outcome, &mut out) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            return Ok(ExitCode::SUCCESS);
        }
        return Err(e).context("could not write output");
    }

    let code = exit_code(&outcome);
    for failure in outcome.failures {
        let err = anyhow::Error::new(failure.error)
            .context(format!("could not read file `{}`", failure.path.display()));
        eprintln!("Error: {:?}", err);
    }

    Ok(code)
}

/// grep convention: 0 on a match, 1 on no match, 2 if any file failed
fn exit_code(outcome: &SearchOutcome) -> ExitCode {
    if !outcome.failures.is_empty() {
        ExitCode::from(2)
    } else if outcome.has_matches() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn run_search(config: &GrepConfig, progress: &dyn SearchProgress) -> Result<SearchOutcome> {
    search(config, progress).with_context(|| format!("could not search for `{}`", config.pattern))
}
