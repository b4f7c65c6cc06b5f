//! Library behind the `grrs` command-line tool: find the lines of files that
//! contain a pattern.
//!
//! ```no_run
//! use grrs::{search, GrepConfig, NoProgress};
//! use std::path::PathBuf;
//!
//! let config = GrepConfig::new("TODO", vec![PathBuf::from("src/main.rs")]);
//! let outcome = search(&config, &NoProgress)?;
//! println!("{} matches", outcome.total_matches);
//! # Ok::<(), grrs::GrepError>(())
//! ```
pub mod config;
pub mod errors;
pub mod filters;
pub mod results;
pub mod search;

pub use self::config::{CliOverrides, EncodingMode, GrepConfig};
pub use errors::{GrepError, GrepResult};
pub use results::{FileFailure, FileResult, Match, SearchOutcome};
pub use search::{find_matches, search, NoProgress, SearchProgress};
