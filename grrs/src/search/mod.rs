//! Searching files for lines that match a pattern.
//!
//! [`processor`] holds the line-oriented core, [`engine`] fans it out over
//! many files on a rayon pool.
pub mod engine;
pub mod matcher;
pub mod processor;

pub use engine::{collect_files, search, NoProgress, SearchProgress};
pub use matcher::{MatchOptions, PatternMatcher};
pub use processor::{find_matches, LineSearcher};
