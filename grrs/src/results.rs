use std::path::PathBuf;

use crate::errors::GrepError;

/// A single matching line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// 1-based line number
    pub line_number: usize,
    /// The line without its terminator
    pub line_content: String,
    /// Byte spans of each pattern occurrence within `line_content`
    pub spans: Vec<(usize, usize)>,
}

/// All matches found in a single file
#[derive(Debug, Clone)]
pub struct FileResult {
    pub path: PathBuf,
    pub matches: Vec<Match>,
}

/// A file that could not be searched
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: GrepError,
}

/// The complete outcome of a search over several files
#[derive(Debug, Default)]
pub struct SearchOutcome {
    /// Results per searched file, in input order
    pub file_results: Vec<FileResult>,
    /// Files that failed, in input order
    pub failures: Vec<FileFailure>,
    pub total_matches: usize,
    pub files_searched: usize,
    pub files_with_matches: usize,
}

impl SearchOutcome {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a file result and updates the counters
    pub fn add_file_result(&mut self, file_result: FileResult) {
        self.files_searched += 1;
        if !file_result.matches.is_empty() {
            self.total_matches += file_result.matches.len();
            self.files_with_matches += 1;
        }
        self.file_results.push(file_result);
    }

    pub fn add_failure(&mut self, path: impl Into<PathBuf>, error: GrepError) {
        self.failures.push(FileFailure {
            path: path.into(),
            error,
        });
    }

    /// Merges another outcome into this one
    pub fn merge(&mut self, other: SearchOutcome) {
        self.total_matches += other.total_matches;
        self.files_searched += other.files_searched;
        self.files_with_matches += other.files_with_matches;
        self.file_results.extend(other.file_results);
        self.failures.extend(other.failures);
    }

    pub fn has_matches(&self) -> bool {
        self.total_matches > 0
    }
}
