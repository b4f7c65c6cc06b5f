use ignore::WalkBuilder;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::matcher::PatternMatcher;
use super::processor::LineSearcher;
use crate::config::GrepConfig;
use crate::errors::{GrepError, GrepResult};
use crate::filters::should_include_file;
use crate::results::SearchOutcome;

/// Receives progress notifications from [`search`]
pub trait SearchProgress: Send + Sync {
    /// Called once with the number of files about to be searched
    fn on_start(&self, _total_files: u64) {}

    /// Called after each file, from worker threads
    fn on_file_done(&self, _path: &Path) {}

    fn on_finish(&self) {}
}

/// Progress sink that ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl SearchProgress for NoProgress {}

fn walk_directory(dir: &Path, config: &GrepConfig, files: &mut Vec<PathBuf>) {
    let walker = WalkBuilder::new(dir)
        .hidden(true)
        .ignore(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .sort_by_file_path(|a, b| a.cmp(b))
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        if should_include_file(path, dir, &config.file_extensions, &config.ignore_patterns) {
            files.push(entry.into_path());
        }
    }
}

/// Expands the configured paths into the list of files to search.
///
/// Directories are walked only in recursive mode. Otherwise they are kept as
/// they are so that searching them reports an error in argument order.
pub fn collect_files(config: &GrepConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in &config.paths {
        if config.recursive && path.is_dir() {
            walk_directory(path, config, &mut files);
        } else {
            files.push(path.clone());
        }
    }
    files
}

/// Searches every configured path and gathers results in input order.
///
/// An invalid pattern fails the whole search. Files that cannot be read are
/// recorded in [`SearchOutcome::failures`] and the rest are still searched.
pub fn search(config: &GrepConfig, progress: &dyn SearchProgress) -> GrepResult<SearchOutcome> {
    info!("Starting search for pattern {:?}", config.pattern);

    let matcher = PatternMatcher::new(&config.pattern, config.match_options())?;
    let searcher = LineSearcher::new(matcher, config.encoding_mode);

    let files = collect_files(config);
    debug!("Found {} files to search", files.len());

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.thread_count.get())
        .build()
        .map_err(|e| GrepError::config_error(format!("failed to start worker threads: {}", e)))?;

    progress.on_start(files.len() as u64);

    let results: Vec<_> = pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                let result = searcher.search_file(path);
                debug!("Searched {}", path.display());
                progress.on_file_done(path);
                (path, result)
            })
            .collect()
    });

    progress.on_finish();

    let mut outcome = SearchOutcome::new();
    for (path, result) in results {
        match result {
            Ok(file_result) => outcome.add_file_result(file_result),
            Err(e) => {
                debug!("Failed to search {}: {}", path.display(), e);
                outcome.add_failure(path.clone(), e);
            }
        }
    }

    info!(
        "Search complete. Found {} matches in {} files",
        outcome.total_matches, outcome.files_with_matches
    );

    Ok(outcome)
}
