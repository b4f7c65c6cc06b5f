use grrs::SearchProgress;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;

/// Progress bar on stderr counting searched files.
///
/// indicatif hides the bar on its own when stderr is not a terminal.
pub struct FileProgressBar {
    bar: ProgressBar,
}

impl FileProgressBar {
    pub fn new() -> anyhow::Result<Self> {
        let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files {wide_msg}")?
                .progress_chars("=>-"),
        );
        Ok(Self { bar })
    }
}

impl SearchProgress for FileProgressBar {
    fn on_start(&self, total_files: u64) {
        self.bar.set_length(total_files);
    }

    fn on_file_done(&self, path: &Path) {
        self.bar.set_message(path.display().to_string());
        self.bar.inc(1);
    }

    fn on_finish(&self) {
        self.bar.finish_and_clear();
    }
}
