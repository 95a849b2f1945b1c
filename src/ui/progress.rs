//! Extraction progress
//!
//! Installing a VSIX unpacks every archive entry into the profile's
//! extension directory. Progress goes through [`ProgressReporter`] so the
//! extension service never decides how (or whether) it is displayed.

use indicatif::{ProgressBar, ProgressStyle};

/// Progress reporter for file extraction
pub trait ProgressReporter {
    /// Initialize file progress with total file count
    fn init_file_progress(&mut self, total_files: u64);

    /// Update file progress
    fn update_file(&mut self, file_path: &str);

    /// Finish file progress
    fn finish_files(&mut self);

    /// Abandon on error
    fn abandon(&mut self);
}

/// Interactive progress reporter with a visual progress bar
#[derive(Default)]
pub struct InteractiveProgressReporter {
    file_pb: Option<ProgressBar>,
}

impl InteractiveProgressReporter {
    pub fn new() -> Self {
        Self { file_pb: None }
    }
}

impl ProgressReporter for InteractiveProgressReporter {
    fn init_file_progress(&mut self, total_files: u64) {
        let file_style = ProgressStyle::default_bar()
            .template("  [{bar:40.green/yellow}] {pos}/{len} files {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ");

        let file_pb = ProgressBar::new(total_files);
        file_pb.set_style(file_style);
        self.file_pb = Some(file_pb);
    }

    fn update_file(&mut self, file_path: &str) {
        if let Some(ref file_pb) = self.file_pb {
            // Keep the tail of long paths
            let display_path = if file_path.chars().count() > 50 {
                let tail: String = file_path.chars().rev().take(47).collect();
                format!("...{}", tail.chars().rev().collect::<String>())
            } else {
                file_path.to_string()
            };
            file_pb.set_message(display_path);
            file_pb.inc(1);
        }
    }

    fn finish_files(&mut self) {
        if let Some(ref file_pb) = self.file_pb {
            file_pb.finish_and_clear();
        }
    }

    fn abandon(&mut self) {
        if let Some(ref file_pb) = self.file_pb {
            file_pb.abandon();
        }
    }
}

/// Silent progress reporter for `--no-progress` and non-terminal output
#[derive(Default)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn init_file_progress(&mut self, _total_files: u64) {}

    fn update_file(&mut self, _file_path: &str) {}

    fn finish_files(&mut self) {}

    fn abandon(&mut self) {}
}

/// Reporter for extraction, interactive only when asked for and stderr is a terminal
pub fn file_progress(show: bool) -> Box<dyn ProgressReporter> {
    if show && console::Term::stderr().is_term() {
        Box::new(InteractiveProgressReporter::new())
    } else {
        Box::new(SilentProgressReporter)
    }
}
