use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Mutex;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, drawing an indicatif
/// progress bar on stderr so it doesn't interfere with the summary on stdout.
/// The bar is hidden automatically when stderr is not a terminal.
pub struct StderrProgressReporter {
    progress_bar: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: Mutex::new(None),
            quiet: false,
        }
    }

    /// A reporter that never draws anything
    pub fn quiet() -> Self {
        Self {
            progress_bar: Mutex::new(None),
            quiet: true,
        }
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        if self.quiet {
            return ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::hidden());
        }
        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} repositories - {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-");
        pb.set_style(style);
        pb
    }

    fn current(&self) -> Option<ProgressBar> {
        self.progress_bar.lock().ok().and_then(|guard| guard.clone())
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn start(&self, total: usize) {
        let pb = self.create_progress_bar(total);
        if let Ok(mut guard) = self.progress_bar.lock() {
            if let Some(previous) = guard.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    fn advance(&self, repository: &str, outcome: &str) {
        if let Some(pb) = self.current() {
            pb.set_message(format!("{}: {}", repository, outcome));
            pb.inc(1);
        }
    }

    fn finish(&self, message: &str) {
        if let Some(pb) = self.current() {
            pb.finish_and_clear();
        }
        if !self.quiet {
            eprintln!("{}", message);
        }
    }
}
