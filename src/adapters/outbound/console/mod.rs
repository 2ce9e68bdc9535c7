/// Console adapters for progress display
mod progress_reporter;

pub use progress_reporter::StderrProgressReporter;
