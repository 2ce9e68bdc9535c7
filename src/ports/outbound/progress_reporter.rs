/// ProgressReporter port for reporting batch progress
///
/// This port abstracts progress display (e.g., a progress bar on stderr)
/// while repositories are processed. Implementations must be shareable
/// across concurrently processed repositories.
pub trait ProgressReporter: Send + Sync {
    /// Announces the number of repositories in the batch
    fn start(&self, total: usize);

    /// Reports that one repository finished
    ///
    /// # Arguments
    /// * `repository` - Key of the repository that finished
    /// * `outcome` - Short outcome label (e.g. "SUCCESS", "OUT_OF_DATE")
    fn advance(&self, repository: &str, outcome: &str);

    /// Reports completion of the batch
    fn finish(&self, message: &str);
}
