/// Optional counters for monitoring buffer traffic.
///
/// Only collected when [`Config::enable_metrics`](crate::Config) is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub bytes_written: u64,
    pub bytes_read: u64,
    /// Number of times `head` advanced.
    pub write_commits: u64,
    /// Number of times `tail` advanced.
    pub read_commits: u64,
    pub rejected_writes: u64,
    pub rejected_reads: u64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_written(&mut self, n: usize) {
        self.bytes_written += n as u64;
        self.write_commits += 1;
    }

    pub(crate) fn add_read(&mut self, n: usize) {
        self.bytes_read += n as u64;
        self.read_commits += 1;
    }
}
