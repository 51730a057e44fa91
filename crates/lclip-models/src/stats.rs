//! Run statistics.

use serde::{Deserialize, Serialize};

/// Counters collected over one pipeline run.
///
/// A fresh `RunStats` is created per run and threaded through the stages;
/// runs never share counter state. `moved_files` is retained for
/// compatibility with the historical statistics block and is currently
/// never incremented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub deleted_files: u64,
    pub kept_files: u64,
    pub moved_files: u64,
    pub renamed_files: u64,
    pub converted_files: u64,
    pub copied_files: u64,
}

impl RunStats {
    /// True when no counter was incremented during the run.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_stats_are_empty() {
        assert!(RunStats::default().is_empty());
    }

    #[test]
    fn any_increment_is_visible() {
        let mut stats = RunStats::default();
        stats.converted_files += 1;
        assert!(!stats.is_empty());
        assert_eq!(stats.converted_files, 1);
        assert_eq!(stats.deleted_files, 0);
    }
}
