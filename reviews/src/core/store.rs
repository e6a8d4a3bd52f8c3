//! In-memory review store
//!
//! Two partitions: the base dataset, shared and immutable for the life of
//! the process, and the submission log, which only grows.

use std::sync::Arc;

use crate::core::record::ReviewRecord;

/// Combined view of base and submitted review records
#[derive(Debug, Clone, Default)]
pub struct ReviewStore {
    base: Arc<[ReviewRecord]>,
    submissions: Vec<ReviewRecord>,
}

impl ReviewStore {
    /// Create a store over the base dataset with no submissions
    pub fn new(base: Vec<ReviewRecord>) -> Self {
        Self {
            base: base.into(),
            submissions: Vec::new(),
        }
    }

    /// Merge previously persisted submissions after any already held
    pub fn extend_submissions(&mut self, submissions: impl IntoIterator<Item = ReviewRecord>) {
        self.submissions.extend(submissions);
    }

    /// Append one new submission
    pub fn append(&mut self, record: ReviewRecord) {
        self.submissions.push(record);
    }

    /// All records: base first, then submissions in insertion order
    pub fn records(&self) -> impl Iterator<Item = &ReviewRecord> + Clone {
        self.base.iter().chain(self.submissions.iter())
    }

    pub fn base(&self) -> &[ReviewRecord] {
        &self.base
    }

    pub fn submissions(&self) -> &[ReviewRecord] {
        &self.submissions
    }

    pub fn len(&self) -> usize {
        self.base.len() + self.submissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
