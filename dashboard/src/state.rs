//! Dashboard state management
//!
//! The review store is shared by every request. Reads take the read lock
//! and run the pure pipeline; submissions take the write lock, so the log
//! file and the in-memory store always agree inside one process.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{RwLock, RwLockReadGuard};

use reviews::{NewReview, ReviewRecord, ReviewStore, SubmissionLog};
use shared::{ProcessId, process_info};

use crate::error::{DashboardError, DashboardResult};
use crate::traits::StaticFileServer;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct DashboardState {
    store: Arc<RwLock<ReviewStore>>,
    submission_log: Arc<dyn SubmissionLog>,
    static_server: Arc<dyn StaticFileServer>,
    started_at: Instant,
    started_at_utc: DateTime<Utc>,
}

impl DashboardState {
    pub fn new(
        store: ReviewStore,
        submission_log: Arc<dyn SubmissionLog>,
        static_server: Arc<dyn StaticFileServer>,
    ) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            submission_log,
            static_server,
            started_at: Instant::now(),
            started_at_utc: Utc::now(),
        }
    }

    /// Read access to the current store
    pub async fn store(&self) -> RwLockReadGuard<'_, ReviewStore> {
        self.store.read().await
    }

    pub fn static_server(&self) -> &dyn StaticFileServer {
        self.static_server.as_ref()
    }

    /// Validate, persist and then publish a new review.
    ///
    /// The log write and the in-memory append run in their own task holding
    /// an owned write guard, so dropping the request future cannot leave a
    /// row on disk that the store never sees. A failed write leaves the
    /// store untouched.
    pub async fn submit(&self, review: NewReview) -> DashboardResult<ReviewRecord> {
        review.validate()?;

        let store = Arc::clone(&self.store);
        let log = Arc::clone(&self.submission_log);

        let task = tokio::spawn(async move {
            let mut store = store.write_owned().await;
            let record = tokio::task::spawn_blocking(move || log.append(review))
                .await
                .map_err(|e| DashboardError::internal(format!("Submission task failed: {e}")))??;

            store.append(record.clone());
            process_info!(
                ProcessId::current(),
                "⭐ Review added ({} records, {} submitted)",
                store.len(),
                store.submissions().len()
            );

            Ok::<_, DashboardError>(record)
        });

        task.await
            .map_err(|e| DashboardError::internal(format!("Submission task failed: {e}")))?
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at_utc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::MockStaticFileServer;
    use reviews::traits::MockSubmissionLog;
    use reviews::ReviewsError;

    fn new_review(rating: f64) -> NewReview {
        NewReview {
            store_address: "1 Main St, Springfield, IL".to_string(),
            rating,
            review: None,
            latitude: 39.7,
            longitude: -89.6,
        }
    }

    fn state_with_log(log: MockSubmissionLog) -> DashboardState {
        DashboardState::new(
            ReviewStore::default(),
            Arc::new(log),
            Arc::new(MockStaticFileServer::new()),
        )
    }

    #[tokio::test]
    async fn test_submit_appends_after_write() {
        let mut log = MockSubmissionLog::new();
        log.expect_append().times(1).returning(|review| Ok(review.into_record()));
        let state = state_with_log(log);

        let record = state.submit(new_review(4.5)).await.unwrap();

        assert_eq!(record.region(), Some("IL"));
        let store = state.store().await;
        assert_eq!(store.submissions().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_submission_never_reaches_log() {
        let mut log = MockSubmissionLog::new();
        log.expect_append().never();
        let state = state_with_log(log);

        let result = state.submit(new_review(4.2)).await;

        assert!(matches!(result, Err(DashboardError::Reviews(ReviewsError::InvalidSubmission { .. }))));
        assert!(state.store().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_store_unchanged() {
        let mut log = MockSubmissionLog::new();
        log.expect_append().returning(|_| {
            Err(ReviewsError::SubmissionWrite {
                path: "submitted_reviews.csv".to_string(),
                source: std::io::Error::other("read-only"),
            })
        });
        let state = state_with_log(log);

        let result = state.submit(new_review(3.0)).await;

        assert!(matches!(result, Err(DashboardError::Reviews(ReviewsError::SubmissionWrite { .. }))));
        assert!(state.store().await.is_empty());
    }
}
