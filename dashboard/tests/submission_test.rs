//! Submission consistency tests
//!
//! A submission whose request is dropped mid-write must still end up both
//! in the log file and in the in-memory store.


use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use dashboard::{DashboardState, RealStaticFileServer};
use reviews::{NewReview, RealSubmissionLog, ReviewRecord, ReviewStore, ReviewsResult, SubmissionLog};

/// Submission log that pauses before every append
struct SlowLog {
    inner: RealSubmissionLog,
    delay: Duration,
}

impl SubmissionLog for SlowLog {
    fn exists(&self) -> bool {
        self.inner.exists()
    }

    fn read_all(&self) -> ReviewsResult<Vec<ReviewRecord>> {
        self.inner.read_all()
    }

    fn append(&self, review: NewReview) -> ReviewsResult<ReviewRecord> {
        std::thread::sleep(self.delay);
        self.inner.append(review)
    }
}

fn new_review() -> NewReview {
    NewReview {
        store_address: "9 Ocean Dr, Miami, FL 33139".to_string(),
        rating: 4.0,
        review: Some("Quick service".to_string()),
        latitude: 25.78,
        longitude: -80.13,
    }
}

/// Test that dropping a submit mid-write still publishes the stored row
#[tokio::test]
async fn test_cancelled_submit_still_reaches_store() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("submitted_reviews.csv");
    let state = DashboardState::new(
        ReviewStore::new(fixtures::base_records()),
        Arc::new(SlowLog {
            inner: RealSubmissionLog::new(&log_path),
            delay: Duration::from_millis(200),
        }),
        Arc::new(RealStaticFileServer::new(dir.path())),
    );

    let result = tokio::time::timeout(Duration::from_millis(50), state.submit(new_review())).await;
    assert!(result.is_err(), "submit should still be writing when the timeout fires");

    tokio::time::sleep(Duration::from_millis(500)).await;

    let on_disk = RealSubmissionLog::new(&log_path).read_all().unwrap();
    let store = state.store().await;
    assert_eq!(on_disk.len(), 1);
    assert_eq!(store.submissions().len(), on_disk.len());
    assert_eq!(store.submissions()[0].region(), Some("FL"));
}

/// Test that a submit queued behind a cancelled one still completes in order
#[tokio::test]
async fn test_submit_after_cancelled_submit() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("submitted_reviews.csv");
    let state = DashboardState::new(
        ReviewStore::default(),
        Arc::new(SlowLog {
            inner: RealSubmissionLog::new(&log_path),
            delay: Duration::from_millis(100),
        }),
        Arc::new(RealStaticFileServer::new(dir.path())),
    );

    let _ = tokio::time::timeout(Duration::from_millis(20), state.submit(new_review())).await;
    state.submit(new_review()).await.unwrap();

    assert_eq!(RealSubmissionLog::new(&log_path).read_all().unwrap().len(), 2);
    assert_eq!(state.store().await.submissions().len(), 2);
}
