//! Core business logic modules
//!
//! Pure business logic with no I/O dependencies

pub mod analytics;
pub mod filter;
pub mod pipeline;
pub mod record;
pub mod region;
pub mod store;

// Re-export commonly used types
pub use analytics::{AnalyticsEngine, AnalyticsReport, RatingBucket, RatingSummary, RegionAverage};
pub use filter::{ALL_REGIONS, DEFAULT_MIN_RATING, RegionFilter, ReviewFilter, available_regions};
pub use pipeline::{
    DashboardQuery, DashboardView, MapPoint, MapView, SortDirection, region_options, run_pipeline, store_analytics,
};
pub use record::{NO_REVIEW_PLACEHOLDER, NewReview, ReviewRecord, parse_rating};
pub use region::extract_region;
pub use store::ReviewStore;
