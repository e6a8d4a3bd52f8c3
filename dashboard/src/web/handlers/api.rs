//! REST API handlers
//!
//! Every read handler runs the pure pipeline against the current store.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{Value, json};

use reviews::{
    AnalyticsReport, DashboardQuery, DashboardView, NewReview, RegionFilter, ReviewFilter, ReviewRecord,
    SortDirection, region_options, run_pipeline, store_analytics,
};

use crate::error::{DashboardError, DashboardResult};
use crate::state::DashboardState;

/// Query string accepted by `GET /api/reviews`
#[derive(Debug, Default, Deserialize)]
pub struct ReviewsParams {
    pub min_rating: Option<f64>,
    pub region: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
}

impl ReviewsParams {
    /// Build the pipeline query; absent parameters take the dashboard defaults
    pub fn into_query(self) -> DashboardResult<DashboardQuery> {
        let mut filter = ReviewFilter::default();

        if let Some(min_rating) = self.min_rating {
            if !min_rating.is_finite() {
                return Err(DashboardError::invalid_request("min_rating must be a number"));
            }
            filter = filter.with_min_rating(min_rating);
        }
        if let Some(region) = self.region {
            filter = filter.with_region(RegionFilter::from(region));
        }
        if let Some(search) = self.search.filter(|s| !s.is_empty()) {
            filter = filter.with_address_query(search);
        }

        let sort = match self.sort.as_deref() {
            None | Some("") => SortDirection::default(),
            Some(raw) => raw.parse::<SortDirection>().map_err(DashboardError::invalid_request)?,
        };

        Ok(DashboardQuery { filter, sort })
    }
}

/// Filtered review table, map and summary - `/api/reviews`
pub async fn get_reviews(
    State(state): State<DashboardState>,
    Query(params): Query<ReviewsParams>,
) -> DashboardResult<Json<DashboardView>> {
    let query = params.into_query()?;
    let store = state.store().await;
    Ok(Json(run_pipeline(&store, &query)))
}

/// Region selector options - `/api/regions`
pub async fn get_regions(State(state): State<DashboardState>) -> Json<Vec<String>> {
    let store = state.store().await;
    Json(region_options(&store))
}

/// Analytics over the whole store - `/api/analytics`
pub async fn get_analytics(State(state): State<DashboardState>) -> Json<AnalyticsReport> {
    let store = state.store().await;
    Json(store_analytics(&store))
}

/// Submit a review - `POST /api/reviews`
pub async fn submit_review(
    State(state): State<DashboardState>,
    Json(review): Json<NewReview>,
) -> DashboardResult<(StatusCode, Json<ReviewRecord>)> {
    let record = state.submit(review).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Health check endpoint - `/health`
pub async fn health_check(State(state): State<DashboardState>) -> Json<Value> {
    let store = state.store().await;

    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "started_at": state.started_at().to_rfc3339(),
        "uptime_seconds": state.uptime_seconds(),
        "records": {
            "base": store.base().len(),
            "submitted": store.submissions().len(),
            "total": store.len(),
        }
    }))
}
