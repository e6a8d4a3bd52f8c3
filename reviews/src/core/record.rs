//! Review record data model
//!
//! A record's region code is derived from its store address and is never
//! set directly. Both the constructor and the address setter recompute it.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::core::region::extract_region;
use crate::error::{ReviewsError, ReviewsResult};

/// Text used whenever a review body is missing
pub const NO_REVIEW_PLACEHOLDER: &str = "No review provided";

/// Lowest rating a submission may carry
pub const MIN_SUBMITTED_RATING: f64 = 1.0;

/// Highest rating a submission may carry
pub const MAX_SUBMITTED_RATING: f64 = 5.0;

/// Granularity of submitted ratings
pub const SUBMITTED_RATING_STEP: f64 = 0.5;

static RATING_PATTERN: OnceLock<Regex> = OnceLock::new();

fn rating_pattern() -> &'static Regex {
    RATING_PATTERN.get_or_init(|| Regex::new(r"\d+(\.\d+)?").expect("rating pattern is valid"))
}

/// Extract the first decimal number from raw rating text such as `"4 stars"`.
///
/// Returns `None` when the text contains no decimal number.
pub fn parse_rating(raw: &str) -> Option<f64> {
    rating_pattern()
        .find(raw)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// One customer review of one store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRecord {
    store_address: Option<String>,
    rating: Option<f64>,
    review: String,
    latitude: f64,
    longitude: f64,
    region: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    extra: BTreeMap<String, String>,
}

impl ReviewRecord {
    /// Create a record, normalising empty text and deriving the region
    pub fn new(
        store_address: Option<String>,
        rating: Option<f64>,
        review: Option<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        let store_address = non_empty(store_address);
        let region = extract_region(store_address.as_deref());

        Self {
            store_address,
            rating,
            review: non_empty(review).unwrap_or_else(|| NO_REVIEW_PLACEHOLDER.to_string()),
            latitude,
            longitude,
            region,
            extra: BTreeMap::new(),
        }
    }

    /// Attach the source row's remaining columns
    pub fn with_extra(mut self, extra: BTreeMap<String, String>) -> Self {
        self.extra = extra;
        self
    }

    /// Replace the store address and recompute the region
    pub fn set_store_address(&mut self, store_address: Option<String>) {
        self.store_address = non_empty(store_address);
        self.region = extract_region(self.store_address.as_deref());
    }

    pub fn store_address(&self) -> Option<&str> {
        self.store_address.as_deref()
    }

    pub fn rating(&self) -> Option<f64> {
        self.rating
    }

    pub fn review(&self) -> &str {
        &self.review
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Columns of the source row that the model does not name
    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// A review submitted through the dashboard form or the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
    #[serde(default)]
    pub store_address: String,
    pub rating: f64,
    #[serde(default)]
    pub review: Option<String>,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

impl NewReview {
    /// Check the rating sits on the 1.0..=5.0 half-step scale and coordinates are numbers.
    ///
    /// Zero coordinates are accepted as-is.
    pub fn validate(&self) -> ReviewsResult<()> {
        if !self.rating.is_finite()
            || self.rating < MIN_SUBMITTED_RATING
            || self.rating > MAX_SUBMITTED_RATING
        {
            return Err(ReviewsError::invalid_submission(format!(
                "rating {} outside {MIN_SUBMITTED_RATING}..={MAX_SUBMITTED_RATING}",
                self.rating
            )));
        }

        if (self.rating / SUBMITTED_RATING_STEP).fract() != 0.0 {
            return Err(ReviewsError::invalid_submission(format!(
                "rating {} is not a multiple of {SUBMITTED_RATING_STEP}",
                self.rating
            )));
        }

        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(ReviewsError::invalid_submission("coordinates must be finite numbers"));
        }

        Ok(())
    }

    /// Convert into a stored record with its derived region
    pub fn into_record(self) -> ReviewRecord {
        ReviewRecord::new(
            Some(self.store_address),
            Some(self.rating),
            self.review,
            self.latitude,
            self.longitude,
        )
    }
}
