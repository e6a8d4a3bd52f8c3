//! Rating analytics
//!
//! Read-only reductions over any sequence of records. Nothing is cached;
//! each call walks its input again.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::record::ReviewRecord;

/// Mean and count of present ratings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    /// `None` when no record carries a rating
    pub mean: Option<f64>,
    pub count: usize,
}

impl RatingSummary {
    pub fn has_data(&self) -> bool {
        self.count > 0
    }
}

/// Mean rating for one region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionAverage {
    pub region: String,
    pub mean_rating: f64,
    pub count: usize,
}

/// Number of records carrying one exact rating value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingBucket {
    pub rating: f64,
    pub count: usize,
}

/// Everything the analytics panel shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub summary: RatingSummary,
    pub region_averages: Vec<RegionAverage>,
    pub rating_histogram: Vec<RatingBucket>,
}

/// Analytics engine for rating statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsEngine;

impl AnalyticsEngine {
    /// Create new analytics engine
    pub fn new() -> Self {
        Self
    }

    /// Mean and count over present ratings; absent ratings count toward neither
    pub fn summary<'a, I>(&self, records: I) -> RatingSummary
    where
        I: IntoIterator<Item = &'a ReviewRecord>,
    {
        let (sum, count) = records
            .into_iter()
            .filter_map(ReviewRecord::rating)
            .fold((0.0_f64, 0_usize), |(sum, count), rating| (sum + rating, count + 1));

        RatingSummary {
            mean: (count > 0).then(|| sum / count as f64),
            count,
        }
    }

    /// Per-region mean rating, highest first.
    ///
    /// Records without a region or without a rating are skipped, so a region
    /// whose records are all unrated does not appear. Equal means are ordered
    /// by region code.
    pub fn region_averages<'a, I>(&self, records: I) -> Vec<RegionAverage>
    where
        I: IntoIterator<Item = &'a ReviewRecord>,
    {
        let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

        for record in records {
            if let (Some(region), Some(rating)) = (record.region(), record.rating()) {
                let entry = totals.entry(region).or_insert((0.0, 0));
                entry.0 += rating;
                entry.1 += 1;
            }
        }

        let mut averages: Vec<RegionAverage> = totals
            .into_iter()
            .map(|(region, (sum, count))| RegionAverage {
                region: region.to_string(),
                mean_rating: sum / count as f64,
                count,
            })
            .collect();

        // BTreeMap iteration already sorted by code, and sort_by is stable
        averages.sort_by(|a, b| b.mean_rating.total_cmp(&a.mean_rating));
        averages
    }

    /// Frequency of each distinct rating value, lowest rating first
    pub fn rating_histogram<'a, I>(&self, records: I) -> Vec<RatingBucket>
    where
        I: IntoIterator<Item = &'a ReviewRecord>,
    {
        let mut ratings: Vec<f64> = records.into_iter().filter_map(ReviewRecord::rating).collect();
        ratings.sort_by(f64::total_cmp);

        let mut buckets: Vec<RatingBucket> = Vec::new();
        for rating in ratings {
            match buckets.last_mut() {
                Some(bucket) if bucket.rating == rating => bucket.count += 1,
                _ => buckets.push(RatingBucket { rating, count: 1 }),
            }
        }
        buckets
    }

    /// Full analytics report over the given records
    pub fn report<'a, I>(&self, records: I) -> AnalyticsReport
    where
        I: IntoIterator<Item = &'a ReviewRecord>,
        I::IntoIter: Clone,
    {
        let records = records.into_iter();

        AnalyticsReport {
            summary: self.summary(records.clone()),
            region_averages: self.region_averages(records.clone()),
            rating_histogram: self.rating_histogram(records),
        }
    }
}
