//! Filter engine
//!
//! Pure predicates over review records. Filtering never reorders records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::core::record::ReviewRecord;

/// Minimum rating applied when the caller does not choose one
pub const DEFAULT_MIN_RATING: f64 = 3.0;

/// Selector value meaning "every region"
pub const ALL_REGIONS: &str = "All";

/// Region predicate
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum RegionFilter {
    #[default]
    All,
    Code(String),
}

impl RegionFilter {
    fn matches(&self, record: &ReviewRecord) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Code(code) => record.region() == Some(code.as_str()),
        }
    }
}

impl FromStr for RegionFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s == ALL_REGIONS {
            Ok(RegionFilter::All)
        } else {
            Ok(RegionFilter::Code(s.to_string()))
        }
    }
}

impl From<String> for RegionFilter {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(filter) => filter,
            Err(never) => match never {},
        }
    }
}

impl From<RegionFilter> for String {
    fn from(value: RegionFilter) -> Self {
        value.to_string()
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionFilter::All => write!(f, "{ALL_REGIONS}"),
            RegionFilter::Code(code) => write!(f, "{code}"),
        }
    }
}

/// Combined filter predicates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewFilter {
    /// Inclusive lower bound; records without a rating never pass
    pub min_rating: f64,
    pub region: RegionFilter,
    /// Case-insensitive substring of the store address; empty means no filter
    pub address_query: Option<String>,
}

impl Default for ReviewFilter {
    fn default() -> Self {
        Self {
            min_rating: DEFAULT_MIN_RATING,
            region: RegionFilter::All,
            address_query: None,
        }
    }
}

impl ReviewFilter {
    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = min_rating;
        self
    }

    pub fn with_region(mut self, region: RegionFilter) -> Self {
        self.region = region;
        self
    }

    pub fn with_address_query(mut self, query: impl Into<String>) -> Self {
        self.address_query = Some(query.into());
        self
    }

    /// Whether a single record satisfies every active predicate
    pub fn matches(&self, record: &ReviewRecord) -> bool {
        self.matches_rating(record) && self.region.matches(record) && self.matches_address(record)
    }

    /// Order-preserving subsequence of records that pass the filter
    pub fn apply<'a, I>(&self, records: I) -> Vec<&'a ReviewRecord>
    where
        I: IntoIterator<Item = &'a ReviewRecord>,
    {
        let needle = self.normalized_query();

        records
            .into_iter()
            .filter(|record| {
                self.matches_rating(record)
                    && self.region.matches(record)
                    && needle.as_deref().is_none_or(|n| address_contains(record, n))
            })
            .collect()
    }

    fn matches_rating(&self, record: &ReviewRecord) -> bool {
        record.rating().is_some_and(|rating| rating >= self.min_rating)
    }

    fn matches_address(&self, record: &ReviewRecord) -> bool {
        match self.normalized_query() {
            Some(needle) => address_contains(record, &needle),
            None => true,
        }
    }

    fn normalized_query(&self) -> Option<String> {
        self.address_query
            .as_deref()
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }
}

fn address_contains(record: &ReviewRecord, needle: &str) -> bool {
    record
        .store_address()
        .is_some_and(|address| address.to_lowercase().contains(needle))
}

/// Sorted distinct region codes present in the records
pub fn available_regions<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ReviewRecord>,
{
    records
        .into_iter()
        .filter_map(|record| record.region())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(address: Option<&str>, rating: Option<f64>) -> ReviewRecord {
        ReviewRecord::new(address.map(str::to_string), rating, None, 30.0, -90.0)
    }

    fn sample() -> Vec<ReviewRecord> {
        vec![
            record(Some("1 Main St, Austin, TX 78701"), Some(4.0)),
            record(Some("2 Oak Ave, Chicago, IL 60601"), Some(2.0)),
            record(Some("3 Pine Rd, Dallas, TX 75201"), Some(5.0)),
            record(None, Some(5.0)),
            record(Some("4 Elm St, Peoria, IL 61602"), None),
        ]
    }

    #[test]
    fn test_default_threshold_excludes_low_and_absent() {
        let records = sample();
        let view = ReviewFilter::default().apply(&records);

        let ratings: Vec<_> = view.iter().map(|r| r.rating()).collect();
        assert_eq!(ratings, vec![Some(4.0), Some(5.0), Some(5.0)]);
    }

    #[test]
    fn test_region_filter() {
        let records = sample();
        let filter = ReviewFilter::default()
            .with_min_rating(1.0)
            .with_region(RegionFilter::Code("TX".to_string()));

        let view = filter.apply(&records);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.region() == Some("TX")));
    }

    #[test]
    fn test_address_search_is_case_insensitive() {
        let records = sample();
        let filter = ReviewFilter::default().with_min_rating(1.0).with_address_query("main ST");

        let view = filter.apply(&records);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].store_address(), Some("1 Main St, Austin, TX 78701"));
    }

    #[test]
    fn test_empty_query_is_inactive() {
        let records = sample();
        let filter = ReviewFilter::default().with_address_query("");
        assert_eq!(filter.apply(&records).len(), ReviewFilter::default().apply(&records).len());
    }

    #[test]
    fn test_absent_address_never_matches_active_query() {
        let records = sample();
        let filter = ReviewFilter::default().with_address_query(" ");
        let view = filter.apply(&records);
        assert!(view.iter().all(|r| r.store_address().is_some()));
    }

    #[test]
    fn test_matches_agrees_with_apply() {
        let records = sample();
        let filter = ReviewFilter::default().with_region(RegionFilter::Code("TX".to_string()));
        let expected: Vec<_> = records.iter().filter(|r| filter.matches(r)).collect();
        assert_eq!(filter.apply(&records), expected);
    }

    #[test]
    fn test_threshold_monotonicity() {
        let records = sample();
        let mut previous = usize::MAX;
        for step in 2..=10 {
            let threshold = step as f64 * 0.5;
            let size = ReviewFilter::default().with_min_rating(threshold).apply(&records).len();
            assert!(size <= previous, "threshold {threshold} grew the view");
            previous = size;
        }
    }

    #[test]
    fn test_region_filter_parsing() {
        assert_eq!("All".parse::<RegionFilter>().unwrap(), RegionFilter::All);
        assert_eq!("".parse::<RegionFilter>().unwrap(), RegionFilter::All);
        assert_eq!("IL".parse::<RegionFilter>().unwrap(), RegionFilter::Code("IL".to_string()));
        assert_eq!(RegionFilter::Code("IL".to_string()).to_string(), "IL");
    }

    #[test]
    fn test_available_regions_sorted_distinct() {
        let records = sample();
        assert_eq!(available_regions(&records), vec!["IL".to_string(), "TX".to_string()]);
    }
}
