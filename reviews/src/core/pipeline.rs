//! Dashboard pipeline
//!
//! `(store, query) -> view` as a single pure function. Every interaction
//! calls it again from scratch.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::core::analytics::{AnalyticsEngine, AnalyticsReport, RatingSummary};
use crate::core::filter::{ReviewFilter, available_regions, ALL_REGIONS};
use crate::core::record::ReviewRecord;
use crate::core::store::ReviewStore;

/// Direction for the rating column of the review table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(format!("Unknown sort direction: {s}")),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "ascending"),
            SortDirection::Descending => write!(f, "descending"),
        }
    }
}

/// Everything one interaction asks of the pipeline
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub filter: ReviewFilter,
    pub sort: SortDirection,
}

/// A store location on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Map layer for the filtered view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub points: Vec<MapPoint>,
}

/// Result of running the pipeline for one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Filtered records sorted for the table
    pub records: Vec<ReviewRecord>,
    /// `None` when nothing matched
    pub map: Option<MapView>,
    pub summary: RatingSummary,
    pub empty: bool,
}

/// Filter, sort and summarise the store for one query
pub fn run_pipeline(store: &ReviewStore, query: &DashboardQuery) -> DashboardView {
    let mut view = query.filter.apply(store.records());
    sort_for_table(&mut view, query.sort);

    let summary = AnalyticsEngine::new().summary(view.iter().copied());
    let map = build_map(&view);

    DashboardView {
        empty: view.is_empty(),
        records: view.into_iter().cloned().collect(),
        map,
        summary,
    }
}

/// Analytics over the whole store, independent of any filter
pub fn store_analytics(store: &ReviewStore) -> AnalyticsReport {
    AnalyticsEngine::new().report(store.records())
}

/// Region selector options: `"All"` followed by the sorted region codes
pub fn region_options(store: &ReviewStore) -> Vec<String> {
    std::iter::once(ALL_REGIONS.to_string())
        .chain(available_regions(store.records()))
        .collect()
}

/// Sort by region ascending, then rating in `direction`; missing values sort last
pub fn sort_for_table(records: &mut [&ReviewRecord], direction: SortDirection) {
    records.sort_by(|a, b| {
        missing_last(a.region(), b.region(), |x, y| x.cmp(y)).then_with(|| {
            missing_last(a.rating(), b.rating(), |x, y| match direction {
                SortDirection::Ascending => x.total_cmp(&y),
                SortDirection::Descending => y.total_cmp(&x),
            })
        })
    });
}

fn missing_last<T>(a: Option<T>, b: Option<T>, cmp: impl FnOnce(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn build_map(view: &[&ReviewRecord]) -> Option<MapView> {
    if view.is_empty() {
        return None;
    }

    let n = view.len() as f64;
    let points: Vec<MapPoint> = view
        .iter()
        .map(|r| MapPoint {
            latitude: r.latitude(),
            longitude: r.longitude(),
        })
        .collect();

    Some(MapView {
        center_latitude: points.iter().map(|p| p.latitude).sum::<f64>() / n,
        center_longitude: points.iter().map(|p| p.longitude).sum::<f64>() / n,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::RegionFilter;

    fn record(address: &str, rating: Option<f64>, lat: f64, lon: f64) -> ReviewRecord {
        ReviewRecord::new(Some(address.to_string()), rating, None, lat, lon)
    }

    fn store() -> ReviewStore {
        ReviewStore::new(vec![
            record("1 A St, Austin, TX", Some(4.0), 30.0, -97.0),
            record("2 B St, Chicago, IL", Some(5.0), 42.0, -88.0),
            record("3 C St, Dallas, TX", Some(3.0), 33.0, -97.0),
            record("4 D St, Nowhere", Some(4.5), 35.0, -100.0),
            record("5 E St, Peoria, IL", None, 40.0, -89.0),
        ])
    }

    #[test]
    fn test_table_sort_descending() {
        let view = run_pipeline(&store(), &DashboardQuery::default());

        let rows: Vec<_> = view.records.iter().map(|r| (r.region(), r.rating())).collect();
        assert_eq!(
            rows,
            vec![
                (Some("IL"), Some(5.0)),
                (Some("TX"), Some(4.0)),
                (Some("TX"), Some(3.0)),
                (None, Some(4.5)),
            ]
        );
        assert!(!view.empty);
    }

    #[test]
    fn test_table_sort_ascending() {
        let query = DashboardQuery {
            sort: SortDirection::Ascending,
            ..DashboardQuery::default()
        };
        let view = run_pipeline(&store(), &query);

        let tx: Vec<_> = view
            .records
            .iter()
            .filter(|r| r.region() == Some("TX"))
            .map(|r| r.rating())
            .collect();
        assert_eq!(tx, vec![Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_map_center_is_mean_of_view() {
        let query = DashboardQuery {
            filter: ReviewFilter::default().with_region(RegionFilter::Code("TX".to_string())),
            ..DashboardQuery::default()
        };
        let view = run_pipeline(&store(), &query);

        let map = view.map.unwrap();
        assert_eq!(map.points.len(), 2);
        assert_eq!(map.center_latitude, 31.5);
        assert_eq!(map.center_longitude, -97.0);
        assert_eq!(view.summary.mean, Some(3.5));
    }

    #[test]
    fn test_empty_view_has_no_map() {
        let query = DashboardQuery {
            filter: ReviewFilter::default().with_address_query("does not exist"),
            ..DashboardQuery::default()
        };
        let view = run_pipeline(&store(), &query);

        assert!(view.empty);
        assert!(view.records.is_empty());
        assert!(view.map.is_none());
        assert_eq!(view.summary.count, 0);
        assert_eq!(view.summary.mean, None);
    }

    #[test]
    fn test_region_options() {
        assert_eq!(region_options(&store()), vec!["All", "IL", "TX"]);
        assert_eq!(region_options(&ReviewStore::default()), vec!["All"]);
    }

    #[test]
    fn test_store_analytics_ignores_filters() {
        let report = store_analytics(&store());
        assert_eq!(report.summary.count, 4);
        assert_eq!(report.region_averages[0].region, "IL");
    }

    #[test]
    fn test_sort_direction_parsing() {
        assert_eq!("asc".parse::<SortDirection>().unwrap(), SortDirection::Ascending);
        assert_eq!("Descending".parse::<SortDirection>().unwrap(), SortDirection::Descending);
        assert!("sideways".parse::<SortDirection>().is_err());
    }
}
