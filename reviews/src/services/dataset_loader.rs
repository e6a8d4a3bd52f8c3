//! Base dataset loading and store assembly

use std::path::{Path, PathBuf};

use shared::{ProcessId, process_info, process_warn};

use crate::core::record::ReviewRecord;
use crate::core::store::ReviewStore;
use crate::error::{ReviewsError, ReviewsResult};
use crate::services::csv_table::{CsvTable, DATASET_COLUMNS, decode_latin1};
use crate::traits::{DatasetSource, SubmissionLog};

/// Reads the base dataset from an ISO-8859-1 encoded CSV file
#[derive(Debug, Clone)]
pub struct RealDatasetSource {
    path: PathBuf,
}

impl RealDatasetSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for RealDatasetSource {
    fn load_base(&self) -> ReviewsResult<Vec<ReviewRecord>> {
        let path = self.path.display().to_string();

        let bytes = std::fs::read(&self.path).map_err(|source| ReviewsError::DatasetUnavailable {
            path: path.clone(),
            source,
        })?;

        let table = CsvTable::parse(&decode_latin1(&bytes)).map_err(|e| ReviewsError::MalformedDataset {
            path: path.clone(),
            message: e.to_string(),
        })?;

        if let Some(column) = table.first_missing(&DATASET_COLUMNS) {
            return Err(ReviewsError::MissingColumn {
                path,
                column: column.to_string(),
            });
        }

        let converted = table.to_records();
        if converted.dropped > 0 {
            process_warn!(
                ProcessId::current(),
                "📍 Dropped {} rows without coordinates from {}",
                converted.dropped,
                path
            );
        }
        process_info!(ProcessId::current(), "📂 Loaded {} base reviews from {}", converted.records.len(), path);

        Ok(converted.records)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Merge persisted submissions into the store, returning how many were added
pub fn merge_submissions<L: SubmissionLog + ?Sized>(store: &mut ReviewStore, log: &L) -> ReviewsResult<usize> {
    if !log.exists() {
        return Ok(0);
    }

    let submissions = log.read_all()?;
    let count = submissions.len();
    store.extend_submissions(submissions);
    Ok(count)
}

/// Build the full store: base dataset first, then any persisted submissions.
///
/// A failing base load or a failing log read both propagate; callers that
/// want to keep serving the base set on a bad log should call
/// [`merge_submissions`] themselves.
pub fn load_store<D, L>(dataset: &D, log: &L) -> ReviewsResult<ReviewStore>
where
    D: DatasetSource + ?Sized,
    L: SubmissionLog + ?Sized,
{
    let mut store = ReviewStore::new(dataset.load_base()?);
    merge_submissions(&mut store, log)?;
    Ok(store)
}
