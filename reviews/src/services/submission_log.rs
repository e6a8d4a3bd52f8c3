//! CSV-backed submission log
//!
//! Every append reads the whole log, adds one row and rewrites the file.
//! There is no locking: two processes appending at the same time can lose
//! a row, the last writer wins.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use shared::{ProcessId, process_debug, process_info};

use crate::core::record::{NewReview, ReviewRecord};
use crate::error::{ReviewsError, ReviewsResult};
use crate::services::csv_table::{COL_LATITUDE, COL_LONGITUDE, CsvTable, LOG_COLUMNS};
use crate::traits::SubmissionLog;

/// Submission log stored as a UTF-8 CSV file at a fixed path
#[derive(Debug, Clone)]
pub struct RealSubmissionLog {
    path: PathBuf,
}

impl RealSubmissionLog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> ReviewsResult<CsvTable> {
        if !self.path.exists() {
            return Ok(CsvTable::default());
        }

        let text = fs::read_to_string(&self.path).map_err(|e| self.read_error(e.to_string()))?;
        CsvTable::parse(&text).map_err(|e| self.read_error(e.to_string()))
    }

    /// Replace the log with `table`.
    ///
    /// The new contents go to a uniquely named temp file next to the log,
    /// which is then renamed over it, so overlapping writers never share a
    /// staging file and readers never see a partial write.
    fn write_table(&self, table: &CsvTable) -> ReviewsResult<()> {
        let write_error = |source| ReviewsError::SubmissionWrite {
            path: self.path.display().to_string(),
            source,
        };

        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(write_error)?;
                parent
            }
            None => Path::new("."),
        };

        let mut staging = NamedTempFile::new_in(dir).map_err(write_error)?;
        table
            .write_to(&mut staging)
            .map_err(|e| write_error(std::io::Error::other(e)))?;
        staging.persist(&self.path).map_err(|e| write_error(e.error))?;

        Ok(())
    }

    fn read_error(&self, message: String) -> ReviewsError {
        ReviewsError::SubmissionRead {
            path: self.path.display().to_string(),
            message,
        }
    }
}

impl SubmissionLog for RealSubmissionLog {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read_all(&self) -> ReviewsResult<Vec<ReviewRecord>> {
        let table = self.read_table()?;
        if table.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(column) = table.first_missing(&[COL_LATITUDE, COL_LONGITUDE]) {
            return Err(self.read_error(format!("missing column '{column}'")));
        }

        let converted = table.to_records();
        process_debug!(
            ProcessId::current(),
            "📥 Read {} submissions ({} dropped) from {}",
            converted.records.len(),
            converted.dropped,
            self.path.display()
        );
        Ok(converted.records)
    }

    fn append(&self, review: NewReview) -> ReviewsResult<ReviewRecord> {
        let record = review.into_record();

        let mut table = self.read_table()?;
        for column in LOG_COLUMNS {
            table.ensure_column(column);
        }
        table.push_record(&record);
        self.write_table(&table)?;

        process_info!(
            ProcessId::current(),
            "📝 Stored submission for '{}' ({} rows in {})",
            record.store_address().unwrap_or("<no address>"),
            table.row_count(),
            self.path.display()
        );

        Ok(record)
    }
}
