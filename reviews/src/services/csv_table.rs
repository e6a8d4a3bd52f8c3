//! Header-plus-rows view of a review CSV file
//!
//! Both the base dataset and the submission log go through this table so
//! that column handling (trimmed headers, extra columns, coordinate drop)
//! is identical for the two sources.

use std::collections::BTreeMap;
use std::io::Write;

use crate::core::record::{ReviewRecord, parse_rating};

pub const COL_STORE_ADDRESS: &str = "store_address";
pub const COL_RATING: &str = "rating";
pub const COL_REVIEW: &str = "review";
pub const COL_LATITUDE: &str = "latitude";
pub const COL_LONGITUDE: &str = "longitude";
pub const COL_REGION: &str = "region";

/// Columns the base dataset must provide
pub const DATASET_COLUMNS: [&str; 5] = [COL_STORE_ADDRESS, COL_RATING, COL_REVIEW, COL_LATITUDE, COL_LONGITUDE];

/// Columns the submission log is written with, in order
pub const LOG_COLUMNS: [&str; 6] = [
    COL_STORE_ADDRESS,
    COL_RATING,
    COL_REVIEW,
    COL_LATITUDE,
    COL_LONGITUDE,
    COL_REGION,
];

/// Decode ISO-8859-1 bytes; every byte maps to the code point of equal value
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Records converted from a table plus the number of rows dropped for missing coordinates
#[derive(Debug, Default)]
pub struct ConvertedRows {
    pub records: Vec<ReviewRecord>,
    pub dropped: usize,
}

/// In-memory CSV table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Parse comma-separated text with a header row; header names are trimmed.
    ///
    /// Short rows are padded with empty cells, so a row cut off before its
    /// coordinates is later dropped instead of failing the whole file.
    pub fn parse(text: &str) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let rows = reader
            .records()
            .map(|row| {
                row.map(|r| {
                    let mut cells: Vec<String> = r.iter().map(str::to_string).collect();
                    if cells.len() < headers.len() {
                        cells.resize(headers.len(), String::new());
                    }
                    cells
                })
            })
            .collect::<Result<Vec<Vec<String>>, _>>()?;

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    /// Index of a column by name
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// First of `names` that the table lacks
    pub fn first_missing<'a>(&self, names: &[&'a str]) -> Option<&'a str> {
        names.iter().copied().find(|name| self.column(name).is_none())
    }

    /// Add a column filled with empty values if it is not present yet
    pub fn ensure_column(&mut self, name: &str) {
        if self.column(name).is_none() {
            self.headers.push(name.to_string());
            for row in &mut self.rows {
                row.push(String::new());
            }
        }
    }

    /// Append a record as a row, filling columns the record does not know with empty values
    pub fn push_record(&mut self, record: &ReviewRecord) {
        let row = self.headers.iter().map(|h| field_for(record, h)).collect();
        self.rows.push(row);
    }

    /// Convert rows into records.
    ///
    /// Ratings are re-parsed, missing reviews get the placeholder, and rows
    /// without both coordinates are dropped. A `region` column is ignored
    /// because the region is always derived from the address.
    pub fn to_records(&self) -> ConvertedRows {
        let address = self.column(COL_STORE_ADDRESS);
        let rating = self.column(COL_RATING);
        let review = self.column(COL_REVIEW);
        let latitude = self.column(COL_LATITUDE);
        let longitude = self.column(COL_LONGITUDE);

        let known: Vec<usize> = LOG_COLUMNS.iter().filter_map(|c| self.column(c)).collect();

        let mut converted = ConvertedRows::default();

        for row in &self.rows {
            let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(String::as_str);

            let (Some(lat), Some(lon)) = (parse_coordinate(cell(latitude)), parse_coordinate(cell(longitude))) else {
                converted.dropped += 1;
                continue;
            };

            let extra: BTreeMap<String, String> = self
                .headers
                .iter()
                .zip(row)
                .enumerate()
                .filter(|(i, _)| !known.contains(i))
                .map(|(_, (h, v))| (h.clone(), v.clone()))
                .collect();

            let record = ReviewRecord::new(
                cell(address).map(str::to_string),
                cell(rating).and_then(parse_rating),
                cell(review).map(str::to_string),
                lat,
                lon,
            )
            .with_extra(extra);

            converted.records.push(record);
        }

        converted
    }

    /// Write the table, header row first
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| !v.is_nan())
}

/// Format a decimal so whole numbers keep one fractional digit ("4.0")
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn field_for(record: &ReviewRecord, column: &str) -> String {
    match column {
        COL_STORE_ADDRESS => record.store_address().unwrap_or_default().to_string(),
        COL_RATING => record.rating().map(format_decimal).unwrap_or_default(),
        COL_REVIEW => record.review().to_string(),
        COL_LATITUDE => format_decimal(record.latitude()),
        COL_LONGITUDE => format_decimal(record.longitude()),
        COL_REGION => record.region().unwrap_or_default().to_string(),
        other => record.extra().get(other).cloned().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::NO_REVIEW_PLACEHOLDER;

    const SAMPLE: &str = "\
 reviewer_id ,store_address,rating, review ,latitude,longitude
1,\"1 Main St, Springfield, IL 62701\",4 stars,Great fries,39.78,-89.65
2,\"2 Oak Ave, Austin, TX 78701\",1 star,,30.27,-97.74
3,\"3 Pine Rd, Nowhere\",unrated,Fine,,-90.0
4,\"4 Elm St, Dallas, TX\",3 stars,Slow,32.77,
";

    #[test]
    fn test_headers_are_trimmed() {
        let table = CsvTable::parse(SAMPLE).unwrap();
        assert_eq!(table.headers()[0], "reviewer_id");
        assert_eq!(table.column("review"), Some(3));
        assert_eq!(table.row_count(), 4);
        assert_eq!(table.first_missing(&DATASET_COLUMNS), None);
    }

    #[test]
    fn test_to_records_cleans_and_drops() {
        let table = CsvTable::parse(SAMPLE).unwrap();
        let converted = table.to_records();

        assert_eq!(converted.dropped, 2);
        assert_eq!(converted.records.len(), 2);

        let first = &converted.records[0];
        assert_eq!(first.rating(), Some(4.0));
        assert_eq!(first.region(), Some("IL"));
        assert_eq!(first.extra().get("reviewer_id").map(String::as_str), Some("1"));

        let second = &converted.records[1];
        assert_eq!(second.review(), NO_REVIEW_PLACEHOLDER);
        assert_eq!(second.region(), Some("TX"));
    }

    #[test]
    fn test_region_column_is_recomputed() {
        let text = "store_address,rating,review,latitude,longitude,region\n\"1 Main St, Springfield, IL\",4.0,ok,1.0,2.0,ZZ\n";
        let converted = CsvTable::parse(text).unwrap().to_records();

        assert_eq!(converted.records[0].region(), Some("IL"));
        assert!(converted.records[0].extra().is_empty());
    }

    #[test]
    fn test_missing_columns_reported() {
        let table = CsvTable::parse("store_address,rating\nx,1\n").unwrap();
        assert_eq!(table.first_missing(&DATASET_COLUMNS), Some("review"));
    }

    #[test]
    fn test_push_record_and_write() {
        let mut table = CsvTable::default();
        for column in LOG_COLUMNS {
            table.ensure_column(column);
        }
        let record = ReviewRecord::new(Some("1 Main St, Springfield, IL".to_string()), Some(4.0), None, 0.0, -1.5);
        table.push_record(&record);

        let mut out = Vec::new();
        table.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "store_address,rating,review,latitude,longitude,region\n\
             \"1 Main St, Springfield, IL\",4.0,No review provided,0.0,-1.5,IL\n"
        );
    }

    #[test]
    fn test_ensure_column_pads_rows() {
        let mut table = CsvTable::parse("a,b\n1,2\n").unwrap();
        table.ensure_column("c");
        table.ensure_column("a");
        assert_eq!(table.headers(), &["a", "b", "c"]);

        let mut out = Vec::new();
        table.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a,b,c\n1,2,\n");
    }

    #[test]
    fn test_short_rows_are_padded_and_dropped() {
        let text = "store_address,rating,review,latitude,longitude\n\"1 A St, Austin, TX\",4 stars\n\"2 B St, Dallas, TX\",5 stars,ok,32.0,-96.0\n";
        let table = CsvTable::parse(text).unwrap();
        assert_eq!(table.row_count(), 2);

        let converted = table.to_records();
        assert_eq!(converted.dropped, 1);
        assert_eq!(converted.records.len(), 1);
        assert_eq!(converted.records[0].rating(), Some(5.0));
    }

    #[test]
    fn test_decode_latin1() {
        assert_eq!(decode_latin1(b"caf\xe9"), "café");
        assert_eq!(decode_latin1(b"plain"), "plain");
    }

    #[test]
    fn test_format_decimal() {
        assert_eq!(format_decimal(4.0), "4.0");
        assert_eq!(format_decimal(4.5), "4.5");
        assert_eq!(format_decimal(-89.65), "-89.65");
    }
}
