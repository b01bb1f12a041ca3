use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;

use super::model::{ClaimDataset, ClaimRecord};

/// Columns the backing store must provide. Any others are ignored.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "ClaimID",
    "PatientID",
    "ProviderID",
    "ClaimStatus",
    "ClaimType",
    "ProviderSpecialty",
    "ClaimDate",
    "PatientAge",
    "ClaimAmount",
];

const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%Y%m%d"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal problems reading the backing store. Unparseable dates, ages and
/// amounts are not errors: the cell is left empty and the row is kept.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open claims file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reading CSV header: {0}")]
    Header(#[source] csv::Error),

    #[error("CSV is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("CSV row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the claims dataset from a CSV file.
///
/// Meant to be called once at startup; the caller owns the result for the
/// lifetime of the process.
pub fn load_file(path: &Path) -> Result<ClaimDataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_reader(file)?;
    log::info!("Loaded {} claims from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Load the claims dataset from any CSV byte stream with a header row.
pub fn load_reader<R: Read>(reader: R) -> Result<ClaimDataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(LoadError::Header)?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == **col))
    {
        return Err(LoadError::MissingColumn(*missing));
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawClaim>().enumerate() {
        let raw = result.map_err(|source| LoadError::Row {
            row: row_no,
            source,
        })?;
        records.push(raw.into_record());
    }

    let dataset = ClaimDataset::from_records(records);
    for (column, missing) in [
        ("ClaimDate", dataset.undated_count()),
        ("PatientAge", dataset.ageless_count()),
        ("ClaimAmount", dataset.unpriced_count()),
    ] {
        if missing > 0 {
            log::warn!(
                "{missing} of {} claims have a blank or unparseable {column}; left empty",
                dataset.len()
            );
        }
    }
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV row layout
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawClaim {
    #[serde(rename = "ClaimID")]
    claim_id: String,
    #[serde(rename = "PatientID")]
    patient_id: String,
    #[serde(rename = "ProviderID")]
    provider_id: String,
    #[serde(rename = "ClaimStatus")]
    status: String,
    #[serde(rename = "ClaimType")]
    claim_type: String,
    #[serde(rename = "ProviderSpecialty")]
    specialty: String,
    #[serde(rename = "ClaimDate")]
    date: String,
    #[serde(rename = "PatientAge", deserialize_with = "csv::invalid_option")]
    age: Option<u32>,
    #[serde(rename = "ClaimAmount", deserialize_with = "csv::invalid_option")]
    amount: Option<f64>,
}

impl RawClaim {
    fn into_record(self) -> ClaimRecord {
        ClaimRecord {
            date: parse_claim_date(&self.date),
            claim_id: self.claim_id,
            patient_id: self.patient_id,
            provider_id: self.provider_id,
            status: self.status,
            claim_type: self.claim_type,
            specialty: self.specialty,
            age: self.age,
            amount: self.amount,
        }
    }
}

/// Parse a claim date, trying plain dates before timestamps.
/// Returns `None` for empty or unrecognised text.
pub fn parse_claim_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}
