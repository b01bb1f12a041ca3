use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// ClaimRecord – one row of the claims table
// ---------------------------------------------------------------------------

/// A single insurance claim, validated once at load time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimRecord {
    pub claim_id: String,
    pub patient_id: String,
    pub provider_id: String,
    pub status: String,
    pub claim_type: String,
    pub specialty: String,
    /// `None` when the source text could not be parsed as a date.
    pub date: Option<NaiveDate>,
    /// `None` when the cell was blank or not a non-negative integer.
    pub age: Option<u32>,
    /// `None` when the cell was blank or not a number.
    pub amount: Option<f64>,
}

// ---------------------------------------------------------------------------
// CategoryField – the categorical columns a view can be grouped by
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryField {
    Status,
    ClaimType,
    Specialty,
}

impl CategoryField {
    pub const ALL: [CategoryField; 3] = [
        CategoryField::Status,
        CategoryField::ClaimType,
        CategoryField::Specialty,
    ];

    /// Borrow this field's value from a record.
    pub fn value_of(self, record: &ClaimRecord) -> &str {
        match self {
            CategoryField::Status => &record.status,
            CategoryField::ClaimType => &record.claim_type,
            CategoryField::Specialty => &record.specialty,
        }
    }
}

impl fmt::Display for CategoryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryField::Status => write!(f, "Claim Status"),
            CategoryField::ClaimType => write!(f, "Claim Type"),
            CategoryField::Specialty => write!(f, "Provider Specialty"),
        }
    }
}

// ---------------------------------------------------------------------------
// FacetOptions – the choices offered by each filter control
// ---------------------------------------------------------------------------

/// Everything a filter control needs to offer, derived from the data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FacetOptions {
    /// Unique values in order of first appearance.
    pub statuses: Vec<String>,
    pub claim_types: Vec<String>,
    pub specialties: Vec<String>,
    /// Earliest and latest parsed claim date; `None` if no date parsed.
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,
    /// Youngest and oldest patient age; `None` if no row has an age.
    pub age_bounds: Option<(u32, u32)>,
}

impl FacetOptions {
    pub fn values(&self, field: CategoryField) -> &[String] {
        match field {
            CategoryField::Status => &self.statuses,
            CategoryField::ClaimType => &self.claim_types,
            CategoryField::Specialty => &self.specialties,
        }
    }

    fn from_records(records: &[ClaimRecord]) -> Self {
        let mut facets = FacetOptions::default();

        for field in CategoryField::ALL {
            let mut seen: HashSet<&str> = HashSet::new();
            let values: Vec<String> = records
                .iter()
                .map(|r| field.value_of(r))
                .filter(|v| seen.insert(*v))
                .map(str::to_string)
                .collect();
            match field {
                CategoryField::Status => facets.statuses = values,
                CategoryField::ClaimType => facets.claim_types = values,
                CategoryField::Specialty => facets.specialties = values,
            }
        }

        let mut dates = records.iter().filter_map(|r| r.date);
        facets.date_bounds = dates.next().map(|first| {
            dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)))
        });

        let mut ages = records.iter().filter_map(|r| r.age);
        facets.age_bounds = ages.next().map(|first| {
            ages.fold((first, first), |(lo, hi), a| (lo.min(a), hi.max(a)))
        });

        facets
    }
}

// ---------------------------------------------------------------------------
// ClaimDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full, read-only claims table with pre-computed facet options.
#[derive(Debug, Clone)]
pub struct ClaimDataset {
    records: Vec<ClaimRecord>,
    facets: FacetOptions,
}

impl ClaimDataset {
    /// Build the facet index from the loaded records.
    pub fn from_records(records: Vec<ClaimRecord>) -> Self {
        let facets = FacetOptions::from_records(&records);
        ClaimDataset { records, facets }
    }

    pub fn records(&self) -> &[ClaimRecord] {
        &self.records
    }

    pub fn facets(&self) -> &FacetOptions {
        &self.facets
    }

    /// Number of claims.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows whose claim date could not be parsed.
    pub fn undated_count(&self) -> usize {
        self.records.iter().filter(|r| r.date.is_none()).count()
    }

    /// Rows without a usable patient age.
    pub fn ageless_count(&self) -> usize {
        self.records.iter().filter(|r| r.age.is_none()).count()
    }

    /// Rows without a usable claim amount.
    pub fn unpriced_count(&self) -> usize {
        self.records.iter().filter(|r| r.amount.is_none()).count()
    }
}
