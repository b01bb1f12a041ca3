use std::collections::BTreeSet;

use chrono::NaiveDate;

use super::model::{CategoryField, ClaimDataset, ClaimRecord};

// ---------------------------------------------------------------------------
// Interval – inclusive range with optionally open ends
// ---------------------------------------------------------------------------

/// Inclusive `[lower, upper]` range; a `None` bound is unbounded on that side.
/// An inverted range contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval<T> {
    pub lower: Option<T>,
    pub upper: Option<T>,
}

impl<T: PartialOrd> Interval<T> {
    pub fn new(lower: T, upper: T) -> Self {
        Interval {
            lower: Some(lower),
            upper: Some(upper),
        }
    }

    pub fn unbounded() -> Self {
        Interval {
            lower: None,
            upper: None,
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.lower.as_ref().map_or(true, |lo| lo <= value)
            && self.upper.as_ref().map_or(true, |hi| value <= hi)
    }
}

// ---------------------------------------------------------------------------
// FilterSpec – the current filter selection
// ---------------------------------------------------------------------------

/// Immutable filter selection. An empty category set matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub statuses: BTreeSet<String>,
    pub claim_types: BTreeSet<String>,
    pub specialties: BTreeSet<String>,
    pub dates: Interval<NaiveDate>,
    pub ages: Interval<u32>,
}

impl FilterSpec {
    /// Every category selected and both ranges spanning the data: the
    /// dashboard's initial state.
    pub fn everything(dataset: &ClaimDataset) -> Self {
        let facets = dataset.facets();
        let collect = |vals: &[String]| vals.iter().cloned().collect::<BTreeSet<_>>();
        FilterSpec {
            statuses: collect(&facets.statuses),
            claim_types: collect(&facets.claim_types),
            specialties: collect(&facets.specialties),
            dates: facets
                .date_bounds
                .map_or_else(Interval::unbounded, |(lo, hi)| Interval::new(lo, hi)),
            ages: facets
                .age_bounds
                .map_or_else(Interval::unbounded, |(lo, hi)| Interval::new(lo, hi)),
        }
    }

    pub fn selected(&self, field: CategoryField) -> &BTreeSet<String> {
        match field {
            CategoryField::Status => &self.statuses,
            CategoryField::ClaimType => &self.claim_types,
            CategoryField::Specialty => &self.specialties,
        }
    }

    /// Copy of this spec with one category selection replaced.
    pub fn with_selected(&self, field: CategoryField, values: BTreeSet<String>) -> Self {
        let mut next = self.clone();
        match field {
            CategoryField::Status => next.statuses = values,
            CategoryField::ClaimType => next.claim_types = values,
            CategoryField::Specialty => next.specialties = values,
        }
        next
    }

    pub fn with_dates(&self, dates: Interval<NaiveDate>) -> Self {
        FilterSpec {
            dates,
            ..self.clone()
        }
    }

    pub fn with_ages(&self, ages: Interval<u32>) -> Self {
        FilterSpec {
            ages,
            ..self.clone()
        }
    }

    /// Whether a single record passes every predicate.
    ///
    /// An undated or ageless record never passes: both range predicates are
    /// always active.
    pub fn matches(&self, record: &ClaimRecord) -> bool {
        CategoryField::ALL
            .iter()
            .all(|&field| self.selected(field).contains(field.value_of(record)))
            && record.date.is_some_and(|d| self.dates.contains(&d))
            && record.age.is_some_and(|a| self.ages.contains(&a))
    }
}

// ---------------------------------------------------------------------------
// FilteredView – rows of a dataset passing a spec
// ---------------------------------------------------------------------------

/// Ordered subsequence of a dataset, stored as row indices.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a ClaimDataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// View over every row, with no predicate applied.
    pub fn all(dataset: &'a ClaimDataset) -> Self {
        FilteredView {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Records in dataset order.
    pub fn iter(&self) -> impl Iterator<Item = &'a ClaimRecord> + '_ {
        let records = self.dataset.records();
        self.indices.iter().map(move |&i| &records[i])
    }
}

/// Return the view of `dataset` whose records pass all of `spec`'s predicates.
pub fn apply<'a>(dataset: &'a ClaimDataset, spec: &FilterSpec) -> FilteredView<'a> {
    let indices = dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, record)| spec.matches(record))
        .map(|(i, _)| i)
        .collect();
    FilteredView { dataset, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{claim, sample_dataset};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn everything_keeps_all_rows_in_order() {
        let ds = sample_dataset();
        let view = apply(&ds, &FilterSpec::everything(&ds));
        assert_eq!(view.indices(), &[0, 1, 2]);
    }

    #[test]
    fn apply_is_idempotent() {
        let ds = sample_dataset();
        let spec = FilterSpec::everything(&ds).with_ages(Interval::new(45, 70));
        let first = apply(&ds, &spec);
        let second = apply(&ds, &spec);
        assert_eq!(first.indices(), second.indices());
        assert_eq!(first.indices(), &[1, 2]);
    }

    #[test]
    fn empty_category_selection_matches_nothing() {
        let ds = sample_dataset();
        let spec = FilterSpec::everything(&ds).with_selected(CategoryField::Status, BTreeSet::new());
        assert!(apply(&ds, &spec).is_empty());
    }

    #[test]
    fn predicates_combine_with_and() {
        let ds = sample_dataset();
        let spec = FilterSpec::everything(&ds)
            .with_selected(CategoryField::Status, BTreeSet::from(["Approved".to_string()]))
            .with_selected(CategoryField::Specialty, BTreeSet::from(["CardioSpec".to_string()]));
        assert_eq!(apply(&ds, &spec).indices(), &[0]);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let ds = sample_dataset();
        let spec = FilterSpec::everything(&ds)
            .with_dates(Interval::new(date(2024, 1, 20), date(2024, 2, 10)));
        assert_eq!(apply(&ds, &spec).indices(), &[1, 2]);
    }

    #[test]
    fn age_bounds_are_inclusive() {
        let ds = sample_dataset();
        let spec = FilterSpec::everything(&ds).with_ages(Interval::new(40, 50));
        assert_eq!(apply(&ds, &spec).indices(), &[0, 1]);
    }

    #[test]
    fn inverted_intervals_match_nothing() {
        let ds = sample_dataset();
        let base = FilterSpec::everything(&ds);
        let dates = base.with_dates(Interval::new(date(2024, 2, 1), date(2024, 1, 1)));
        let ages = base.with_ages(Interval::new(60, 40));
        assert!(apply(&ds, &dates).is_empty());
        assert!(apply(&ds, &ages).is_empty());
    }

    #[test]
    fn undated_rows_never_pass_the_date_predicate() {
        let ds = ClaimDataset::from_records(vec![
            claim("C1", "Approved", "A", "S", None, 30, 10.0),
            claim("C2", "Approved", "A", "S", Some((2024, 3, 3)), 30, 10.0),
        ]);
        let open = FilterSpec::everything(&ds).with_dates(Interval::unbounded());
        assert_eq!(apply(&ds, &open).indices(), &[1]);
        assert_eq!(FilteredView::all(&ds).len(), 2);
    }

    #[test]
    fn ageless_rows_never_pass_the_age_predicate() {
        let mut ageless = claim("C1", "Approved", "A", "S", Some((2024, 3, 3)), 0, 10.0);
        ageless.age = None;
        let ds = ClaimDataset::from_records(vec![
            ageless,
            claim("C2", "Approved", "A", "S", Some((2024, 3, 3)), 30, 10.0),
        ]);
        let open = FilterSpec::everything(&ds).with_ages(Interval::unbounded());
        assert_eq!(apply(&ds, &open).indices(), &[1]);
    }

    #[test]
    fn view_iterates_in_dataset_order() {
        let ds = sample_dataset();
        let spec = FilterSpec::everything(&ds)
            .with_selected(CategoryField::ClaimType, BTreeSet::from(["TypeA".to_string()]));
        let ids: Vec<&str> = apply(&ds, &spec).iter().map(|r| r.claim_id.as_str()).collect();
        assert_eq!(ids, vec!["C1", "C3"]);
    }
}
