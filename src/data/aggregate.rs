use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::filter::FilteredView;
use super::model::CategoryField;

/// Number of specialties shown in the ranking chart.
pub const DEFAULT_TOP_N: usize = 10;

/// Status value counted as an approval.
pub const APPROVED: &str = "Approved";

/// Chart series: `(key, count)` pairs in display order.
pub type Series<K> = Vec<(K, usize)>;

// ---------------------------------------------------------------------------
// Scalar KPIs
// ---------------------------------------------------------------------------

pub fn total_count(view: &FilteredView<'_>) -> usize {
    view.len()
}

/// Sum of claim amounts, skipping missing ones; 0 for an empty view.
pub fn total_amount(view: &FilteredView<'_>) -> f64 {
    view.iter()
        .filter_map(|r| r.amount)
        .fold(0.0, |acc, amount| acc + amount)
}

/// Mean of the known claim amounts, or `None` when there are none.
pub fn average_amount(view: &FilteredView<'_>) -> Option<f64> {
    let (sum, n) = view
        .iter()
        .filter_map(|r| r.amount)
        .fold((0.0, 0usize), |(sum, n), amount| (sum + amount, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Percentage of claims with status [`APPROVED`], or `None` when the view is empty.
pub fn approval_rate(view: &FilteredView<'_>) -> Option<f64> {
    if view.is_empty() {
        return None;
    }
    let approved = view.iter().filter(|r| r.status == APPROVED).count();
    Some(approved as f64 / view.len() as f64 * 100.0)
}

pub fn distinct_patients(view: &FilteredView<'_>) -> usize {
    view.iter()
        .map(|r| r.patient_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

pub fn distinct_providers(view: &FilteredView<'_>) -> usize {
    view.iter()
        .map(|r| r.provider_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

// ---------------------------------------------------------------------------
// Chart series
// ---------------------------------------------------------------------------

/// Frequency table over a categorical field, most frequent first.
/// Equal counts keep the order in which the values were first seen.
pub fn count_by_category(view: &FilteredView<'_>, field: CategoryField) -> Series<String> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in view.iter() {
        let value = field.value_of(record);
        let count = counts.entry(value).or_insert_with(|| {
            order.push(value);
            0
        });
        *count += 1;
    }

    let mut series: Series<String> = order
        .into_iter()
        .map(|value| (value.to_string(), counts[value]))
        .collect();
    // `sort_by` is stable, so ties stay in first-seen order.
    series.sort_by(|a, b| b.1.cmp(&a.1));
    series
}

/// The `n` most frequent provider specialties.
pub fn top_n_specialties(view: &FilteredView<'_>, n: usize) -> Series<String> {
    let mut series = count_by_category(view, CategoryField::Specialty);
    series.truncate(n);
    series
}

/// Claims per calendar month, keyed by the first day of the month.
/// Undated claims are left out.
pub fn monthly_trend(view: &FilteredView<'_>) -> Series<NaiveDate> {
    let mut months: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for date in view.iter().filter_map(|r| r.date) {
        if let Some(month) = date.with_day(1) {
            *months.entry(month).or_default() += 1;
        }
    }
    months.into_iter().collect()
}

/// Claims per patient age, youngest first. Claims without an age are left out.
pub fn age_histogram(view: &FilteredView<'_>) -> Series<u32> {
    let mut ages: BTreeMap<u32, usize> = BTreeMap::new();
    for age in view.iter().filter_map(|r| r.age) {
        *ages.entry(age).or_default() += 1;
    }
    ages.into_iter().collect()
}

// ---------------------------------------------------------------------------
// Dashboard – everything the presentation layer renders for one spec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub total_count: usize,
    pub total_amount: f64,
    pub average_amount: Option<f64>,
    pub approval_rate: Option<f64>,
    pub distinct_patients: usize,
    pub distinct_providers: usize,
}

impl Kpis {
    pub fn compute(view: &FilteredView<'_>) -> Self {
        Kpis {
            total_count: total_count(view),
            total_amount: total_amount(view),
            average_amount: average_amount(view),
            approval_rate: approval_rate(view),
            distinct_patients: distinct_patients(view),
            distinct_providers: distinct_providers(view),
        }
    }
}

/// Owned snapshot of KPIs and chart series, detached from the dataset borrow.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dashboard {
    pub kpis: Kpis,
    pub by_status: Series<String>,
    pub by_type: Series<String>,
    pub top_specialties: Series<String>,
    pub monthly_trend: Series<NaiveDate>,
    pub age_histogram: Series<u32>,
}

impl Dashboard {
    pub fn compute(view: &FilteredView<'_>, top_n: usize) -> Self {
        Dashboard {
            kpis: Kpis::compute(view),
            by_status: count_by_category(view, CategoryField::Status),
            by_type: count_by_category(view, CategoryField::ClaimType),
            top_specialties: top_n_specialties(view, top_n),
            monthly_trend: monthly_trend(view),
            age_histogram: age_histogram(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::filter::{apply, FilterSpec, Interval};
    use crate::data::model::tests::{claim, sample_dataset};
    use crate::data::model::ClaimDataset;

    fn month(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn kpis_over_the_sample() {
        let ds = sample_dataset();
        let view = apply(&ds, &FilterSpec::everything(&ds));
        assert_eq!(total_count(&view), 3);
        assert!((total_amount(&view) - 600.0).abs() < 1e-9);
        assert!((average_amount(&view).unwrap() - 200.0).abs() < 1e-9);
        assert!((approval_rate(&view).unwrap() - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(distinct_patients(&view), 3);
        // Providers are keyed by specialty in the fixture.
        assert_eq!(distinct_providers(&view), 2);
    }

    #[test]
    fn empty_view_yields_sentinels() {
        let ds = sample_dataset();
        let spec = FilterSpec::everything(&ds).with_ages(Interval::new(90, 99));
        let view = apply(&ds, &spec);
        assert_eq!(total_count(&view), 0);
        assert_eq!(total_amount(&view), 0.0);
        assert_eq!(average_amount(&view), None);
        assert_eq!(approval_rate(&view), None);
        assert!(monthly_trend(&view).is_empty());
        assert!(count_by_category(&view, CategoryField::Status).is_empty());
    }

    #[test]
    fn status_counts_sum_to_total() {
        let ds = sample_dataset();
        let view = apply(&ds, &FilterSpec::everything(&ds));
        let by_status = count_by_category(&view, CategoryField::Status);
        assert_eq!(
            by_status,
            vec![("Approved".to_string(), 2), ("Denied".to_string(), 1)]
        );
        assert_eq!(by_status.iter().map(|(_, c)| c).sum::<usize>(), total_count(&view));
    }

    #[test]
    fn category_ties_keep_first_seen_order() {
        let ds = ClaimDataset::from_records(vec![
            claim("C1", "Pending", "A", "S", Some((2024, 1, 1)), 30, 1.0),
            claim("C2", "Denied", "A", "S", Some((2024, 1, 1)), 30, 1.0),
            claim("C3", "Approved", "A", "S", Some((2024, 1, 1)), 30, 1.0),
            claim("C4", "Approved", "A", "S", Some((2024, 1, 1)), 30, 1.0),
        ]);
        let view = FilteredView::all(&ds);
        let labels: Vec<String> = count_by_category(&view, CategoryField::Status)
            .into_iter()
            .map(|(label, _)| label)
            .collect();
        assert_eq!(labels, vec!["Approved", "Pending", "Denied"]);
    }

    #[test]
    fn top_n_truncates_to_the_most_frequent() {
        let specialties = ["A", "B", "B", "C", "C", "C", "D", "D", "D", "D"];
        let records = specialties
            .iter()
            .enumerate()
            .map(|(i, s)| claim(&format!("C{i}"), "Approved", "T", s, Some((2024, 1, 1)), 30, 1.0))
            .collect();
        let ds = ClaimDataset::from_records(records);
        let view = FilteredView::all(&ds);

        let top = top_n_specialties(&view, 2);
        assert_eq!(top, vec![("D".to_string(), 4), ("C".to_string(), 3)]);

        let all = count_by_category(&view, CategoryField::Specialty);
        let smallest_kept = top.iter().map(|(_, c)| *c).min().unwrap();
        assert!(all[top.len()..].iter().all(|(_, c)| *c <= smallest_kept));
        assert_eq!(top_n_specialties(&view, 10).len(), 4);
    }

    #[test]
    fn monthly_trend_buckets_by_month_start() {
        let ds = sample_dataset();
        let view = apply(&ds, &FilterSpec::everything(&ds));
        assert_eq!(monthly_trend(&view), vec![(month(2024, 1), 2), (month(2024, 2), 1)]);
    }

    #[test]
    fn undated_rows_count_toward_totals_but_not_the_trend() {
        let ds = ClaimDataset::from_records(vec![
            claim("C1", "Approved", "A", "S", Some((2023, 12, 31)), 30, 50.0),
            claim("C2", "Denied", "A", "S", None, 30, 25.0),
            claim("C3", "Approved", "A", "S", Some((2023, 11, 2)), 30, 25.0),
        ]);
        let view = FilteredView::all(&ds);
        assert_eq!(total_count(&view), 3);
        assert!((total_amount(&view) - 100.0).abs() < 1e-9);
        let trend = monthly_trend(&view);
        assert_eq!(trend, vec![(month(2023, 11), 1), (month(2023, 12), 1)]);
        assert_eq!(trend.iter().map(|(_, c)| c).sum::<usize>(), 2);
    }

    #[test]
    fn missing_amounts_are_skipped_by_sum_and_mean() {
        let mut unpriced = claim("C2", "Denied", "A", "S", Some((2024, 1, 2)), 30, 0.0);
        unpriced.amount = None;
        let ds = ClaimDataset::from_records(vec![
            claim("C1", "Approved", "A", "S", Some((2024, 1, 1)), 30, 100.0),
            unpriced,
            claim("C3", "Approved", "A", "S", Some((2024, 1, 3)), 30, 300.0),
        ]);
        let view = FilteredView::all(&ds);
        assert_eq!(total_count(&view), 3);
        assert!((total_amount(&view) - 400.0).abs() < 1e-9);
        assert!((average_amount(&view).unwrap() - 200.0).abs() < 1e-9);

        let mut only_unpriced = claim("C4", "Denied", "A", "S", None, 30, 0.0);
        only_unpriced.amount = None;
        let ds = ClaimDataset::from_records(vec![only_unpriced]);
        let view = FilteredView::all(&ds);
        assert_eq!(total_amount(&view), 0.0);
        assert_eq!(average_amount(&view), None);
    }

    #[test]
    fn age_histogram_is_ordered_by_age() {
        let ds = ClaimDataset::from_records(vec![
            claim("C1", "Approved", "A", "S", None, 70, 1.0),
            claim("C2", "Approved", "A", "S", None, 25, 1.0),
            claim("C3", "Approved", "A", "S", None, 70, 1.0),
            claim("C4", "Approved", "A", "S", None, 40, 1.0),
        ]);
        let view = FilteredView::all(&ds);
        assert_eq!(age_histogram(&view), vec![(25, 1), (40, 1), (70, 2)]);
    }

    #[test]
    fn dashboard_bundles_every_series() {
        let ds = sample_dataset();
        let view = apply(&ds, &FilterSpec::everything(&ds));
        let dash = Dashboard::compute(&view, DEFAULT_TOP_N);
        assert_eq!(dash.kpis.total_count, 3);
        assert_eq!(
            dash.by_type,
            vec![("TypeA".to_string(), 2), ("TypeB".to_string(), 1)]
        );
        assert_eq!(
            dash.top_specialties,
            vec![("CardioSpec".to_string(), 2), ("NeuroSpec".to_string(), 1)]
        );
        assert_eq!(dash.age_histogram, vec![(40, 1), (50, 1), (60, 1)]);
    }
}
