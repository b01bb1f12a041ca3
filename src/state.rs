use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::color::CategoryColors;
use crate::data::aggregate::Dashboard;
use crate::data::filter::{apply, FilterSpec, Interval};
use crate::data::model::{CategoryField, ClaimDataset};

// ---------------------------------------------------------------------------
// Filter-control events
// ---------------------------------------------------------------------------

/// A single change made through one of the filter controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    Toggle(CategoryField, String),
    SelectAll(CategoryField),
    SelectNone(CategoryField),
    SetDateStart(NaiveDate),
    SetDateEnd(NaiveDate),
    SetAgeMin(u32),
    SetAgeMax(u32),
    Reset,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, shared read-only.
    dataset: Arc<ClaimDataset>,

    /// Current selection. Replaced, never edited, on every event.
    spec: FilterSpec,

    /// KPIs and series for `spec` (cached until the next event).
    dashboard: Dashboard,

    /// Rows passing `spec`.
    visible: usize,

    pub colors: CategoryColors,

    top_n: usize,
}

impl AppState {
    pub fn new(dataset: Arc<ClaimDataset>, top_n: usize) -> Self {
        let spec = FilterSpec::everything(&dataset);
        let colors = CategoryColors::new(dataset.facets());
        let mut state = AppState {
            dataset,
            spec,
            dashboard: Dashboard::default(),
            visible: 0,
            colors,
            top_n,
        };
        state.recompute();
        state
    }

    pub fn dataset(&self) -> &ClaimDataset {
        &self.dataset
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    /// Build the next spec from `event`, then refilter and re-aggregate.
    pub fn handle(&mut self, event: FilterEvent) {
        log::debug!("Filter event: {event:?}");
        self.spec = self.next_spec(event);
        self.recompute();
    }

    fn next_spec(&self, event: FilterEvent) -> FilterSpec {
        let facets = self.dataset.facets();
        match event {
            FilterEvent::Toggle(field, value) => {
                let mut selected = self.spec.selected(field).clone();
                if !selected.remove(&value) {
                    selected.insert(value);
                }
                self.spec.with_selected(field, selected)
            }
            FilterEvent::SelectAll(field) => {
                let all: BTreeSet<String> = facets.values(field).iter().cloned().collect();
                self.spec.with_selected(field, all)
            }
            FilterEvent::SelectNone(field) => self.spec.with_selected(field, BTreeSet::new()),
            FilterEvent::SetDateStart(start) => {
                let bounds = facets.date_bounds;
                let lower = clamp_to(start, bounds);
                let upper = self.spec.dates.upper.map(|end| end.max(lower));
                self.spec.with_dates(Interval {
                    lower: Some(lower),
                    upper,
                })
            }
            FilterEvent::SetDateEnd(end) => {
                let bounds = facets.date_bounds;
                let upper = clamp_to(end, bounds);
                let lower = self.spec.dates.lower.map(|start| start.min(upper));
                self.spec.with_dates(Interval {
                    lower,
                    upper: Some(upper),
                })
            }
            FilterEvent::SetAgeMin(min) => {
                let lower = clamp_to(min, facets.age_bounds);
                let upper = self.spec.ages.upper.map(|max| max.max(lower));
                self.spec.with_ages(Interval {
                    lower: Some(lower),
                    upper,
                })
            }
            FilterEvent::SetAgeMax(max) => {
                let upper = clamp_to(max, facets.age_bounds);
                let lower = self.spec.ages.lower.map(|min| min.min(upper));
                self.spec.with_ages(Interval {
                    lower,
                    upper: Some(upper),
                })
            }
            FilterEvent::Reset => FilterSpec::everything(&self.dataset),
        }
    }

    fn recompute(&mut self) {
        let view = apply(&self.dataset, &self.spec);
        self.visible = view.len();
        self.dashboard = Dashboard::compute(&view, self.top_n);
        log::debug!("{} of {} claims visible", self.visible, self.dataset.len());
    }
}

/// Keep a control value inside the data's range, when the data has one.
fn clamp_to<T: Ord + Copy>(value: T, bounds: Option<(T, T)>) -> T {
    match bounds {
        Some((lo, hi)) => value.clamp(lo, hi),
        None => value,
    }
}
