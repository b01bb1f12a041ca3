use chrono::{Datelike, NaiveDate};
use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints};

use crate::color::{CategoryColors, ACCENT};
use crate::data::aggregate::{Kpis, Series};
use crate::data::model::CategoryField;
use crate::state::AppState;
use crate::ui::format;

const CHART_HEIGHT: f32 = 220.0;

// ---------------------------------------------------------------------------
// Central panel – KPIs and charts
// ---------------------------------------------------------------------------

/// Render the KPI metrics and every chart for the current selection.
pub fn dashboard_view(ui: &mut Ui, state: &AppState) {
    let dashboard = state.dashboard();

    ui.heading("Health Insurance Claims Dashboard");
    ui.add_space(6.0);
    kpi_grid(ui, &dashboard.kpis);
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Claims Analysis");

            category_chart(ui, "Claims by Status", CategoryField::Status, &dashboard.by_status, &state.colors);
            category_chart(ui, "Claims by Type", CategoryField::ClaimType, &dashboard.by_type, &state.colors);
            category_chart(
                ui,
                "Top Provider Specialties",
                CategoryField::Specialty,
                &dashboard.top_specialties,
                &state.colors,
            );
            trend_chart(ui, &dashboard.monthly_trend);
            age_chart(ui, &dashboard.age_histogram);
        });
}

fn kpi_grid(ui: &mut Ui, kpis: &Kpis) {
    egui::Grid::new("kpis")
        .num_columns(3)
        .spacing([48.0, 8.0])
        .show(ui, |ui: &mut Ui| {
            metric(ui, "Total Claims", format::count(kpis.total_count));
            metric(ui, "Total Claim Amount", format::currency(kpis.total_amount));
            metric(ui, "Avg Claim Amount", format::optional_currency(kpis.average_amount));
            ui.end_row();

            metric(ui, "Approval Rate", format::percent(kpis.approval_rate));
            metric(
                ui,
                "Unique Patients / Providers",
                format!(
                    "{} / {}",
                    format::count(kpis.distinct_patients),
                    format::count(kpis.distinct_providers)
                ),
            );
            ui.end_row();
        });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(24.0).strong());
    });
}

fn category_chart(
    ui: &mut Ui,
    title: &str,
    field: CategoryField,
    series: &Series<String>,
    colors: &CategoryColors,
) {
    ui.add_space(8.0);
    ui.strong(title);

    let bars: Vec<Bar> = series
        .iter()
        .enumerate()
        .map(|(i, (label, count))| {
            Bar::new(i as f64, *count as f64)
                .name(label)
                .fill(colors.color_for(field, label))
        })
        .collect();
    bar_plot(ui, title, BarChart::new(bars));

    // Bar labels, since the x axis only carries positions.
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (label, count) in series {
            let color = colors.color_for(field, label);
            ui.label(RichText::new(format!("■ {label} ({count})")).color(color));
        }
    });
}

fn trend_chart(ui: &mut Ui, series: &Series<NaiveDate>) {
    ui.add_space(8.0);
    ui.strong("Claims Trend Over Time");

    let points: PlotPoints = series
        .iter()
        .map(|(month, count)| [month_axis(*month), *count as f64])
        .collect();

    Plot::new("monthly_trend")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Claims")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(points).name("Claims per month").color(ACCENT).width(2.0));
        });
}

fn age_chart(ui: &mut Ui, series: &Series<u32>) {
    ui.add_space(8.0);
    ui.strong("Claims by Age Group");

    let bars: Vec<Bar> = series
        .iter()
        .map(|(age, count)| {
            Bar::new(*age as f64, *count as f64)
                .name(format!("age {age}"))
                .fill(ACCENT)
        })
        .collect();
    bar_plot(ui, "age_histogram", BarChart::new(bars).width(0.9));
}

fn bar_plot(ui: &mut Ui, id: &str, chart: BarChart) {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .y_axis_label("Claims")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

/// Fractional year for a month start, so months plot evenly spaced.
fn month_axis(month: NaiveDate) -> f64 {
    month.year() as f64 + month.month0() as f64 / 12.0
}
