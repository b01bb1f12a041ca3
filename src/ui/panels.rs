use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use crate::data::model::CategoryField;
use crate::state::{AppState, FilterEvent};
use crate::ui::format;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel. Changes are pushed onto `events` and
/// applied by the caller once the panel is drawn.
pub fn side_panel(ui: &mut Ui, state: &AppState, events: &mut Vec<FilterEvent>) {
    ui.heading("Filters");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for field in CategoryField::ALL {
                category_filter(ui, state, field, events);
            }
            ui.separator();
            date_filter(ui, state, events);
            ui.separator();
            age_filter(ui, state, events);
        });
}

fn category_filter(ui: &mut Ui, state: &AppState, field: CategoryField, events: &mut Vec<FilterEvent>) {
    let all_values = state.dataset().facets().values(field);
    let selected = state.spec().selected(field);

    // Show count of selected / total in the header
    let header_text = format!("{field}  ({}/{})", selected.len(), all_values.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(field)
        .default_open(field == CategoryField::Status)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    events.push(FilterEvent::SelectAll(field));
                }
                if ui.small_button("None").clicked() {
                    events.push(FilterEvent::SelectNone(field));
                }
            });

            for value in all_values {
                let text = RichText::new(value).color(state.colors.color_for(field, value));
                let mut checked = selected.contains(value);
                if ui.checkbox(&mut checked, text).changed() {
                    events.push(FilterEvent::Toggle(field, value.clone()));
                }
            }
        });
}

fn date_filter(ui: &mut Ui, state: &AppState, events: &mut Vec<FilterEvent>) {
    ui.strong("Claim Date");
    let dates = state.spec().dates;
    let (Some(mut start), Some(mut end)) = (dates.lower, dates.upper) else {
        ui.label("No parseable claim dates.");
        return;
    };

    egui::Grid::new("date_range").num_columns(2).show(ui, |ui: &mut Ui| {
        ui.label("From");
        if ui
            .add(DatePickerButton::new(&mut start).id_salt("date_from"))
            .changed()
        {
            events.push(FilterEvent::SetDateStart(start));
        }
        ui.end_row();

        ui.label("To");
        if ui
            .add(DatePickerButton::new(&mut end).id_salt("date_to"))
            .changed()
        {
            events.push(FilterEvent::SetDateEnd(end));
        }
        ui.end_row();
    });
}

fn age_filter(ui: &mut Ui, state: &AppState, events: &mut Vec<FilterEvent>) {
    ui.strong("Patient Age");
    let Some((age_min, age_max)) = state.dataset().facets().age_bounds else {
        ui.label("No claims loaded.");
        return;
    };
    let ages = state.spec().ages;
    let mut lower = ages.lower.unwrap_or(age_min);
    let mut upper = ages.upper.unwrap_or(age_max);

    if ui
        .add(egui::Slider::new(&mut lower, age_min..=age_max).text("min"))
        .changed()
    {
        events.push(FilterEvent::SetAgeMin(lower));
    }
    if ui
        .add(egui::Slider::new(&mut upper, age_min..=age_max).text("max"))
        .changed()
    {
        events.push(FilterEvent::SetAgeMax(upper));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar.
pub fn top_bar(ui: &mut Ui, state: &AppState, events: &mut Vec<FilterEvent>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        if ui.button("Reset filters").clicked() {
            events.push(FilterEvent::Reset);
        }

        ui.separator();

        ui.label(format!(
            "{} claims loaded, {} visible",
            format::count(state.dataset().len()),
            format::count(state.visible())
        ));

        let undated = state.dataset().undated_count();
        if undated > 0 {
            ui.separator();
            ui.label(RichText::new(format!("{undated} without a valid date")).weak());
        }
    });
}
