use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::{CategoryField, FacetOptions};

/// Colour for series that are not split by category (trend line, ages).
pub const ACCENT: Color32 = Color32::from_rgb(66, 135, 245);

// ---------------------------------------------------------------------------
// Category colours: (field, label) → Color32
// ---------------------------------------------------------------------------

/// Assigns each category label a colour once, from the full facet options,
/// so a bar keeps its colour while filters change.
#[derive(Debug, Clone, Default)]
pub struct CategoryColors {
    mapping: HashMap<(CategoryField, String), Color32>,
}

impl CategoryColors {
    pub fn new(facets: &FacetOptions) -> Self {
        let mut mapping = HashMap::new();
        for field in CategoryField::ALL {
            let values = facets.values(field);
            // Hues spread evenly around the wheel, per field.
            let step = 360.0 / values.len().max(1) as f32;
            for (i, value) in values.iter().enumerate() {
                let rgb: Srgb = Hsl::new(i as f32 * step, 0.65, 0.55).into_color();
                let (r, g, b) = rgb.into_format::<u8>().into_components();
                mapping.insert((field, value.clone()), Color32::from_rgb(r, g, b));
            }
        }
        CategoryColors { mapping }
    }

    /// Look up the colour for a label, grey if it was never seen at load time.
    pub fn color_for(&self, field: CategoryField, label: &str) -> Color32 {
        self.mapping
            .get(&(field, label.to_string()))
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_label_in_a_field_gets_its_own_colour() {
        let facets = FacetOptions {
            claim_types: vec!["Inpatient".into(), "Outpatient".into(), "Emergency".into()],
            ..FacetOptions::default()
        };
        let colors = CategoryColors::new(&facets);
        let inpatient = colors.color_for(CategoryField::ClaimType, "Inpatient");
        let outpatient = colors.color_for(CategoryField::ClaimType, "Outpatient");
        let emergency = colors.color_for(CategoryField::ClaimType, "Emergency");
        assert_ne!(inpatient, outpatient);
        assert_ne!(outpatient, emergency);
        assert_ne!(inpatient, Color32::GRAY);
    }

    #[test]
    fn unknown_labels_fall_back_to_grey() {
        let facets = FacetOptions {
            statuses: vec!["Approved".into(), "Denied".into()],
            ..FacetOptions::default()
        };
        let colors = CategoryColors::new(&facets);
        assert_ne!(colors.color_for(CategoryField::Status, "Approved"), Color32::GRAY);
        assert_eq!(colors.color_for(CategoryField::Status, "Pending"), Color32::GRAY);
        assert_eq!(colors.color_for(CategoryField::ClaimType, "Approved"), Color32::GRAY);
    }
}
