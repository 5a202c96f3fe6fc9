//! Control Panel Widget
//! Left side panel with file selection and all filter controls.

use crate::pipeline::{DateSelection, FilterSelection};
use chrono::NaiveDate;
use egui::{Color32, RichText, ScrollArea};
use egui_extras::DatePickerButton;
use std::path::PathBuf;

/// Which popularity chart to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopularityView {
    #[default]
    Product,
    Category,
}

/// Current state of every dashboard control.
#[derive(Clone)]
pub struct DashboardSettings {
    pub csv_path: Option<PathBuf>,
    pub view_by: PopularityView,
    pub fraud_threshold: u32,
    pub filter_by_date: bool,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            csv_path: None,
            view_by: PopularityView::default(),
            fraud_threshold: 100,
            filter_by_date: true,
            start_date: NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch"),
            end_date: NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch"),
        }
    }
}

/// Left side control panel with file selection and filter controls.
pub struct ControlPanel {
    pub settings: DashboardSettings,
    pub products: Vec<String>,
    pub categories: Vec<String>,
    pub selected_products: Vec<bool>,
    pub selected_categories: Vec<bool>,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: DashboardSettings::default(),
            products: Vec::new(),
            categories: Vec::new(),
            selected_products: Vec::new(),
            selected_categories: Vec::new(),
            status: "Upload your CSV file".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update available filter values after a CSV load. Selections reset to
    /// empty (pass-through) and the date pickers seed from the data bounds.
    pub fn update_filters(
        &mut self,
        products: Vec<String>,
        categories: Vec<String>,
        date_bounds: Option<(NaiveDate, NaiveDate)>,
    ) {
        self.selected_products = vec![false; products.len()];
        self.selected_categories = vec![false; categories.len()];
        self.products = products;
        self.categories = categories;
        if let Some((min, max)) = date_bounds {
            self.settings.start_date = min;
            self.settings.end_date = max;
        }
    }

    /// The pipeline inputs implied by the current widget state.
    pub fn filter_selection(&self) -> FilterSelection {
        FilterSelection {
            products: checked_values(&self.products, &self.selected_products),
            categories: checked_values(&self.categories, &self.selected_categories),
            date_range: if self.settings.filter_by_date {
                DateSelection::Range(self.settings.start_date, self.settings.end_date)
            } else {
                DateSelection::Unset
            },
        }
    }

    /// Draw the control panel.
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 OrderScope")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("E-commerce Order Dashboard")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        if self.products.is_empty() && self.categories.is_empty() {
            // Nothing loaded yet; only the upload prompt and status.
            ui.add_space(10.0);
            self.show_status(ui);
            return action;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Filters Section =====
        ui.label(RichText::new("🔍 Filters").size(14.0).strong());
        ui.add_space(8.0);

        ui.label("Select Product:");
        if Self::show_multiselect(
            ui,
            "product_filter",
            &self.products,
            &mut self.selected_products,
        ) {
            action = ControlPanelAction::InputsChanged;
        }

        ui.add_space(8.0);

        ui.label("Select Category:");
        if Self::show_multiselect(
            ui,
            "category_filter",
            &self.categories,
            &mut self.selected_categories,
        ) {
            action = ControlPanelAction::InputsChanged;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Date Range Section =====
        ui.label(RichText::new("📅 Date Range").size(14.0).strong());
        ui.add_space(5.0);

        if ui
            .checkbox(&mut self.settings.filter_by_date, "Apply date range")
            .changed()
        {
            action = ControlPanelAction::InputsChanged;
        }

        ui.add_enabled_ui(self.settings.filter_by_date, |ui| {
            ui.horizontal(|ui| {
                ui.label("From:");
                if ui
                    .add(DatePickerButton::new(&mut self.settings.start_date).id_salt("start_date"))
                    .changed()
                {
                    action = ControlPanelAction::InputsChanged;
                }
                ui.label("To:");
                if ui
                    .add(DatePickerButton::new(&mut self.settings.end_date).id_salt("end_date"))
                    .changed()
                {
                    action = ControlPanelAction::InputsChanged;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Popularity View Section =====
        ui.label(RichText::new("📈 View by").size(14.0).strong());
        ui.add_space(5.0);

        ui.horizontal(|ui| {
            if ui
                .radio_value(&mut self.settings.view_by, PopularityView::Product, "Product")
                .changed()
            {
                action = ControlPanelAction::InputsChanged;
            }
            if ui
                .radio_value(
                    &mut self.settings.view_by,
                    PopularityView::Category,
                    "Category",
                )
                .changed()
            {
                action = ControlPanelAction::InputsChanged;
            }
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Fraud Threshold Section =====
        ui.label(RichText::new("⚠ Discount Threshold").size(14.0).strong());
        ui.add_space(5.0);

        if ui
            .add(egui::Slider::new(&mut self.settings.fraud_threshold, 50..=500))
            .changed()
        {
            action = ControlPanelAction::InputsChanged;
        }
        ui.label(
            RichText::new("Orders discounted above this are flagged")
                .size(11.0)
                .color(Color32::GRAY),
        );

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        self.show_status(ui);

        action
    }

    /// Checkbox list with Select All / Clear All. Returns true on any change.
    fn show_multiselect(
        ui: &mut egui::Ui,
        id: &str,
        values: &[String],
        selected: &mut [bool],
    ) -> bool {
        let mut changed = false;

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .id_salt(id)
                    .max_height(120.0)
                    .show(ui, |ui| {
                        for (i, value) in values.iter().enumerate() {
                            if i < selected.len() && ui.checkbox(&mut selected[i], value).changed()
                            {
                                changed = true;
                            }
                        }
                    });
            });

        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                selected.iter_mut().for_each(|v| *v = true);
                changed = true;
            }
            if ui.small_button("Clear All").clicked() {
                selected.iter_mut().for_each(|v| *v = false);
                changed = true;
            }
        });

        changed
    }

    fn show_status(&self, ui: &mut egui::Ui) {
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Loaded") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));
    }

    /// Set the status line.
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

fn checked_values(values: &[String], selected: &[bool]) -> Vec<String> {
    values
        .iter()
        .zip(selected.iter())
        .filter(|(_, &on)| on)
        .map(|(v, _)| v.clone())
        .collect()
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    InputsChanged,
}
