//! OrderScope Main Application
//! Main window wiring the control panel to the transform pipeline.
//!
//! The pipeline re-runs in full, synchronously, on every input change; the
//! result is a `DashboardView` the central panel draws from.

use crate::charts::{
    category_popularity_chart, daily_profit_loss_chart, product_popularity_chart, ChartOptions,
};
use crate::data::DataLoader;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, PopularityView, TableView};
use crate::pipeline::{self, FilterSelection};
use egui::{RichText, ScrollArea, SidePanel};
use polars::prelude::*;

const RAW_PREVIEW_ROWS: usize = 5;

/// Everything one pipeline run produces for display. Both popularity charts
/// are computed each pass; the view-by radio picks which one to draw.
pub struct DashboardView {
    pub raw_head: DataFrame,
    pub daily_chart: ChartOptions,
    pub product_chart: ChartOptions,
    pub category_chart: ChartOptions,
    pub fraud_orders: DataFrame,
}

/// Run the whole transform pipeline for the current selections.
///
/// The daily chart uses the fully filtered frame; popularity and fraud use
/// the product/category-filtered frame before date filtering, matching the
/// dashboard's established behavior.
fn build_view(
    df: &DataFrame,
    selection: &FilterSelection,
    fraud_threshold: u32,
) -> anyhow::Result<DashboardView> {
    let raw = pipeline::apply_raw_filters(df, selection)?;
    let dated = pipeline::apply_date_filter(&raw, selection.date_range)?;

    let daily = pipeline::daily_profit_loss(&dated)?;
    let by_product = pipeline::popularity(&raw, "product_name")?;
    let by_category = pipeline::popularity(&raw, "category")?;
    let fraud_orders = pipeline::flag_fraud(&raw, fraud_threshold as f64)?;

    Ok(DashboardView {
        raw_head: df.head(Some(RAW_PREVIEW_ROWS)),
        daily_chart: daily_profit_loss_chart(&daily),
        product_chart: product_popularity_chart(&by_product),
        category_chart: category_popularity_chart(&by_category),
        fraud_orders,
    })
}

/// Main application window.
pub struct OrderScopeApp {
    loader: DataLoader,
    control_panel: ControlPanel,
    view: Option<DashboardView>,
}

impl OrderScopeApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(),
            view: None,
        }
    }

    /// Handle CSV file selection.
    fn handle_browse_csv(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        else {
            return;
        };

        self.view = None;
        self.control_panel.settings.csv_path = Some(path.clone());

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.control_panel.set_status(&format!("Error: {e}"));
                return;
            }
        };

        match self.loader.load_bytes(&bytes) {
            Ok(df) => {
                let row_count = df.height();
                let column_count = df.width();
                self.control_panel.update_filters(
                    self.loader.get_unique_values("product_name"),
                    self.loader.get_unique_values("category"),
                    self.loader.date_bounds(),
                );
                self.control_panel
                    .set_status(&format!("Loaded {row_count} rows, {column_count} columns"));
                self.refresh();
            }
            Err(e) => {
                self.control_panel.set_status(&format!("Error: {e}"));
            }
        }
    }

    /// Re-run the pipeline against the current widget state.
    fn refresh(&mut self) {
        let Some(df) = self.loader.get_dataframe() else {
            return;
        };

        let selection = self.control_panel.filter_selection();
        let threshold = self.control_panel.settings.fraud_threshold;

        match build_view(df, &selection, threshold) {
            Ok(view) => self.view = Some(view),
            Err(e) => {
                self.view = None;
                self.control_panel.set_status(&format!("Error: {e}"));
            }
        }
    }

    fn show_dashboard(&self, ui: &mut egui::Ui) {
        let Some(view) = &self.view else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("Upload your CSV file to begin").size(20.0));
            });
            return;
        };

        ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            ui.label(RichText::new("Raw Data").size(16.0).strong());
            ui.add_space(5.0);
            TableView::show(ui, &view.raw_head, "raw_head");

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ChartViewer::show(ui, &view.daily_chart);

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            let popularity_chart = match self.control_panel.settings.view_by {
                PopularityView::Product => &view.product_chart,
                PopularityView::Category => &view.category_chart,
            };
            ChartViewer::show(ui, popularity_chart);

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.label(
                RichText::new("Potential Fraudulent Orders")
                    .size(16.0)
                    .strong(),
            );
            ui.add_space(5.0);
            TableView::show(ui, &view.fraud_orders, "fraud_orders");

            ui.add_space(20.0);
        });
    }
}

impl eframe::App for OrderScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::InputsChanged => self.refresh(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_dashboard(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::orders;
    use crate::pipeline::DateSelection;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn view_sections_come_from_the_right_frames() {
        // The high-discount row falls outside the date range: it must vanish
        // from the daily chart but still count for popularity and fraud.
        let df = orders(&[
            ("2024-01-01", "Widget", "Toys", 100.0, 80.0, 10.0),
            ("2024-01-05", "Lamp", "Home", 200.0, 120.0, 300.0),
        ]);
        let selection = FilterSelection {
            date_range: DateSelection::Range(date("2024-01-01"), date("2024-01-02")),
            ..Default::default()
        };

        let view = build_view(&df, &selection, 100).unwrap();

        assert_eq!(view.daily_chart.categories(), ["2024-01-01".to_string()]);
        assert_eq!(view.daily_chart.values(), [20.0]);

        let product_total: f64 = view.product_chart.values().iter().sum();
        assert_eq!(product_total, 2.0);

        assert_eq!(view.fraud_orders.height(), 1);
    }

    #[test]
    fn product_filter_narrows_every_section() {
        let df = orders(&[
            ("2024-01-01", "Widget", "Toys", 100.0, 80.0, 10.0),
            ("2024-01-01", "Gadget", "Toys", 50.0, 60.0, 500.0),
        ]);
        let selection = FilterSelection {
            products: vec!["Widget".to_string()],
            ..Default::default()
        };

        let view = build_view(&df, &selection, 100).unwrap();

        assert_eq!(view.daily_chart.values(), [20.0]);
        assert_eq!(view.product_chart.categories(), ["Widget".to_string()]);
        // Gadget's 500 discount is filtered out before the fraud predicate.
        assert_eq!(view.fraud_orders.height(), 0);
        // Raw preview shows the unfiltered head.
        assert_eq!(view.raw_head.height(), 2);
    }

    #[test]
    fn empty_table_produces_empty_view_without_error() {
        let df = orders(&[]);
        let view = build_view(&df, &FilterSelection::default(), 100).unwrap();
        assert!(view.daily_chart.is_empty());
        assert!(view.product_chart.is_empty());
        assert_eq!(view.fraud_orders.height(), 0);
    }
}
