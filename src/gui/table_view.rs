//! Table View Widget
//! Renders a DataFrame as a striped grid, for the raw-data preview and the
//! flagged-orders table.

use egui::{Color32, RichText};
use polars::prelude::*;

const MAX_ROWS: usize = 200;

/// Draws order tables.
pub struct TableView;

impl TableView {
    /// Draw `df` as a striped grid. `id` must be unique per table on screen.
    pub fn show(ui: &mut egui::Ui, df: &DataFrame, id: &str) {
        if df.height() == 0 {
            ui.label(RichText::new("No rows").size(12.0).color(Color32::GRAY));
            return;
        }

        let columns = df.get_columns();
        let shown_rows = df.height().min(MAX_ROWS);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("table_{id}")))
                    .striped(true)
                    .min_col_width(70.0)
                    .spacing([10.0, 4.0])
                    .show(ui, |ui| {
                        for column in columns {
                            ui.label(RichText::new(column.name().as_str()).strong().size(11.0));
                        }
                        ui.end_row();

                        for row in 0..shown_rows {
                            for column in columns {
                                let text = column
                                    .get(row)
                                    .map(|v| v.to_string().trim_matches('"').to_string())
                                    .unwrap_or_default();
                                ui.label(RichText::new(text).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });

        if df.height() > shown_rows {
            ui.label(
                RichText::new(format!("... and {} more rows", df.height() - shown_rows))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }
    }
}
