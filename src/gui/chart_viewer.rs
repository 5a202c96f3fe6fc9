//! Chart Viewer Widget
//! Renders a declarative `ChartOptions` description with egui_plot.
//! The viewer only reads the options structure; it never reaches back into
//! the pipeline.

use crate::charts::ChartOptions;
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints, Points};

const CHART_HEIGHT: f32 = 300.0;

/// Draws line and bar charts from chart options.
pub struct ChartViewer;

impl ChartViewer {
    /// Draw one chart card.
    pub fn show(ui: &mut egui::Ui, options: &ChartOptions) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&options.title.text).size(16.0).strong());
        });
        ui.add_space(5.0);

        if options.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(14.0).color(Color32::GRAY));
            });
            return;
        }

        let labels: Vec<String> = options.categories().to_vec();
        let values: Vec<f64> = options.values().to_vec();
        let series = &options.series[0];
        let color = parse_hex_color(&series.color).unwrap_or(Color32::LIGHT_BLUE);

        let x_labels = labels.clone();
        let plot = Plot::new(format!("chart_{}", options.title.text))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() < 1e-6 && idx < x_labels.len() {
                    x_labels[idx].clone()
                } else {
                    String::new()
                }
            });

        match series.series_type.as_str() {
            "bar" => {
                let bars: Vec<Bar> = values
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| Bar::new(i as f64, v).width(0.6).fill(color))
                    .collect();
                plot.show(ui, |plot_ui| {
                    plot_ui.bar_chart(BarChart::new(bars).color(color));
                });
            }
            _ => {
                let points: PlotPoints =
                    values.iter().enumerate().map(|(i, &v)| [i as f64, v]).collect();
                let markers: PlotPoints =
                    values.iter().enumerate().map(|(i, &v)| [i as f64, v]).collect();
                plot.show(ui, |plot_ui| {
                    plot_ui.line(Line::new(points).color(color).width(2.0));
                    plot_ui.points(Points::new(markers).radius(3.0).color(color));
                });
            }
        }
    }
}

/// `#RRGGBB` to a Color32.
fn parse_hex_color(hex: &str) -> Option<Color32> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color32::from_rgb(r, g, b))
}
