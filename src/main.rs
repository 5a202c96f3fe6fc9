//! OrderScope - E-commerce Order CSV Dashboard & Interactive Chart Viewer
//!
//! A Rust application for exploring e-commerce order CSVs: filter by
//! product, category and date, and chart daily profit/loss, popularity and
//! discount-flagged orders.

mod charts;
mod data;
mod gui;
mod pipeline;

use eframe::egui;
use gui::OrderScopeApp;

fn main() -> eframe::Result<()> {
    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1200.0, 700.0])
            .with_title("OrderScope"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "OrderScope",
        options,
        Box::new(|cc| Ok(Box::new(OrderScopeApp::new(cc)))),
    )
}
