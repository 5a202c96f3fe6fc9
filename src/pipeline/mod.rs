//! Transform pipeline - filters and aggregations over the order table.
//!
//! Every stage is a pure function of (DataFrame, selections): the GUI
//! re-runs the whole pipeline on each input change.

mod aggregates;
mod filters;

use polars::prelude::PolarsError;
use thiserror::Error;

pub use aggregates::{daily_profit_loss, flag_fraud, popularity, DailyProfitLoss, PopularityCount};
pub use filters::{apply_date_filter, apply_raw_filters, DateSelection, FilterSelection};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}
