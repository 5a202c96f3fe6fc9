//! Aggregation Module
//! Daily profit/loss sums, popularity counts, and the fraud predicate.

use polars::prelude::*;

use super::PipelineError;

/// Summed profit/loss per distinct order date, ascending. Dates are already
/// formatted `YYYY-MM-DD` for the chart's category axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyProfitLoss {
    pub dates: Vec<String>,
    pub totals: Vec<f64>,
}

/// Order count per distinct value of one column, descending by count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopularityCount {
    pub labels: Vec<String>,
    pub counts: Vec<u32>,
}

/// Derive `profit_loss = total_price - cost_price` per row, group by order
/// date and sum. An empty frame yields an empty aggregate, never an error.
pub fn daily_profit_loss(df: &DataFrame) -> Result<DailyProfitLoss, PipelineError> {
    let daily = df
        .clone()
        .lazy()
        .with_column((col("total_price") - col("cost_price")).alias("profit_loss"))
        .group_by([col("order_date")])
        .agg([col("profit_loss").sum()])
        .sort(["order_date"], SortMultipleOptions::default())
        .with_column(col("order_date").dt().to_string("%Y-%m-%d").alias("date_label"))
        .collect()?;

    let dates: Vec<String> = daily
        .column("date_label")?
        .str()?
        .into_iter()
        .map(|s| s.unwrap_or_default().to_string())
        .collect();
    let totals: Vec<f64> = daily
        .column("profit_loss")?
        .cast(&DataType::Float64)?
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(0.0))
        .collect();

    Ok(DailyProfitLoss { dates, totals })
}

/// Count rows per distinct value of `column` (`product_name` or `category`).
pub fn popularity(df: &DataFrame, column: &str) -> Result<PopularityCount, PipelineError> {
    let counted = df
        .clone()
        .lazy()
        .filter(col(column).is_not_null())
        .group_by([col(column)])
        .agg([len().alias("count")])
        .sort(
            ["count"],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .collect()?;

    let labels: Vec<String> = (0..counted.height())
        .filter_map(|i| {
            let val = counted.column(column).ok()?.get(i).ok()?;
            if val.is_null() {
                None
            } else {
                Some(val.to_string().trim_matches('"').to_string())
            }
        })
        .collect();
    let counts: Vec<u32> = counted
        .column("count")?
        .cast(&DataType::UInt32)?
        .u32()?
        .into_iter()
        .map(|v| v.unwrap_or(0))
        .collect();

    Ok(PopularityCount { labels, counts })
}

/// Rows whose `total_discount` strictly exceeds the threshold. A discount
/// equal to the threshold is not flagged.
pub fn flag_fraud(df: &DataFrame, threshold: f64) -> Result<DataFrame, PipelineError> {
    let flagged = df
        .clone()
        .lazy()
        .filter(col("total_discount").gt(lit(threshold)))
        .collect()?;
    Ok(flagged)
}
