//! Charts module - declarative chart options and their builders

mod options;

pub use options::{
    ChartAxis, ChartOptions, ChartSeries, ChartTitle, CATEGORY_BAR_COLOR, DAILY_LINE_COLOR,
    PRODUCT_BAR_COLOR,
};

use crate::pipeline::{DailyProfitLoss, PopularityCount};

/// Line chart of summed profit/loss per day.
pub fn daily_profit_loss_chart(daily: &DailyProfitLoss) -> ChartOptions {
    ChartOptions::line(
        "Daily Profit / Loss",
        daily.dates.clone(),
        daily.totals.clone(),
        DAILY_LINE_COLOR,
    )
}

/// Bar chart of order counts per product.
pub fn product_popularity_chart(popularity: &PopularityCount) -> ChartOptions {
    ChartOptions::bar(
        "Most Popular Products",
        popularity.labels.clone(),
        popularity.counts.iter().map(|&c| c as f64).collect(),
        PRODUCT_BAR_COLOR,
    )
}

/// Bar chart of order counts per category.
pub fn category_popularity_chart(popularity: &PopularityCount) -> ChartOptions {
    ChartOptions::bar(
        "Most Popular Categories",
        popularity.labels.clone(),
        popularity.counts.iter().map(|&c| c as f64).collect(),
        CATEGORY_BAR_COLOR,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_carry_pipeline_output_through_unchanged() {
        let daily = DailyProfitLoss {
            dates: vec!["2024-01-01".to_string()],
            totals: vec![10.0],
        };
        let chart = daily_profit_loss_chart(&daily);
        assert_eq!(chart.title.text, "Daily Profit / Loss");
        assert_eq!(chart.categories(), ["2024-01-01".to_string()]);
        assert_eq!(chart.values(), [10.0]);

        let pop = PopularityCount {
            labels: vec!["Toys".to_string(), "Home".to_string()],
            counts: vec![3, 1],
        };
        let chart = category_popularity_chart(&pop);
        assert_eq!(chart.series[0].series_type, "bar");
        assert_eq!(chart.series[0].color, CATEGORY_BAR_COLOR);
        assert_eq!(chart.values(), [3.0, 1.0]);
    }
}
