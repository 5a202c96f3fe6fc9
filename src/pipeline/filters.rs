//! Filter Stage Module
//! Applies product/category membership and date-range filters to the order table.

use chrono::NaiveDate;
use polars::prelude::*;

use super::PipelineError;

/// User's date-picker state. Only a full range filters; a single date or a
/// cleared picker passes every row through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateSelection {
    #[default]
    Unset,
    Single(NaiveDate),
    Range(NaiveDate, NaiveDate),
}

/// Selected filter values. Empty product/category sets mean "no filter on
/// that dimension", not "match nothing".
#[derive(Debug, Clone, Default)]
pub struct FilterSelection {
    pub products: Vec<String>,
    pub categories: Vec<String>,
    pub date_range: DateSelection,
}

/// Keep rows whose `product_name`/`category` is a member of the respective
/// selection set. Row order is preserved; the input frame is not mutated.
pub fn apply_raw_filters(
    df: &DataFrame,
    selection: &FilterSelection,
) -> Result<DataFrame, PipelineError> {
    let mut lf = df.clone().lazy();

    if !selection.products.is_empty() {
        lf = lf.filter(col("product_name").is_in(lit(Series::new(
            "products".into(),
            selection.products.clone(),
        ))));
    }
    if !selection.categories.is_empty() {
        lf = lf.filter(col("category").is_in(lit(Series::new(
            "categories".into(),
            selection.categories.clone(),
        ))));
    }

    Ok(lf.collect()?)
}

/// Keep rows with `start <= order_date <= end`, inclusive both ends.
/// `Unset` and `Single` pass the frame through untouched.
pub fn apply_date_filter(
    df: &DataFrame,
    selection: DateSelection,
) -> Result<DataFrame, PipelineError> {
    let DateSelection::Range(start, end) = selection else {
        return Ok(df.clone());
    };

    let filtered = df
        .clone()
        .lazy()
        .filter(
            col("order_date")
                .gt_eq(date_lit(start))
                .and(col("order_date").lt_eq(date_lit(end))),
        )
        .collect()?;
    Ok(filtered)
}

/// A calendar date as a Polars `Date` literal (days since the Unix epoch).
fn date_lit(date: NaiveDate) -> Expr {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch");
    lit((date - epoch).num_days() as i32).cast(DataType::Date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::{dates_of, sample_orders};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn empty_selection_sets_pass_everything_through() {
        let df = sample_orders();
        let out = apply_raw_filters(&df, &FilterSelection::default()).unwrap();
        assert!(out.equals(&df));
    }

    #[test]
    fn product_filter_keeps_only_members() {
        let df = sample_orders();
        let selection = FilterSelection {
            products: vec!["Widget".to_string()],
            ..Default::default()
        };
        let out = apply_raw_filters(&df, &selection).unwrap();
        assert_eq!(out.height(), 2);
        let names = out.column("product_name").unwrap();
        for i in 0..out.height() {
            assert_eq!(names.get(i).unwrap().to_string().trim_matches('"'), "Widget");
        }
    }

    #[test]
    fn category_and_product_filters_compose() {
        let df = sample_orders();
        let selection = FilterSelection {
            products: vec!["Widget".to_string(), "Lamp".to_string()],
            categories: vec!["Home".to_string()],
            ..Default::default()
        };
        let out = apply_raw_filters(&df, &selection).unwrap();
        assert_eq!(out.height(), 1);
        assert_eq!(
            out.column("product_name")
                .unwrap()
                .get(0)
                .unwrap()
                .to_string()
                .trim_matches('"'),
            "Lamp"
        );
    }

    #[test]
    fn date_range_is_inclusive_at_both_ends() {
        let df = sample_orders();
        let out = apply_date_filter(
            &df,
            DateSelection::Range(date("2024-01-01"), date("2024-01-02")),
        )
        .unwrap();
        // Rows dated exactly on the endpoints stay.
        assert_eq!(out.height(), 3);
        assert_eq!(
            dates_of(&out),
            vec!["2024-01-01", "2024-01-01", "2024-01-02"]
        );
    }

    #[test]
    fn single_date_and_unset_do_not_filter() {
        let df = sample_orders();
        let single = apply_date_filter(&df, DateSelection::Single(date("2024-01-01"))).unwrap();
        assert!(single.equals(&df));
        let unset = apply_date_filter(&df, DateSelection::Unset).unwrap();
        assert!(unset.equals(&df));
    }

    #[test]
    fn date_range_can_exclude_everything() {
        let df = sample_orders();
        let out = apply_date_filter(
            &df,
            DateSelection::Range(date("2030-01-01"), date("2030-12-31")),
        )
        .unwrap();
        assert_eq!(out.height(), 0);
    }
}
