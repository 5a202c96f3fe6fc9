//! CSV Order Loader Module
//! Handles order CSV parsing and column extraction using Polars.

use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::io::Cursor;
use thiserror::Error;

/// Columns every order file must provide; extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "order_date",
    "product_name",
    "category",
    "total_price",
    "cost_price",
    "total_discount",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Column order_date has unsupported type {0}")]
    BadDateColumn(DataType),
    #[error("No data loaded")]
    NoData,
}

/// Loads order CSVs with Polars, memoizing parses per file content.
pub struct DataLoader {
    cache: HashMap<u64, DataFrame>,
    df: Option<DataFrame>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            df: None,
        }
    }

    /// Parse CSV bytes into an order table.
    ///
    /// Repeated calls with identical bytes hit the session cache instead of
    /// re-parsing. The `order_date` column is coerced to `Date`; a row with
    /// an unparseable date fails the whole load.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<&DataFrame, LoaderError> {
        let key = content_key(bytes);
        if let Some(df) = self.cache.get(&key) {
            self.df = Some(df.clone());
            return self.df.as_ref().ok_or(LoaderError::NoData);
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        for required in REQUIRED_COLUMNS {
            if df.column(required).is_err() {
                return Err(LoaderError::MissingColumn(required.to_string()));
            }
        }

        let df = coerce_order_date(df)?;

        self.cache.insert(key, df.clone());
        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Get unique values from a column.
    pub fn get_unique_values(&self, column: &str) -> Vec<String> {
        let Some(df) = &self.df else {
            return Vec::new();
        };

        df.column(column)
            .ok()
            .and_then(|col| col.unique().ok())
            .map(|unique| {
                let series = unique.as_materialized_series();
                let mut values: Vec<String> = (0..series.len())
                    .filter_map(|i| {
                        let val = series.get(i).ok()?;
                        if val.is_null() {
                            None
                        } else {
                            Some(val.to_string().trim_matches('"').to_string())
                        }
                    })
                    .collect();
                values.sort();
                values
            })
            .unwrap_or_default()
    }

    /// Min and max of `order_date`, used to seed the date-range pickers.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let df = self.df.as_ref()?;
        let days = df.column("order_date").ok()?.cast(&DataType::Int32).ok()?;
        let ca = days.i32().ok()?;
        Some((date_from_days(ca.min()?), date_from_days(ca.max()?)))
    }

    /// Get a reference to the loaded order table.
    pub fn get_dataframe(&self) -> Option<&DataFrame> {
        self.df.as_ref()
    }
}

/// Hash of the uploaded bytes, the cache key for memoized parses.
fn content_key(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

/// Days since the Unix epoch to a calendar date (Polars `Date` physical repr).
fn date_from_days(days: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch") + chrono::Duration::days(days as i64)
}

/// Ensure `order_date` is a `Date` column, parsing strings strictly.
fn coerce_order_date(df: DataFrame) -> Result<DataFrame, LoaderError> {
    let dtype = df.column("order_date")?.dtype().clone();
    match dtype {
        DataType::Date => Ok(df),
        DataType::String => {
            let parsed = df
                .lazy()
                .with_column(col("order_date").str().to_date(StrptimeOptions::default()))
                .collect()?;
            Ok(parsed)
        }
        DataType::Datetime(_, _) => {
            let truncated = df
                .lazy()
                .with_column(col("order_date").cast(DataType::Date))
                .collect()?;
            Ok(truncated)
        }
        other => Err(LoaderError::BadDateColumn(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &[u8] = b"\
order_date,product_name,category,total_price,cost_price,total_discount
2024-01-01,Widget,Toys,100,80,10
2024-01-02,Gadget,Toys,50,60,5
2024-01-02,Lamp,Home,200,120,150
";

    #[test]
    fn parses_order_date_as_date() {
        let mut loader = DataLoader::new();
        let df = loader.load_bytes(SAMPLE_CSV).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.column("order_date").unwrap().dtype(), &DataType::Date);
    }

    #[test]
    fn rejects_missing_required_column() {
        let csv = b"order_date,product_name,total_price,cost_price,total_discount\n2024-01-01,Widget,100,80,10\n";
        let mut loader = DataLoader::new();
        let err = loader.load_bytes(csv).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(c) if c == "category"));
    }

    #[test]
    fn identical_bytes_hit_the_cache() {
        let mut loader = DataLoader::new();
        loader.load_bytes(SAMPLE_CSV).unwrap();
        loader.load_bytes(SAMPLE_CSV).unwrap();
        assert_eq!(loader.cache.len(), 1);

        let other = b"\
order_date,product_name,category,total_price,cost_price,total_discount
2024-02-01,Desk,Home,300,250,0
";
        loader.load_bytes(other).unwrap();
        assert_eq!(loader.cache.len(), 2);
    }

    #[test]
    fn unique_values_are_sorted_and_deduped() {
        let mut loader = DataLoader::new();
        loader.load_bytes(SAMPLE_CSV).unwrap();
        assert_eq!(loader.get_unique_values("category"), vec!["Home", "Toys"]);
        assert_eq!(
            loader.get_unique_values("product_name"),
            vec!["Gadget", "Lamp", "Widget"]
        );
    }

    #[test]
    fn date_bounds_span_the_file() {
        let mut loader = DataLoader::new();
        loader.load_bytes(SAMPLE_CSV).unwrap();
        let (min, max) = loader.date_bounds().unwrap();
        assert_eq!(min, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(max, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }
}
