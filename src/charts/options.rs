//! Chart Options Module
//! Declarative chart descriptions handed to the rendering layer.
//!
//! The serialized shape is a fixed contract:
//! `{title, xAxis: {type: "category", data}, yAxis: {type: "value"},
//!  series: [{data, type, color}]}`.

use serde::Serialize;

/// Series color for the daily profit/loss line.
pub const DAILY_LINE_COLOR: &str = "#5470C6";
/// Series color for the product popularity bars.
pub const PRODUCT_BAR_COLOR: &str = "#91CC75";
/// Series color for the category popularity bars.
pub const CATEGORY_BAR_COLOR: &str = "#EE6666";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartTitle {
    pub text: String,
    pub left: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartAxis {
    #[serde(rename = "type")]
    pub axis_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartSeries {
    pub data: Vec<f64>,
    #[serde(rename = "type")]
    pub series_type: String,
    pub color: String,
}

/// One complete chart description: a category x-axis, a value y-axis and a
/// single series.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartOptions {
    pub title: ChartTitle,
    #[serde(rename = "xAxis")]
    pub x_axis: ChartAxis,
    #[serde(rename = "yAxis")]
    pub y_axis: ChartAxis,
    pub series: Vec<ChartSeries>,
}

impl ChartOptions {
    fn new(title: &str, kind: &str, categories: Vec<String>, values: Vec<f64>, color: &str) -> Self {
        Self {
            title: ChartTitle {
                text: title.to_string(),
                left: "center".to_string(),
            },
            x_axis: ChartAxis {
                axis_type: "category".to_string(),
                data: Some(categories),
            },
            y_axis: ChartAxis {
                axis_type: "value".to_string(),
                data: None,
            },
            series: vec![ChartSeries {
                data: values,
                series_type: kind.to_string(),
                color: color.to_string(),
            }],
        }
    }

    /// Line chart over date categories.
    pub fn line(title: &str, categories: Vec<String>, values: Vec<f64>, color: &str) -> Self {
        Self::new(title, "line", categories, values, color)
    }

    /// Bar chart over label categories.
    pub fn bar(title: &str, categories: Vec<String>, values: Vec<f64>, color: &str) -> Self {
        Self::new(title, "bar", categories, values, color)
    }

    /// Category labels for the x-axis.
    pub fn categories(&self) -> &[String] {
        self.x_axis.data.as_deref().unwrap_or(&[])
    }

    /// Values of the single series.
    pub fn values(&self) -> &[f64] {
        self.series.first().map(|s| s.data.as_slice()).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn line_chart_serializes_to_the_wire_shape() {
        let options = ChartOptions::line(
            "Daily Profit / Loss",
            vec!["2024-01-01".to_string(), "2024-01-02".to_string()],
            vec![10.0, 80.0],
            DAILY_LINE_COLOR,
        );
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(
            value,
            json!({
                "title": {"text": "Daily Profit / Loss", "left": "center"},
                "xAxis": {"type": "category", "data": ["2024-01-01", "2024-01-02"]},
                "yAxis": {"type": "value"},
                "series": [{"data": [10.0, 80.0], "type": "line", "color": "#5470C6"}]
            })
        );
    }

    #[test]
    fn bar_chart_serializes_to_the_wire_shape() {
        let options = ChartOptions::bar(
            "Most Popular Products",
            vec!["Widget".to_string()],
            vec![2.0],
            PRODUCT_BAR_COLOR,
        );
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(
            value,
            json!({
                "title": {"text": "Most Popular Products", "left": "center"},
                "xAxis": {"type": "category", "data": ["Widget"]},
                "yAxis": {"type": "value"},
                "series": [{"data": [2.0], "type": "bar", "color": "#91CC75"}]
            })
        );
    }

    #[test]
    fn empty_chart_is_well_formed() {
        let options = ChartOptions::line("Daily Profit / Loss", vec![], vec![], DAILY_LINE_COLOR);
        assert!(options.is_empty());
        assert!(options.categories().is_empty());
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["series"][0]["data"], json!([]));
    }
}
