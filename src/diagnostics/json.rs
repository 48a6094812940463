use serde_json::json;

use super::{DiagnosticSeries, Formatter};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, series: &DiagnosticSeries) -> String {
        json!({
            "title": series.title,
            "columns": series.columns,
            "rows": series.rows,
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_format() {
        let series = DiagnosticSeries {
            title: "Amplitude".to_string(),
            columns: vec!["frequency_hz", "gain_db"],
            rows: vec![vec![0.0, 0.0], vec![500.0, -3.5]],
        };
        let value: serde_json::Value = serde_json::from_str(&JsonFormatter.format(&series)).unwrap();
        assert_eq!(value["title"], "Amplitude");
        assert_eq!(value["columns"][1], "gain_db");
        assert_eq!(value["rows"][1][1], -3.5);
    }
}
