use super::{DiagnosticSeries, Formatter};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, series: &DiagnosticSeries) -> String {
        let mut out = series.columns.join(",");
        out.push('\n');
        for row in &series.rows {
            let fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            out.push_str(&fields.join(","));
            out.push('\n');
        }
        out
    }
}
