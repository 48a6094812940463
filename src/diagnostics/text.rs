use super::{DiagnosticSeries, Formatter};

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format(&self, series: &DiagnosticSeries) -> String {
        let mut out = format!("# {}\n", series.title);
        let header: Vec<String> = series.columns.iter().map(|c| format!("{:>16}", c)).collect();
        out.push_str(&header.join(" "));
        out.push('\n');
        for row in &series.rows {
            let fields: Vec<String> = row.iter().map(|v| format!("{:>16.6}", v)).collect();
            out.push_str(&fields.join(" "));
            out.push('\n');
        }
        out
    }
}
