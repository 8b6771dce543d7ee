use std::io::{self, Write};
use tracing::warn;

use crate::db::ResultSet;
use crate::render::format::{format_as_csv, format_as_json, format_as_table};
use crate::render::{OutputFormat, Presenter};

/// Writes results to `out` and messages to `err`.
pub struct TerminalPresenter<W, E> {
    format: OutputFormat,
    out: W,
    err: E,
}

impl TerminalPresenter<io::Stdout, io::Stderr> {
    pub fn stdio(format: OutputFormat) -> Self {
        Self::new(format, io::stdout(), io::stderr())
    }
}

impl<W: Write + Send, E: Write + Send> TerminalPresenter<W, E> {
    pub fn new(format: OutputFormat, out: W, err: E) -> Self {
        Self { format, out, err }
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }

    fn write_out(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()) {
            warn!("Failed to write output: {}", e);
        }
    }

    fn write_err(&mut self, text: &str) {
        if let Err(e) = self.err.write_all(text.as_bytes()) {
            warn!("Failed to write message: {}", e);
        }
    }
}

impl<W: Write + Send, E: Write + Send> Presenter for TerminalPresenter<W, E> {
    fn show_sql(&mut self, sql: &str) {
        // Machine-readable formats keep stdout for data only
        match self.format {
            OutputFormat::Table => self.write_out(&format!("Generated SQL Query:\n{}\n\n", sql)),
            OutputFormat::Csv | OutputFormat::Json => self.write_err(&format!("-- {}\n", sql)),
        }
    }

    fn show_table(&mut self, result: &ResultSet) {
        let rendered = match self.format {
            OutputFormat::Table => format_as_table(result),
            OutputFormat::Csv => match format_as_csv(result) {
                Ok(csv) => csv,
                Err(e) => {
                    self.show_error(&format!("Failed to write CSV: {}", e));
                    return;
                }
            },
            OutputFormat::Json => format_as_json(result) + "\n",
        };
        self.write_out(&rendered);
    }

    fn show_no_data(&mut self) {
        self.write_err("No data returned.\n");
    }

    fn show_error(&mut self, message: &str) {
        self.write_err(&format!("Error: {}\n", message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(format: OutputFormat, show: impl FnOnce(&mut dyn Presenter)) -> (String, String) {
        let mut presenter = TerminalPresenter::new(format, Vec::new(), Vec::new());
        show(&mut presenter);
        let (out, err) = presenter.into_inner();
        (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn table_format_prints_sql_then_grid() {
        // DECIMAL sums arrive as strings and keep their scale
        let result = ResultSet::new(vec!["SUM(Sales)".to_string()], vec![vec![json!("1500.50")]]);
        let (out, err) = render(OutputFormat::Table, |p| {
            p.show_sql("SELECT SUM(Sales) FROM sales_data");
            p.show_table(&result);
        });

        assert!(out.starts_with("Generated SQL Query:\nSELECT SUM(Sales) FROM sales_data\n"));
        assert!(out.contains("| SUM(Sales) |"));
        assert!(out.contains("| 1500.50    |"));
        assert!(err.is_empty());
    }

    #[test]
    fn csv_format_keeps_stdout_clean() {
        let result = ResultSet::new(vec!["n".to_string()], vec![vec![json!(3)]]);
        let (out, err) = render(OutputFormat::Csv, |p| {
            p.show_sql("SELECT 3 AS n");
            p.show_table(&result);
        });

        assert_eq!(out, "n\n3\n");
        assert_eq!(err, "-- SELECT 3 AS n\n");
    }

    #[test]
    fn messages_go_to_stderr() {
        let (out, err) = render(OutputFormat::Table, |p| {
            p.show_no_data();
            p.show_error("boom");
        });

        assert!(out.is_empty());
        assert_eq!(err, "No data returned.\nError: boom\n");
    }
}
