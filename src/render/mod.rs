//! Where the pipeline's output goes.
//!
//! A request shows its SQL (when any was produced) and then exactly one of a
//! result table, a "no data" notice, or an error message.

pub mod format;
pub mod terminal;

use clap::ValueEnum;
use serde::Serialize;

use crate::db::ResultSet;

pub use terminal::TerminalPresenter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table (like the MySQL CLI)
    #[default]
    Table,
    Csv,
    Json,
}

pub trait Presenter: Send {
    fn show_sql(&mut self, sql: &str);
    fn show_table(&mut self, result: &ResultSet);
    fn show_no_data(&mut self);
    fn show_error(&mut self, message: &str);
}

/// Keeps everything it is shown, in order of arrival per kind.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RecordingPresenter {
    pub sql: Vec<String>,
    pub tables: Vec<ResultSet>,
    pub no_data: usize,
    pub errors: Vec<String>,
}

impl RecordingPresenter {
    /// Number of final outputs (table, notice or error) shown.
    pub fn outcomes(&self) -> usize {
        self.tables.len() + self.no_data + self.errors.len()
    }
}

impl Presenter for RecordingPresenter {
    fn show_sql(&mut self, sql: &str) {
        self.sql.push(sql.to_string());
    }

    fn show_table(&mut self, result: &ResultSet) {
        self.tables.push(result.clone());
    }

    fn show_no_data(&mut self) {
        self.no_data += 1;
    }

    fn show_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}
