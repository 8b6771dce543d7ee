//! Natural-language questions in, SQL results out.
//!
//! A question is sent to a text-generation model together with a fixed prompt
//! describing the sales table. The returned SQL is checked against the live
//! table list, executed, and handed to a [`render::Presenter`].

pub mod config;
pub mod db;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod render;
pub mod util;
pub mod web;

pub use config::AppConfig;
pub use error::PipelineError;
pub use pipeline::{Pipeline, Report};
