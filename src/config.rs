use clap::{Parser, Subcommand};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::render::OutputFormat;

/// Environment variables consulted for the model API key when the
/// configuration does not carry one. The second spelling is the legacy one.
const API_KEY_VARS: [&str; 2] = ["GOOGLE_API_KEY", "Google_API_KEY"];

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub backend: String, // "mysql" or "duckdb"
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    /// Database file, only read by the duckdb backend.
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LlmConfig {
    pub backend: String, // "gemini", "remote", or "ollama"
    pub model: String,
    pub api_key: Option<String>,
    pub api_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GuardConfig {
    /// Table that must exist before any generated SQL runs.
    pub expected_table: String,
    /// Reject anything that is not a query.
    pub read_only: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub llm: LlmConfig,
    pub guard: GuardConfig,
    pub web: WebConfig,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Refuse to run generated SQL that is not a query
    #[arg(long, global = true)]
    pub read_only: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a question to SQL, run it and print the result
    Ask {
        /// The question, in plain English
        question: String,

        /// Output format for the result table
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List the tables of the configured database
    Tables,
    /// Serve the web front end
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },
}

impl AppConfig {
    pub fn new(args: &CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::load(args.config.as_deref())?;

        if args.read_only {
            config.guard.read_only = true;
        }
        if let Command::Serve { host, port } = &args.command {
            if let Some(host) = host {
                config.web.host = host.clone();
            }
            if let Some(port) = port {
                config.web.port = *port;
            }
        }

        Ok(config)
    }

    /// Layers defaults, a TOML file and `NLSQL__`-prefixed environment
    /// variables, then fills in the API key from the provider's usual variable.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config_builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(config_path) = config_path {
            config_builder = config_builder.add_source(File::from(config_path));
        } else {
            // Check for config in default locations
            let default_locations = [
                "config.toml",
                "config/config.toml",
                "/etc/nl-sql-assistant/config.toml",
            ];

            for location in default_locations {
                if Path::new(location).exists() {
                    config_builder =
                        config_builder.add_source(File::new(location, config::FileFormat::Toml));
                    break;
                }
            }
        }

        config_builder = config_builder.add_source(
            Environment::with_prefix("NLSQL")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: AppConfig = config_builder.build()?.try_deserialize()?;

        if config.llm.api_key.is_none() {
            config.llm.api_key = API_KEY_VARS
                .iter()
                .find_map(|var| std::env::var(var).ok())
                .filter(|key| !key.trim().is_empty());
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                backend: "mysql".to_string(),
                host: "127.0.0.1".to_string(),
                port: 3306,
                user: "root".to_string(),
                password: String::new(),
                name: "sales_data_db".to_string(),
                path: None,
            },
            llm: LlmConfig {
                backend: "gemini".to_string(),
                model: "models/gemini-2.0-flash-lite".to_string(),
                api_key: None,
                api_url: None,
            },
            guard: GuardConfig {
                expected_table: "sales_data".to_string(),
                read_only: false,
            },
            web: WebConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
        }
    }
}
