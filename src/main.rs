use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

use nl_sql_assistant::config::{AppConfig, CliArgs, Command};
use nl_sql_assistant::pipeline::Pipeline;
use nl_sql_assistant::render::{OutputFormat, Presenter, TerminalPresenter};
use nl_sql_assistant::util::logging::init_tracing;
use nl_sql_assistant::web;
use nl_sql_assistant::web::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; the environment may already be set
    dotenv::dotenv().ok();

    // Parse command line arguments
    let args = CliArgs::parse();

    // Initialize logging
    init_tracing(args.json_logs);

    // Load configuration
    let config = match AppConfig::new(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Error: failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let pipeline = match Pipeline::from_config(&config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            error!("Failed to initialize database backend: {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match args.command {
        Command::Ask { question, format } => ask(pipeline, &question, format).await,
        Command::Tables => tables(pipeline).await,
        Command::Serve { .. } => serve(pipeline, config).await,
    }
}

async fn ask(pipeline: Pipeline, question: &str, format: OutputFormat) -> ExitCode {
    let mut presenter = TerminalPresenter::stdio(format);

    if question.trim().is_empty() {
        presenter.show_error("Please enter a question.");
        return ExitCode::FAILURE;
    }

    let report = pipeline.answer(question, &mut presenter).await;
    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn tables(pipeline: Pipeline) -> ExitCode {
    let mut presenter = TerminalPresenter::stdio(OutputFormat::Table);

    match pipeline.guard().list_tables().await {
        Ok(tables) => {
            for table in tables {
                println!("{}", table);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            presenter.show_error(&format!("Error while listing tables: {}", e));
            ExitCode::FAILURE
        }
    }
}

async fn serve(pipeline: Pipeline, config: AppConfig) -> ExitCode {
    // Surface configuration problems at startup; the server still runs
    if let Some(e) = pipeline.startup_error() {
        eprintln!("Error: {}", e);
    }

    let app_state = match AppState::new(pipeline) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            error!("Failed to load templates: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Starting SQL assistant on {}:{}", config.web.host, config.web.port);
    match web::run_server(config.web, app_state).await {
        Ok(_) => {
            info!("Server stopped gracefully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
