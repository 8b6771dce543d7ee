use minijinja::Environment;
use tokio::sync::Mutex;

use crate::pipeline::Pipeline;
use crate::web::templates::init_templates;

/// Shared application state for the web server
pub struct AppState {
    /// Requests run one at a time, in arrival order.
    pub pipeline: Mutex<Pipeline>,
    pub template_env: Environment<'static>,
    /// Configuration problem found at startup, shown on every page.
    pub startup_error: Option<String>,
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Result<Self, minijinja::Error> {
        let startup_error = pipeline.startup_error().map(|e| e.to_string());

        Ok(Self {
            pipeline: Mutex::new(pipeline),
            template_env: init_templates()?,
            startup_error,
            startup_time: chrono::Utc::now(),
        })
    }
}
