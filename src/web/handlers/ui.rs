use axum::{
    extract::{Form, State},
    response::Html,
};
use minijinja::context;
use serde::Deserialize;
use std::sync::Arc;

use crate::pipeline::Report;
use crate::render::RecordingPresenter;
use crate::web::state::AppState;
use crate::web::templates::render_template;

#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub question: String,
}

// Main UI entry point
pub async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    render_page(&state, "", None)
}

/// The pipeline only runs when the form carries a non-blank question.
pub async fn ask_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AskForm>,
) -> Html<String> {
    if form.question.trim().is_empty() {
        return render_page(&state, &form.question, None);
    }

    let report = state.pipeline.lock().await.run(&form.question).await;
    render_page(&state, &form.question, Some(&report))
}

fn render_page(state: &AppState, question: &str, report: Option<&Report>) -> Html<String> {
    let mut view = RecordingPresenter::default();
    if let Some(report) = report {
        report.present(&mut view);
    }

    Html(render_template(
        &state.template_env,
        "index.html",
        context! {
            question => question,
            startup_error => state.startup_error,
            sql => view.sql.first(),
            table => view.tables.first(),
            no_data => view.no_data > 0,
            error => view.errors.first(),
        },
    ))
}
