//! HTTP server implementation

use axum::{
    extract::{Form, State},
    response::Html,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::client::LlmClient;
use crate::core::config::AppConfig;
use crate::core::errors::ErrorKind;
use crate::core::models::{LanguageSelection, LlmResult};
use crate::server::pages::{render_index, render_results, ResultsView};

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    client: Arc<LlmClient>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(client: LlmClient, config: AppConfig) -> Self {
        Self {
            client: Arc::new(client),
            config: Arc::new(config),
        }
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
    mode: String,
    timestamp: String,
}

/// Submitted translation form
#[derive(Debug, Deserialize)]
pub struct TranslateForm {
    #[serde(default)]
    pub text: String,
    pub language: Option<String>,
}

/// Health check handler
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: crate::NAME.to_string(),
        version: crate::VERSION.to_string(),
        mode: state.client.mode().to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_index("", state.config.default_language, None))
}

/// Form submission: translate, then critique the translation
async fn submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TranslateForm>,
) -> Html<String> {
    let selection =
        match LanguageSelection::resolve(form.language.as_deref(), state.config.default_language) {
            Ok(selection) => selection,
            Err(e) => {
                warn!("Rejected submission: {}", e);
                return Html(render_index(
                    &form.text,
                    state.config.default_language,
                    Some(e.to_string().as_str()),
                ));
            }
        };
    if selection.defaulted {
        info!("No language submitted, using default {}", selection.language);
    }

    let translation = state
        .client
        .translate(&form.text, selection.language.code())
        .await;

    let critique = match &translation {
        LlmResult::Success { text } => Some(state.client.critique(&form.text, text).await),
        LlmResult::Failure {
            kind: ErrorKind::InvalidInput,
            message,
        } => {
            return Html(render_index(&form.text, selection.language, Some(message.as_str())));
        }
        LlmResult::Failure { kind, .. } => {
            warn!("Translation failed ({}), skipping critique", kind);
            None
        }
    };

    Html(render_results(&ResultsView {
        original: &form.text,
        selection,
        translation: &translation,
        critique: critique.as_ref(),
    }))
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit))
        .route("/health", get(health_check))
        .with_state(Arc::new(state))
}

/// Run the HTTP server
pub async fn run_server(host: String, port: u16, config: AppConfig) -> anyhow::Result<()> {
    let client = LlmClient::new(&config)?;
    let app = router(AppState::new(client, config));

    // Bind address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
