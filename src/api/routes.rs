//! HTTP routes and server startup.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::research::{CompanyReport, CompanyResearcher, InfoCategory, LookupError};

use super::types::{CategoriesResponse, ErrorResponse, HealthResponse, SearchCompanyRequest};

/// Shared state for all handlers.
pub struct AppState {
    pub researcher: CompanyResearcher,
    pub model: String,
}

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/search_company/", post(search_company))
        .route("/search_company", post(search_company))
        .route("/api/health", get(health))
        .route("/api/categories", get(list_categories))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let researcher = CompanyResearcher::from_config(&config)?;
    let state = Arc::new(AppState {
        researcher,
        model: config.default_model.clone(),
    });

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn search_company(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchCompanyRequest>,
) -> Result<Json<CompanyReport>, (StatusCode, Json<ErrorResponse>)> {
    match state.researcher.research(&body.company_name).await {
        Ok(report) => Ok(Json(report)),
        Err(e @ LookupError::EmptyCompanyName) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

async fn list_categories() -> Json<CategoriesResponse> {
    Json(CategoriesResponse {
        categories: InfoCategory::all().map(InfoCategory::label).collect(),
    })
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.model.clone(),
    })
}
