//! Laminate Solver HTTP Server

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use laminate_solver::prelude::*;

struct AppState {
    materials: MaterialCatalog,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Debug, Serialize)]
struct MaterialEntry {
    name: String,
    properties: MaterialProperties,
}

#[derive(Debug, Deserialize)]
struct AnalysisRequest {
    layup: LayupSpec,
    #[serde(default)]
    load: LoadState,
    #[serde(default)]
    options: Option<SolverOptions>,
}

#[derive(Debug, Serialize)]
struct AnalysisResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<LaminateAnalysis>,
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn list_materials(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let entries: Vec<MaterialEntry> = state
        .materials
        .names()
        .into_iter()
        .filter_map(|name| {
            state.materials.get(name).map(|props| MaterialEntry {
                name: name.to_string(),
                properties: (*props).clone(),
            })
        })
        .collect();
    Json(entries)
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalysisRequest>,
) -> impl IntoResponse {
    match run_analysis(&state.materials, request) {
        Ok(results) => (
            StatusCode::OK,
            Json(AnalysisResponse {
                success: true,
                error: None,
                results: Some(results),
            }),
        ),
        Err(e) => {
            log::warn!("Analysis request failed: {e}");
            (
                StatusCode::BAD_REQUEST,
                Json(AnalysisResponse {
                    success: false,
                    error: Some(e.to_string()),
                    results: None,
                }),
            )
        }
    }
}

fn run_analysis(
    materials: &MaterialCatalog,
    request: AnalysisRequest,
) -> LaminateResult<LaminateAnalysis> {
    let laminate = Laminate::from_layup(&request.layup, materials)?;
    let options = request.options.unwrap_or_default();
    laminate.analyze(&request.load, &options)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let materials = match std::env::var("LAMINATE_MATERIALS") {
        Ok(path) => MaterialCatalog::load_or_default(&path).catalog,
        Err(_) => MaterialCatalog::with_defaults(),
    };
    log::info!(
        "Material catalog: {} entries ({})",
        materials.len(),
        materials.names().join(", ")
    );

    let state = Arc::new(AppState { materials });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/v1/materials", get(list_materials))
        .route("/api/v1/analyze", post(analyze))
        .layer(cors)
        .with_state(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8087".to_string());
    let addr = format!("{}:{}", host, port);

    println!("Laminate Solver Server listening on http://{}", addr);
    println!("  Health check: GET  /health");
    println!("  Materials:    GET  /api/v1/materials");
    println!("  Analysis:     POST /api/v1/analyze");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
