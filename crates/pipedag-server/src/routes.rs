//! HTTP routes.
//!
//! | Method | Path               | Response                                     |
//! |--------|--------------------|----------------------------------------------|
//! | GET    | `/`                | `{"Ping": "Pong"}`                           |
//! | POST   | `/pipelines/parse` | `{"num_nodes", "num_edges", "is_dag"}`       |
//!
//! Anything else gets `404 {"detail": "Not Found"}`.
use axum::extract::DefaultBodyLimit;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use pipedag_core::{PipelineReport, PipelineRequest};
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::config::ServerConfig;
use crate::error::ApiError;

/// Builds the application router for `config`.
///
/// Layers, outermost first: request tracing, CORS, body size limit.
pub fn router(config: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(ping))
        .route("/pipelines/parse", post(parse_pipeline))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(config.cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Health check.
async fn ping() -> Json<Value> {
    Json(json!({ "Ping": "Pong" }))
}

/// Checks a submitted pipeline and returns its counts and DAG verdict.
async fn parse_pipeline(
    payload: Result<Json<PipelineRequest>, JsonRejection>,
) -> Result<Json<PipelineReport>, ApiError> {
    let Json(request) = payload?;
    let analysis = request.analyze();
    let cycle = analysis.cycle.as_ref().map(|ids| {
        ids.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" -> ")
    });

    debug!(
        num_nodes = analysis.report.num_nodes,
        num_edges = analysis.report.num_edges,
        is_dag = analysis.report.is_dag,
        duplicate_nodes = analysis.stats.duplicate_nodes,
        blank_nodes = analysis.stats.blank_nodes,
        malformed_edges = analysis.stats.malformed_edges,
        dangling_edges = analysis.stats.dangling_edges,
        cycle = cycle.as_deref(),
        "checked pipeline"
    );

    Ok(Json(analysis.report))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" })))
}
