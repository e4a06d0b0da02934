//! HTTP wrapper around the harvester: health check plus CSV download.

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use harvester::{export, Harvester, SiteProfile};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
struct AppState {
    harvester: Harvester,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Deserialize)]
struct JobsQuery {
    term: String,
}

/// Bind and serve until the process is stopped.
pub async fn run(port: u16, profile: SiteProfile) -> Result<()> {
    let harvester = Harvester::new(profile).context("Failed to build harvester")?;

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/jobs.csv", get(jobs_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { harvester });

    let addr = format!("0.0.0.0:{port}");
    tracing::info!("Listening on {}", addr);
    tracing::info!("CSV endpoint: http://localhost:{}/jobs.csv?term=python", port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

async fn health_handler() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
        }),
    )
}

/// Run a harvest for the requested term and answer with the CSV as a
/// file attachment. A failed harvest maps to 502 with the error text.
async fn jobs_handler(State(state): State<AppState>, Query(query): Query<JobsQuery>) -> Response {
    let postings = match state.harvester.run(&query.term).await {
        Ok(postings) => postings,
        Err(e) => {
            tracing::error!(term = %query.term, error = %e, "Harvest failed");
            return (StatusCode::BAD_GATEWAY, e.to_string()).into_response();
        }
    };

    match export::csv_bytes(&postings, state.harvester.profile()) {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"jobs.csv\"",
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "CSV serialization failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
