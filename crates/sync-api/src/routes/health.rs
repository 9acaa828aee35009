//! Liveness and database reachability.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use database::contact;
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<i64>,
}

/// Report `ok` while the contact store answers queries, `degraded` with 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Health>) {
    match contact::count_contacts(state.store.database().pool()).await {
        Ok(count) => (
            StatusCode::OK,
            Json(Health {
                status: "ok",
                database: "reachable",
                contacts: Some(count),
            }),
        ),
        Err(e) => {
            warn!("Health check could not reach the database: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Health {
                    status: "degraded",
                    database: "unreachable",
                    contacts: None,
                }),
            )
        }
    }
}
