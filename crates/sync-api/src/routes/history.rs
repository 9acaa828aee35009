//! Sync history endpoint.

use axum::extract::{Query, State};
use axum::Json;
use database::{sync_history, SyncHistoryEntry};
use serde::Deserialize;

use crate::error::Result;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 500;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
    /// Restrict to one external id or contact id.
    pub target: Option<String>,
}

/// Recent sync job outcomes, newest first.
pub async fn sync_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<SyncHistoryEntry>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let pool = state.store.database().pool();

    let entries = match query.target.as_deref() {
        Some(target) => sync_history::list_for_target(pool, target, limit).await?,
        None => sync_history::list_recent(pool, limit).await?,
    };

    Ok(Json(entries))
}
