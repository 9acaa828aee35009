//! Contact endpoints. Writes go through the store so the sync hooks fire.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use contact_sync::SyncContext;
use database::{Contact, NewContact};

use crate::error::Result;
use crate::state::AppState;

/// List all contacts.
pub async fn list_contacts(State(state): State<AppState>) -> Result<Json<Vec<Contact>>> {
    Ok(Json(state.store.list().await?))
}

/// Get one contact.
pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Contact>> {
    Ok(Json(state.store.get(&id).await?))
}

/// Insert a batch of contacts.
pub async fn create_contacts(
    State(state): State<AppState>,
    Json(batch): Json<Vec<NewContact>>,
) -> Result<(StatusCode, Json<Vec<Contact>>)> {
    let stored = state.store.insert(&SyncContext::trigger(), batch).await?;
    tracing::info!("Created {} contacts", stored.len());
    Ok((StatusCode::CREATED, Json(stored)))
}

/// Update a batch of existing contacts.
pub async fn update_contacts(
    State(state): State<AppState>,
    Json(batch): Json<Vec<Contact>>,
) -> Result<Json<Vec<Contact>>> {
    let stored = state.store.update(&SyncContext::trigger(), batch).await?;
    tracing::info!("Updated {} contacts", stored.len());
    Ok(Json(stored))
}
