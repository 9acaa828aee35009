//! Route handlers for the sync API.

pub mod contacts;
pub mod health;
pub mod history;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Contacts
        .route(
            "/contacts",
            get(contacts::list_contacts)
                .post(contacts::create_contacts)
                .put(contacts::update_contacts),
        )
        .route("/contacts/:id", get(contacts::get_contact))
        // Diagnostics
        .route("/sync-history", get(history::sync_history))
}
