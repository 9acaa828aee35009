//! Application state shared across handlers.

use contact_sync::ContactStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Trigger-aware contact store.
    pub store: ContactStore,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: ContactStore) -> Self {
        Self { store }
    }
}
