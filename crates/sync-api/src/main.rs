//! HTTP service for contacts kept in sync with the remote user directory.
//!
//! Contact writes made through the API run the sync hooks; the resulting
//! jobs are executed by a background worker.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use contact_sync::{ContactStore, ContactTrigger, JobQueue, RandomIdAssigner, SyncJobs, SyncWorker};
use database::Database;
use directory_client::DirectoryClient;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("contact_sync=info".parse()?)
                .add_directive("sync_api=info".parse()?),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, directory = %config.directory.base_url, "Starting sync API");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Wire the hooks to the job queue
    let (queue, receiver) = JobQueue::new();
    let trigger = ContactTrigger::new(Arc::new(queue), Arc::new(RandomIdAssigner::new()));
    let store = ContactStore::new(db, Arc::new(trigger));

    // Start the sync worker
    let directory = DirectoryClient::new(config.directory.clone())?;
    let jobs = Arc::new(SyncJobs::new(store.clone(), Arc::new(directory)));
    SyncWorker::new(jobs, receiver).spawn();

    // Build router
    let app = routes::router().with_state(AppState::new(store));

    // Start server
    info!(addr = %config.addr, "Sync API listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
