//! Bidirectional sync between local contacts and a remote user directory.
//!
//! Contacts are written through a [`ContactStore`], which runs the
//! [`ContactTrigger`] hooks around every write. The hooks only enqueue
//! [`SyncJob`]s; a [`SyncWorker`] runs them in the background.
//!
//! # Architecture
//!
//! ```text
//! ContactStore::insert / update
//!          ↓
//! ┌──────────────────────────────────────────────────────────┐
//! │                    CONTACT TRIGGER                       │
//! │                                                          │
//! │  pre-insert   assign missing external ids (0..=100)      │
//! │  post-insert  external id <= 100   → Inbound job         │
//! │  post-update  inside a job?        → stop                │
//! │               id changed to > 100  → Outbound job        │
//! └──────────────────────────────────────────────────────────┘
//!          ↓ JobQueue (fire-and-forget)
//! SyncWorker ──► SyncJobs::run ──► GET /users/{id}  → upsert by external id
//!                               └► POST /users/add → stamp last_synced_at
//!                                        ↓
//!                      store write with SyncContext::job()
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use contact_sync::{ContactStore, ContactTrigger, JobQueue, RandomIdAssigner,
//!     SyncContext, SyncJobs, SyncWorker};
//! use database::{Database, NewContact};
//! use directory_client::{DirectoryClient, DirectoryConfig};
//!
//! let db = Database::connect("sqlite:contacts.db?mode=rwc").await?;
//! db.migrate().await?;
//!
//! let (queue, receiver) = JobQueue::new();
//! let trigger = ContactTrigger::new(Arc::new(queue), Arc::new(RandomIdAssigner::new()));
//! let store = ContactStore::new(db, Arc::new(trigger));
//! let directory = DirectoryClient::new(DirectoryConfig::from_env()?)?;
//! SyncWorker::new(Arc::new(SyncJobs::new(store.clone(), Arc::new(directory))), receiver).spawn();
//!
//! store.insert(&SyncContext::trigger(), vec![NewContact::default()]).await?;
//! ```

mod assigner;
mod context;
mod directory;
mod error;
mod jobs;
pub mod mapper;
mod regime;
mod scheduler;
mod store;
mod trigger;
mod worker;

// Public exports
pub use assigner::{IdAssigner, RandomIdAssigner};
pub use context::SyncContext;
pub use directory::UserDirectory;
pub use error::SyncError;
pub use jobs::{JobOutcome, SyncJobs};
pub use mapper::UNKNOWN_FIELD_VALUE;
pub use regime::{parse_external_id, SyncRegime, INBOUND_MAX_EXTERNAL_ID};
pub use scheduler::{JobQueue, JobScheduler, RecordingScheduler, SyncJob};
pub use store::ContactStore;
pub use trigger::{ContactChange, ContactTrigger, TriggerPhase};
pub use worker::{JobReport, SyncWorker};
