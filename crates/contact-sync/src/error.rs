//! Error types for sync operations.

use database::DatabaseError;
use directory_client::DirectoryError;
use thiserror::Error;

/// Errors that can occur inside a sync job.
///
/// These never leave a job: [`crate::SyncJobs`] turns them into a
/// [`crate::JobOutcome`].
#[derive(Debug, Error)]
pub enum SyncError {
    /// Record store failure, including a contact that no longer exists.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// Transport or status failure talking to the directory.
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// External id that is not an integer.
    #[error("invalid external id: {0:?}")]
    InvalidExternalId(String),
}
