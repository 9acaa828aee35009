//! Execution context passed through every store mutation.

/// Tells the dispatcher whether a mutation originates from a sync job.
///
/// Sync jobs write contacts through the same store that fires the change
/// hooks, so without this flag a job's own update would schedule another job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncContext {
    in_sync_job: bool,
}

impl SyncContext {
    /// Context for mutations made by users, imports, and the API.
    pub fn trigger() -> Self {
        Self { in_sync_job: false }
    }

    /// Context for mutations made by a running sync job.
    pub fn job() -> Self {
        Self { in_sync_job: true }
    }

    /// Whether the current mutation was made by a sync job.
    pub fn in_sync_job(&self) -> bool {
        self.in_sync_job
    }
}
