//! Deferred job hand-off between the change hooks and the worker.

use std::fmt;
use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::{debug, error};

/// A unit of deferred sync work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncJob {
    /// Pull the directory user with this external id into a local contact.
    Inbound { external_id: String },
    /// Push the local contact with this id to the directory.
    Outbound { contact_id: String },
}

impl SyncJob {
    /// Direction label used in logs and the sync history.
    pub fn direction(&self) -> &'static str {
        match self {
            SyncJob::Inbound { .. } => "inbound",
            SyncJob::Outbound { .. } => "outbound",
        }
    }

    /// The external id or contact id the job works on.
    pub fn target(&self) -> &str {
        match self {
            SyncJob::Inbound { external_id } => external_id,
            SyncJob::Outbound { contact_id } => contact_id,
        }
    }
}

impl fmt::Display for SyncJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sync of {}", self.direction(), self.target())
    }
}

/// Accepts jobs without waiting for them to run.
pub trait JobScheduler: Send + Sync {
    /// Enqueue a job. Never blocks and never fails the caller.
    fn schedule(&self, job: SyncJob);
}

/// Channel-backed scheduler drained by a [`crate::SyncWorker`].
#[derive(Debug, Clone)]
pub struct JobQueue {
    sender: mpsc::UnboundedSender<SyncJob>,
}

impl JobQueue {
    /// Create a queue and the receiver its worker reads from.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SyncJob>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl JobScheduler for JobQueue {
    fn schedule(&self, job: SyncJob) {
        debug!("Scheduling {}", job);
        if let Err(e) = self.sender.send(job) {
            error!("Sync worker is gone, dropping {}", e.0);
        }
    }
}

/// A scheduler that only records jobs, for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingScheduler {
    jobs: Mutex<Vec<SyncJob>>,
}

impl RecordingScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jobs scheduled so far.
    pub fn jobs(&self) -> Vec<SyncJob> {
        self.lock().clone()
    }

    /// Remove and return the jobs scheduled so far.
    pub fn take(&self) -> Vec<SyncJob> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<SyncJob>> {
        self.jobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl JobScheduler for RecordingScheduler {
    fn schedule(&self, job: SyncJob) {
        self.lock().push(job);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_queue_delivers_in_order() {
        let (queue, mut receiver) = JobQueue::new();
        queue.schedule(SyncJob::Inbound {
            external_id: "42".to_string(),
        });
        queue.schedule(SyncJob::Outbound {
            contact_id: "c-1".to_string(),
        });

        assert_eq!(receiver.recv().await.unwrap().target(), "42");
        assert_eq!(receiver.recv().await.unwrap().direction(), "outbound");
    }

    #[test]
    fn test_queue_without_worker_does_not_panic() {
        let (queue, receiver) = JobQueue::new();
        drop(receiver);
        queue.schedule(SyncJob::Inbound {
            external_id: "1".to_string(),
        });
    }

    #[test]
    fn test_recording_scheduler() {
        let scheduler = RecordingScheduler::new();
        scheduler.schedule(SyncJob::Outbound {
            contact_id: "c-2".to_string(),
        });

        assert_eq!(scheduler.jobs().len(), 1);
        assert_eq!(scheduler.take().len(), 1);
        assert!(scheduler.jobs().is_empty());
    }

    #[test]
    fn test_job_display() {
        let job = SyncJob::Inbound {
            external_id: "7".to_string(),
        };
        assert_eq!(job.to_string(), "inbound sync of 7");
    }
}
