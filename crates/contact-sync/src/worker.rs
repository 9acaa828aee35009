//! Background worker that runs queued sync jobs.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::jobs::{JobOutcome, SyncJobs};
use crate::scheduler::SyncJob;

/// A finished job and how it ended.
#[derive(Debug)]
pub struct JobReport {
    pub job: SyncJob,
    pub outcome: JobOutcome,
}

/// Drains a [`crate::JobQueue`] and runs each job on its own task.
///
/// Jobs are not ordered relative to each other and a failing job never
/// affects its siblings.
pub struct SyncWorker {
    jobs: Arc<SyncJobs>,
    receiver: mpsc::UnboundedReceiver<SyncJob>,
    reports: Option<mpsc::UnboundedSender<JobReport>>,
}

impl SyncWorker {
    pub fn new(jobs: Arc<SyncJobs>, receiver: mpsc::UnboundedReceiver<SyncJob>) -> Self {
        Self {
            jobs,
            receiver,
            reports: None,
        }
    }

    /// Send a [`JobReport`] for every finished job.
    pub fn with_reports(mut self, reports: mpsc::UnboundedSender<JobReport>) -> Self {
        self.reports = Some(reports);
        self
    }

    /// Run until every queue handle has been dropped.
    pub async fn run(mut self) {
        info!("Sync worker started");

        while let Some(job) = self.receiver.recv().await {
            debug!("Dispatching {}", job);
            let jobs = self.jobs.clone();
            let reports = self.reports.clone();

            tokio::spawn(async move {
                let outcome = jobs.run(&job).await;
                if let Some(reports) = reports {
                    // Nobody listening is fine.
                    let _ = reports.send(JobReport { job, outcome });
                }
            });
        }

        info!("Sync worker stopped: job queue closed");
    }

    /// Run the worker on a background task.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
