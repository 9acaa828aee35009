//! Inbound and outbound sync job bodies.

use std::sync::Arc;

use chrono::Utc;
use database::sync_history;
use tracing::{error, info, warn};

use crate::context::SyncContext;
use crate::directory::UserDirectory;
use crate::error::SyncError;
use crate::mapper;
use crate::regime::parse_external_id;
use crate::scheduler::SyncJob;
use crate::store::ContactStore;

/// Result of running one sync job.
///
/// Jobs never return errors to their caller; failures are captured here.
#[derive(Debug)]
pub enum JobOutcome {
    /// The round trip succeeded and the contact was written.
    Synced { contact_id: String },
    /// The job was not eligible to run.
    Skipped { reason: String },
    /// The job failed; nothing was retried.
    Failed { error: SyncError },
}

impl JobOutcome {
    pub fn is_synced(&self) -> bool {
        matches!(self, JobOutcome::Synced { .. })
    }

    fn detail(&self) -> String {
        match self {
            JobOutcome::Synced { contact_id } => format!("synced contact {}", contact_id),
            JobOutcome::Skipped { reason } => format!("skipped: {}", reason),
            JobOutcome::Failed { error } => error.to_string(),
        }
    }
}

/// Runs sync jobs against the contact store and the remote directory.
pub struct SyncJobs {
    store: ContactStore,
    directory: Arc<dyn UserDirectory>,
}

impl SyncJobs {
    pub fn new(store: ContactStore, directory: Arc<dyn UserDirectory>) -> Self {
        Self { store, directory }
    }

    /// Run any job.
    pub async fn run(&self, job: &SyncJob) -> JobOutcome {
        match job {
            SyncJob::Inbound { external_id } => self.run_inbound(external_id).await,
            SyncJob::Outbound { contact_id } => self.run_outbound(contact_id).await,
        }
    }

    /// Pull one directory user into the contact owning its external id.
    pub async fn run_inbound(&self, external_id: &str) -> JobOutcome {
        let outcome = match self.inbound(&SyncContext::job(), external_id).await {
            Ok(outcome) => outcome,
            Err(SyncError::InvalidExternalId(id)) => JobOutcome::Skipped {
                reason: format!("external id {:?} is not an integer", id),
            },
            Err(error) => JobOutcome::Failed { error },
        };

        self.finish(
            &SyncJob::Inbound {
                external_id: external_id.to_string(),
            },
            &outcome,
        )
        .await;
        outcome
    }

    /// Push one contact to the directory and stamp it on success.
    pub async fn run_outbound(&self, contact_id: &str) -> JobOutcome {
        let outcome = match self.outbound(&SyncContext::job(), contact_id).await {
            Ok(outcome) => outcome,
            Err(error) => JobOutcome::Failed { error },
        };

        self.finish(
            &SyncJob::Outbound {
                contact_id: contact_id.to_string(),
            },
            &outcome,
        )
        .await;
        outcome
    }

    async fn inbound(&self, ctx: &SyncContext, external_id: &str) -> Result<JobOutcome, SyncError> {
        if parse_external_id(Some(external_id)).is_none() {
            return Err(SyncError::InvalidExternalId(external_id.to_string()));
        }

        let user = self.directory.fetch_user(external_id).await?;

        let mut contact = mapper::contact_from_remote(&user);
        // The directory payload's own id is not trusted.
        contact.external_id = Some(external_id.to_string());

        let upserted = self.store.upsert_by_external_id(ctx, contact).await?;
        Ok(JobOutcome::Synced {
            contact_id: upserted.contact().id.clone(),
        })
    }

    async fn outbound(&self, ctx: &SyncContext, contact_id: &str) -> Result<JobOutcome, SyncError> {
        let fields = self.store.read_sync_fields(contact_id).await?;
        let payload = mapper::outbound_payload(&fields);

        let status = self.directory.add_user(&payload).await?;
        info!("Directory accepted contact {} (HTTP {})", contact_id, status);

        self.store
            .stamp_last_synced(ctx, contact_id, Utc::now())
            .await?;

        Ok(JobOutcome::Synced {
            contact_id: contact_id.to_string(),
        })
    }

    async fn finish(&self, job: &SyncJob, outcome: &JobOutcome) {
        match outcome {
            JobOutcome::Failed { error } => warn!("{} failed: {}", job, error),
            _ => info!("Finished {}: {}", job, outcome.detail()),
        }

        if let Err(e) = sync_history::record_sync(
            self.store.database().pool(),
            job.direction(),
            job.target(),
            outcome.is_synced(),
            &outcome.detail(),
        )
        .await
        {
            error!("Failed to record sync history for {}: {}", job, e);
        }
    }
}
