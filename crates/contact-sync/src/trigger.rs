//! Contact change hooks that decide which contacts need which sync.
//!
//! ```text
//! insert batch ──► before_insert: assign missing external ids
//!              ──► (rows written)
//!              ──► after_insert:  external id <= 100 → inbound job
//!
//! update batch ──► (rows written)
//!              ──► after_update:  inside a job? stop.
//!                                 external id changed to > 100 → outbound job
//! ```

use std::fmt;
use std::sync::Arc;

use database::{Contact, NewContact};
use tracing::debug;

use crate::assigner::IdAssigner;
use crate::context::SyncContext;
use crate::regime::SyncRegime;
use crate::scheduler::{JobScheduler, SyncJob};

/// The point in a store mutation at which a hook runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerPhase {
    PreInsert,
    PostInsert,
    PostUpdate,
}

impl fmt::Display for TriggerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TriggerPhase::PreInsert => "pre-insert",
            TriggerPhase::PostInsert => "post-insert",
            TriggerPhase::PostUpdate => "post-update",
        };
        f.write_str(name)
    }
}

/// A contact before and after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactChange {
    pub before: Contact,
    pub after: Contact,
}

impl ContactChange {
    pub fn new(before: Contact, after: Contact) -> Self {
        Self { before, after }
    }

    /// Whether the update moved the contact onto a new outbound external id.
    fn needs_outbound_sync(&self) -> bool {
        SyncRegime::classify(self.after.external_id.as_deref()) == Some(SyncRegime::Outbound)
            && self.after.external_id != self.before.external_id
    }
}

/// Record change dispatcher for contacts.
///
/// Holds no state between calls; every call handles one batch.
pub struct ContactTrigger {
    scheduler: Arc<dyn JobScheduler>,
    assigner: Arc<dyn IdAssigner>,
}

impl ContactTrigger {
    pub fn new(scheduler: Arc<dyn JobScheduler>, assigner: Arc<dyn IdAssigner>) -> Self {
        Self {
            scheduler,
            assigner,
        }
    }

    /// Give every contact without an external id a fresh one.
    ///
    /// Returns the number of ids assigned. Existing ids are never overwritten.
    pub fn before_insert(&self, batch: &mut [NewContact]) -> usize {
        let mut assigned = 0;

        for contact in batch.iter_mut() {
            if contact.external_id.is_none() {
                let external_id = self.assigner.next_external_id();
                debug!("[{}] assigned external id {}", TriggerPhase::PreInsert, external_id);
                contact.external_id = Some(external_id);
                assigned += 1;
            }
        }

        assigned
    }

    /// Schedule one inbound job per new contact in the inbound range.
    ///
    /// Returns the number of jobs scheduled. Contacts created by a sync job
    /// are already synced and schedule nothing.
    pub fn after_insert(&self, ctx: &SyncContext, batch: &[Contact]) -> usize {
        if ctx.in_sync_job() {
            debug!(
                "[{}] skipping {} contacts written by a sync job",
                TriggerPhase::PostInsert,
                batch.len()
            );
            return 0;
        }

        let mut scheduled = 0;

        for contact in batch {
            if SyncRegime::classify(contact.external_id.as_deref()) != Some(SyncRegime::Inbound) {
                continue;
            }
            if let Some(external_id) = &contact.external_id {
                self.scheduler.schedule(SyncJob::Inbound {
                    external_id: external_id.clone(),
                });
                scheduled += 1;
            }
        }

        debug!(
            "[{}] scheduled {} inbound jobs for {} contacts",
            TriggerPhase::PostInsert,
            scheduled,
            batch.len()
        );
        scheduled
    }

    /// Schedule one outbound job per contact whose external id changed into
    /// the outbound range.
    ///
    /// Returns the number of jobs scheduled. Does nothing at all when the
    /// update was made by a sync job.
    pub fn after_update(&self, ctx: &SyncContext, changes: &[ContactChange]) -> usize {
        if ctx.in_sync_job() {
            debug!(
                "[{}] update made by a sync job, not dispatching",
                TriggerPhase::PostUpdate
            );
            return 0;
        }

        let mut scheduled = 0;

        for change in changes.iter().filter(|change| change.needs_outbound_sync()) {
            self.scheduler.schedule(SyncJob::Outbound {
                contact_id: change.after.id.clone(),
            });
            scheduled += 1;
        }

        debug!(
            "[{}] scheduled {} outbound jobs for {} contacts",
            TriggerPhase::PostUpdate,
            scheduled,
            changes.len()
        );
        scheduled
    }
}

impl fmt::Debug for ContactTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactTrigger").finish_non_exhaustive()
    }
}
