//! Contact store that fires the change hooks around every write.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use database::contact::{self, UpsertOutcome};
use database::{Contact, ContactSyncFields, Database, NewContact, Result};
use tracing::debug;

use crate::context::SyncContext;
use crate::trigger::{ContactChange, ContactTrigger};

/// Trigger-aware access to the contacts table.
///
/// Batches are written in one transaction; hooks that schedule jobs run
/// after the commit.
#[derive(Debug, Clone)]
pub struct ContactStore {
    db: Database,
    trigger: Arc<ContactTrigger>,
}

impl ContactStore {
    pub fn new(db: Database, trigger: Arc<ContactTrigger>) -> Self {
        Self { db, trigger }
    }

    /// Get the underlying database.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Insert a batch of contacts.
    pub async fn insert(
        &self,
        ctx: &SyncContext,
        mut batch: Vec<NewContact>,
    ) -> Result<Vec<Contact>> {
        self.trigger.before_insert(&mut batch);

        let mut tx = self.db.begin_write().await?;
        let mut stored = Vec::with_capacity(batch.len());
        for new in batch {
            let contact = Contact::from_new(contact::new_contact_id(), new);
            stored.push(contact::insert_contact(&mut *tx, &contact).await?);
        }
        tx.commit().await?;

        debug!("Inserted {} contacts", stored.len());
        self.trigger.after_insert(ctx, &stored);
        Ok(stored)
    }

    /// Update a batch of existing contacts, replacing every field.
    pub async fn update(&self, ctx: &SyncContext, batch: Vec<Contact>) -> Result<Vec<Contact>> {
        let mut tx = self.db.begin_write().await?;
        let mut changes = Vec::with_capacity(batch.len());
        for contact in &batch {
            let before = contact::get_contact(&mut *tx, &contact.id).await?;
            let after = contact::update_contact(&mut *tx, contact).await?;
            changes.push(ContactChange::new(before, after));
        }
        tx.commit().await?;

        debug!("Updated {} contacts", changes.len());
        self.trigger.after_update(ctx, &changes);
        Ok(changes.into_iter().map(|change| change.after).collect())
    }

    /// Create or overwrite the contact owning `new.external_id`.
    pub async fn upsert_by_external_id(
        &self,
        ctx: &SyncContext,
        new: NewContact,
    ) -> Result<UpsertOutcome> {
        let mut batch = [new];
        self.trigger.before_insert(&mut batch);
        let [new] = batch;

        let outcome = contact::upsert_by_external_id(self.db.pool(), &new).await?;
        match &outcome {
            UpsertOutcome::Inserted(contact) => {
                self.trigger.after_insert(ctx, std::slice::from_ref(contact));
            }
            UpsertOutcome::Updated { before, after } => {
                let change = ContactChange::new(before.clone(), after.clone());
                self.trigger.after_update(ctx, std::slice::from_ref(&change));
            }
        }

        Ok(outcome)
    }

    /// Stamp the last successful push time on one contact.
    pub async fn stamp_last_synced(
        &self,
        ctx: &SyncContext,
        id: &str,
        synced_at: DateTime<Utc>,
    ) -> Result<Contact> {
        let mut tx = self.db.begin_write().await?;
        let before = contact::get_contact(&mut *tx, id).await?;
        let after = contact::set_last_synced_at(&mut *tx, id, synced_at).await?;
        tx.commit().await?;

        let change = ContactChange::new(before, after.clone());
        self.trigger.after_update(ctx, std::slice::from_ref(&change));
        Ok(after)
    }

    /// Read the fields pushed to the directory, straight from storage.
    pub async fn read_sync_fields(&self, id: &str) -> Result<ContactSyncFields> {
        contact::get_sync_fields(self.db.pool(), id).await
    }

    /// Get a contact by ID.
    pub async fn get(&self, id: &str) -> Result<Contact> {
        contact::get_contact(self.db.pool(), id).await
    }

    /// List all contacts.
    pub async fn list(&self) -> Result<Vec<Contact>> {
        contact::list_contacts(self.db.pool()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assigner::RandomIdAssigner;
    use crate::scheduler::{RecordingScheduler, SyncJob};

    async fn test_store() -> (ContactStore, Arc<RecordingScheduler>) {
        let db = Database::connect_with_pool_size("sqlite::memory:", 1)
            .await
            .unwrap();
        db.migrate().await.unwrap();

        let scheduler = Arc::new(RecordingScheduler::new());
        let trigger = ContactTrigger::new(scheduler.clone(), Arc::new(RandomIdAssigner::seeded(3)));
        (ContactStore::new(db, Arc::new(trigger)), scheduler)
    }

    fn new_contact(external_id: Option<&str>) -> NewContact {
        NewContact {
            external_id: external_id.map(str::to_string),
            first_name: Some("Grace".to_string()),
            last_name: Some("Hopper".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_ids_and_schedules_inbound() {
        let (store, scheduler) = test_store().await;

        let stored = store
            .insert(
                &SyncContext::trigger(),
                vec![new_contact(None), new_contact(Some("150")), new_contact(Some("7"))],
            )
            .await
            .unwrap();

        assert_eq!(stored.len(), 3);
        let assigned: i64 = stored[0].external_id.as_deref().unwrap().parse().unwrap();
        assert!((0..=100).contains(&assigned));
        assert_eq!(stored[1].external_id.as_deref(), Some("150"));

        // The assigned id and "7" are inbound; "150" is not.
        let jobs = scheduler.jobs();
        assert_eq!(jobs.len(), 2);
        assert!(jobs.contains(&SyncJob::Inbound {
            external_id: "7".to_string()
        }));
    }

    #[tokio::test]
    async fn test_update_schedules_outbound_on_change_only() {
        let (store, scheduler) = test_store().await;
        let ctx = SyncContext::trigger();
        let stored = store.insert(&ctx, vec![new_contact(Some("50"))]).await.unwrap();
        scheduler.take();

        let mut contact = stored[0].clone();
        contact.external_id = Some("150".to_string());
        store.update(&ctx, vec![contact.clone()]).await.unwrap();
        assert_eq!(
            scheduler.take(),
            vec![SyncJob::Outbound {
                contact_id: contact.id.clone()
            }]
        );

        // Unchanged external id: no push.
        contact.email = Some("grace@example.com".to_string());
        store.update(&ctx, vec![contact]).await.unwrap();
        assert!(scheduler.take().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_contact_fails_whole_batch() {
        let (store, scheduler) = test_store().await;
        let ctx = SyncContext::trigger();
        let stored = store.insert(&ctx, vec![new_contact(Some("50"))]).await.unwrap();
        scheduler.take();

        let mut known = stored[0].clone();
        known.external_id = Some("300".to_string());
        let ghost = Contact::from_new("ghost", new_contact(Some("400")));

        assert!(store.update(&ctx, vec![known, ghost]).await.is_err());
        assert!(scheduler.jobs().is_empty());
        let reread = store.get(&stored[0].id).await.unwrap();
        assert_eq!(reread.external_id.as_deref(), Some("50"));
    }

    #[tokio::test]
    async fn test_stamp_inside_job_does_not_reschedule() {
        let (store, scheduler) = test_store().await;
        let stored = store
            .insert(&SyncContext::trigger(), vec![new_contact(Some("150"))])
            .await
            .unwrap();

        let stamped = store
            .stamp_last_synced(&SyncContext::job(), &stored[0].id, Utc::now())
            .await
            .unwrap();

        assert!(stamped.last_synced_at.is_some());
        assert!(scheduler.jobs().is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_last_synced_stamp() {
        let (store, _scheduler) = test_store().await;
        let stored = store
            .insert(&SyncContext::trigger(), vec![new_contact(Some("150"))])
            .await
            .unwrap();
        let stamped = store
            .stamp_last_synced(&SyncContext::job(), &stored[0].id, Utc::now())
            .await
            .unwrap();

        // A stale copy without the stamp must not clear it.
        let mut stale = stored[0].clone();
        stale.phone = Some("555-0199".to_string());
        let updated = store.update(&SyncContext::trigger(), vec![stale]).await.unwrap();
        assert_eq!(updated[0].phone.as_deref(), Some("555-0199"));
        assert_eq!(updated[0].last_synced_at, stamped.last_synced_at);

        // Nor can a caller set its own sync time.
        let mut forged = updated[0].clone();
        forged.last_synced_at = Some(Utc::now() + chrono::Duration::days(365));
        store.update(&SyncContext::trigger(), vec![forged]).await.unwrap();
        let reread = store.get(&stored[0].id).await.unwrap();
        assert_eq!(reread.last_synced_at, stamped.last_synced_at);
    }

    #[tokio::test]
    async fn test_upsert_inside_job_schedules_nothing() {
        let (store, scheduler) = test_store().await;

        let outcome = store
            .upsert_by_external_id(&SyncContext::job(), new_contact(Some("42")))
            .await
            .unwrap();
        assert!(matches!(outcome, UpsertOutcome::Inserted(_)));

        let outcome = store
            .upsert_by_external_id(&SyncContext::job(), new_contact(Some("42")))
            .await
            .unwrap();
        assert!(matches!(outcome, UpsertOutcome::Updated { .. }));

        assert!(scheduler.jobs().is_empty());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
