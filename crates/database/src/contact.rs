//! Contact persistence.
//!
//! Single-statement operations accept any SQLite executor so callers can run
//! them inside a transaction (`&mut *tx`) or directly against the pool.

use chrono::{DateTime, Utc};
use sqlx::{SqliteExecutor, SqlitePool};

use crate::error::{DatabaseError, Result};
use crate::models::{Contact, ContactSyncFields, NewContact};

const CONTACT_COLUMNS: &str = "id, external_id, first_name, last_name, email, phone, birth_date, \
     mailing_street, mailing_city, mailing_postal_code, mailing_state, mailing_country, \
     last_synced_at, created_at, updated_at";

/// Generate a fresh store identifier for a contact.
pub fn new_contact_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Result of an upsert keyed by external id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No contact carried the external id, so a new one was created.
    Inserted(Contact),
    /// An existing contact was overwritten.
    Updated { before: Contact, after: Contact },
}

impl UpsertOutcome {
    /// The contact as stored after the upsert.
    pub fn contact(&self) -> &Contact {
        match self {
            UpsertOutcome::Inserted(contact) => contact,
            UpsertOutcome::Updated { after, .. } => after,
        }
    }
}

/// Insert a contact and return the stored row.
pub async fn insert_contact<'e, E>(executor: E, contact: &Contact) -> Result<Contact>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        r#"
        INSERT INTO contacts (
            id, external_id, first_name, last_name, email, phone, birth_date,
            mailing_street, mailing_city, mailing_postal_code, mailing_state, mailing_country,
            last_synced_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING {CONTACT_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Contact>(&sql)
        .bind(&contact.id)
        .bind(&contact.external_id)
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(contact.birth_date)
        .bind(&contact.mailing_street)
        .bind(&contact.mailing_city)
        .bind(&contact.mailing_postal_code)
        .bind(&contact.mailing_state)
        .bind(&contact.mailing_country)
        .bind(contact.last_synced_at)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return DatabaseError::AlreadyExists {
                        entity: "Contact",
                        id: contact.id.clone(),
                    };
                }
            }
            DatabaseError::Sqlx(e)
        })
}

/// Get a contact by ID.
pub async fn get_contact<'e, E>(executor: E, id: &str) -> Result<Contact>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?");

    sqlx::query_as::<_, Contact>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "Contact",
            id: id.to_string(),
        })
}

/// Read the fields pushed to the directory for one contact.
pub async fn get_sync_fields<'e, E>(executor: E, id: &str) -> Result<ContactSyncFields>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query_as::<_, ContactSyncFields>(
        r#"
        SELECT id, first_name, last_name, email, phone
        FROM contacts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(executor)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Contact",
        id: id.to_string(),
    })
}

/// Find every contact carrying an external id.
pub async fn find_by_external_id<'e, E>(executor: E, external_id: &str) -> Result<Vec<Contact>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        "SELECT {CONTACT_COLUMNS} FROM contacts WHERE external_id = ? ORDER BY created_at, id"
    );

    let contacts = sqlx::query_as::<_, Contact>(&sql)
        .bind(external_id)
        .fetch_all(executor)
        .await?;

    Ok(contacts)
}

/// Update the editable fields of an existing contact and return the stored row.
///
/// `last_synced_at` is never written here; see [`set_last_synced_at`].
pub async fn update_contact<'e, E>(executor: E, contact: &Contact) -> Result<Contact>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        r#"
        UPDATE contacts
        SET external_id = ?, first_name = ?, last_name = ?, email = ?, phone = ?,
            birth_date = ?, mailing_street = ?, mailing_city = ?, mailing_postal_code = ?,
            mailing_state = ?, mailing_country = ?, updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        RETURNING {CONTACT_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Contact>(&sql)
        .bind(&contact.external_id)
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.email)
        .bind(&contact.phone)
        .bind(contact.birth_date)
        .bind(&contact.mailing_street)
        .bind(&contact.mailing_city)
        .bind(&contact.mailing_postal_code)
        .bind(&contact.mailing_state)
        .bind(&contact.mailing_country)
        .bind(&contact.id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "Contact",
            id: contact.id.clone(),
        })
}

/// Stamp the last successful push time on a contact.
pub async fn set_last_synced_at<'e, E>(
    executor: E,
    id: &str,
    synced_at: DateTime<Utc>,
) -> Result<Contact>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!(
        r#"
        UPDATE contacts
        SET last_synced_at = ?, updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        RETURNING {CONTACT_COLUMNS}
        "#
    );

    sqlx::query_as::<_, Contact>(&sql)
        .bind(synced_at)
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "Contact",
            id: id.to_string(),
        })
}

/// Create or overwrite the contact owning `new.external_id`.
///
/// Only fields set on `new` replace stored values. The new contact must carry
/// an external id.
pub async fn upsert_by_external_id(pool: &SqlitePool, new: &NewContact) -> Result<UpsertOutcome> {
    let external_id = new
        .external_id
        .clone()
        .ok_or(DatabaseError::MissingExternalId)?;

    let mut tx = crate::begin_write(pool).await?;
    let mut matches = find_by_external_id(&mut *tx, &external_id).await?;

    let outcome = match matches.len() {
        0 => {
            let contact = Contact::from_new(new_contact_id(), new.clone());
            let stored = insert_contact(&mut *tx, &contact).await?;
            UpsertOutcome::Inserted(stored)
        }
        1 => {
            let before = matches.remove(0);
            let mut merged = before.clone();
            merged.merge(new);
            let after = update_contact(&mut *tx, &merged).await?;
            UpsertOutcome::Updated { before, after }
        }
        count => {
            return Err(DatabaseError::DuplicateExternalId { external_id, count });
        }
    };

    tx.commit().await?;

    tracing::debug!(
        "Upserted contact {} by external id {}",
        outcome.contact().id,
        external_id
    );

    Ok(outcome)
}

/// Delete a contact by ID.
pub async fn delete_contact(pool: &SqlitePool, id: &str) -> Result<()> {
    let result = sqlx::query(
        r#"
        DELETE FROM contacts
        WHERE id = ?
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Contact",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// List all contacts, oldest first.
pub async fn list_contacts(pool: &SqlitePool) -> Result<Vec<Contact>> {
    let sql = format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY created_at, id");

    let contacts = sqlx::query_as::<_, Contact>(&sql).fetch_all(pool).await?;

    Ok(contacts)
}

/// Count total contacts.
pub async fn count_contacts(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM contacts
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(count)
}
