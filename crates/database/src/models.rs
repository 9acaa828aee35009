//! Database models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored contact, the local side of a directory user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Contact {
    /// Store-assigned identifier (UUID v4).
    pub id: String,
    /// Integer identifier shared with the remote directory, kept as text.
    pub external_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub mailing_street: Option<String>,
    pub mailing_city: Option<String>,
    pub mailing_postal_code: Option<String>,
    pub mailing_state: Option<String>,
    pub mailing_country: Option<String>,
    /// Set only after a successful push to the directory. Never taken from input.
    #[serde(default, skip_deserializing)]
    pub last_synced_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp.
    #[serde(default)]
    pub updated_at: String,
}

impl Contact {
    /// Materialize a new contact under the given store identifier.
    pub fn from_new(id: impl Into<String>, new: NewContact) -> Self {
        Self {
            id: id.into(),
            external_id: new.external_id,
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            phone: new.phone,
            birth_date: new.birth_date,
            mailing_street: new.mailing_street,
            mailing_city: new.mailing_city,
            mailing_postal_code: new.mailing_postal_code,
            mailing_state: new.mailing_state,
            mailing_country: new.mailing_country,
            last_synced_at: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    /// Overwrite every field that is set on `new`, leaving the rest untouched.
    pub fn merge(&mut self, new: &NewContact) {
        fn take(target: &mut Option<String>, value: &Option<String>) {
            if value.is_some() {
                target.clone_from(value);
            }
        }

        take(&mut self.external_id, &new.external_id);
        take(&mut self.first_name, &new.first_name);
        take(&mut self.last_name, &new.last_name);
        take(&mut self.email, &new.email);
        take(&mut self.phone, &new.phone);
        if new.birth_date.is_some() {
            self.birth_date = new.birth_date;
        }
        take(&mut self.mailing_street, &new.mailing_street);
        take(&mut self.mailing_city, &new.mailing_city);
        take(&mut self.mailing_postal_code, &new.mailing_postal_code);
        take(&mut self.mailing_state, &new.mailing_state);
        take(&mut self.mailing_country, &new.mailing_country);
    }
}

/// A contact that has not been written yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContact {
    pub external_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub mailing_street: Option<String>,
    pub mailing_city: Option<String>,
    pub mailing_postal_code: Option<String>,
    pub mailing_state: Option<String>,
    pub mailing_country: Option<String>,
}

/// The contact fields pushed to the remote directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ContactSyncFields {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A sync job outcome kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SyncHistoryEntry {
    /// Auto-incrementing ID.
    pub id: i64,
    /// `inbound` or `outbound`.
    pub direction: String,
    /// External id (inbound) or contact id (outbound).
    pub target: String,
    /// Whether the job completed its round trip.
    pub success: bool,
    /// Human-readable outcome.
    pub detail: String,
    /// Creation timestamp.
    pub created_at: String,
}
