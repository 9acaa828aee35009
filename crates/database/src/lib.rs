//! SQLite record store for synchronized contacts.
//!
//! This crate provides async database operations for contacts and the sync
//! history log using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{contact, Contact, Database, NewContact};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:contacts.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Create a contact
//!     let new = NewContact {
//!         external_id: Some("42".to_string()),
//!         last_name: Some("Lovelace".to_string()),
//!         ..Default::default()
//!     };
//!     let contact = Contact::from_new("c27fb365-0c84-4cf2-8555-814bb065e448", new);
//!     contact::insert_contact(db.pool(), &contact).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod contact;
pub mod error;
pub mod models;
pub mod sync_history;

pub use contact::UpsertOutcome;
pub use error::{DatabaseError, Result};
pub use models::{Contact, ContactSyncFields, NewContact, SyncHistoryEntry};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::str::FromStr;
use std::time::Duration;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// How long a connection waits on another writer before giving up.
    const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/contacts.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true)
            // WAL lets readers run alongside the single writer
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Self::BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Begin a transaction that holds the write lock from its first statement.
    ///
    /// Use this for read-then-write work. A deferred transaction that reads
    /// first cannot upgrade to a writer while another connection writes, and
    /// SQLite fails it with `SQLITE_BUSY` without waiting.
    pub async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>> {
        begin_write(&self.pool).await
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

pub(crate) async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>> {
    Ok(pool.begin_with("BEGIN IMMEDIATE").await?)
}
