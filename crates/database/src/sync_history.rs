//! Sync history persistence.

use sqlx::SqlitePool;

use crate::models::SyncHistoryEntry;
use crate::Result;

/// Insert a sync history entry.
pub async fn record_sync(
    pool: &SqlitePool,
    direction: &str,
    target: &str,
    success: bool,
    detail: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO sync_history (direction, target, success, detail)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(direction)
    .bind(target)
    .bind(success)
    .bind(detail)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get the most recent sync history entries.
pub async fn list_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<SyncHistoryEntry>> {
    let rows = sqlx::query_as::<_, SyncHistoryEntry>(
        r#"
        SELECT id, direction, target, success, detail, created_at
        FROM sync_history
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Get recent sync history entries for one external id or contact id.
pub async fn list_for_target(
    pool: &SqlitePool,
    target: &str,
    limit: i64,
) -> Result<Vec<SyncHistoryEntry>> {
    let rows = sqlx::query_as::<_, SyncHistoryEntry>(
        r#"
        SELECT id, direction, target, success, detail, created_at
        FROM sync_history
        WHERE target = ?
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(target)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
