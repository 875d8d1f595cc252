//! # Movement Ledger Repository
//!
//! Read access to the append-only stock ledger, plus the crate-internal
//! append helper every transactional engine calls.
//!
//! ## Ledger Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Movement Ledger Invariants                           │
//! │                                                                         │
//! │  • Append-only: entries are never updated or deleted                   │
//! │  • One entry per stock/price-affecting event:                          │
//! │      INGRESS  restock / initial stocking        (delta > 0)            │
//! │      SALE     sale line or negative adjustment  (delta < 0)            │
//! │      EDIT     product fields changed            (delta = 0)            │
//! │      DELETE   product hard-deleted              (delta = 0, no id)     │
//! │      REFUND   stock restored by a refund        (delta > 0)            │
//! │  • product_id is a weak reference: it survives product deletion, so    │
//! │    history views LEFT JOIN and tolerate a missing name                 │
//! │  • Entries are written inside the SAME transaction as the mutation     │
//! │    they record - the ledger can never disagree with the stock column   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteConnection, SqlitePool};
use tracing::debug;

use almacen_core::{MovementEntry, MovementKind, MovementRow};

use crate::error::DbResult;
use crate::repository::now_stamp;

// =============================================================================
// Internal Append Helper
// =============================================================================

/// A ledger entry about to be written. Crate-internal: only the transactional
/// engines construct these.
#[derive(Debug)]
pub(crate) struct NewMovement<'a> {
    /// Absent for DELETE entries (the product row is already gone).
    pub product_id: Option<i64>,
    pub kind: MovementKind,
    /// Signed stock change; 0 for EDIT and DELETE.
    pub quantity_delta: i64,
    /// Product unit price at the time of the event, in cents.
    pub unit_price_cents: i64,
    pub notes: &'a str,
}

/// Appends one ledger entry on the caller's connection (usually a transaction)
/// and bumps the product's movement counter.
///
/// Takes `&mut SqliteConnection` rather than the pool so the entry commits or
/// rolls back together with the mutation it records.
pub(crate) async fn append_movement(
    conn: &mut SqliteConnection,
    entry: NewMovement<'_>,
) -> DbResult<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO movements (product_id, kind, quantity_delta, unit_price_cents, timestamp, notes)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(entry.product_id)
    .bind(entry.kind)
    .bind(entry.quantity_delta)
    .bind(entry.unit_price_cents)
    .bind(now_stamp())
    .bind(entry.notes)
    .execute(&mut *conn)
    .await?;

    if let Some(product_id) = entry.product_id {
        sqlx::query("UPDATE products SET movement_count = movement_count + 1 WHERE id = ?")
            .bind(product_id)
            .execute(&mut *conn)
            .await?;
    }

    debug!(
        kind = ?entry.kind,
        product_id = ?entry.product_id,
        delta = entry.quantity_delta,
        "Ledger entry appended"
    );

    Ok(result.last_insert_rowid())
}

// =============================================================================
// Movement Repository
// =============================================================================

/// Read-side of the movement ledger.
#[derive(Debug, Clone)]
pub struct MovementRepository {
    pool: SqlitePool,
}

impl MovementRepository {
    /// Creates a new movement repository.
    pub fn new(pool: SqlitePool) -> Self {
        MovementRepository { pool }
    }

    /// Returns the most recent ledger entries, newest first, joined with the
    /// product's current name (absent when the product was deleted).
    pub async fn recent(&self, limit: i64) -> DbResult<Vec<MovementRow>> {
        let rows = sqlx::query_as::<_, MovementRow>(
            r#"
            SELECT m.id, p.name AS product_name, m.kind, m.quantity_delta,
                   m.unit_price_cents, m.timestamp, m.notes
            FROM movements m
            LEFT JOIN products p ON p.id = m.product_id
            ORDER BY m.id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Returns the full ledger for one product, newest first.
    pub async fn for_product(&self, product_id: i64) -> DbResult<Vec<MovementEntry>> {
        let rows = sqlx::query_as::<_, MovementEntry>(
            r#"
            SELECT id, product_id, kind, quantity_delta, unit_price_cents, timestamp, notes
            FROM movements
            WHERE product_id = ?
            ORDER BY id DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Returns entries of one kind within an inclusive timestamp range.
    ///
    /// Timestamps are sortable text, so plain string comparison works:
    /// `of_kind_between(Sale, "2026-08-01 00:00:00", "2026-08-31 23:59:59")`.
    pub async fn of_kind_between(
        &self,
        kind: MovementKind,
        from: &str,
        to: &str,
    ) -> DbResult<Vec<MovementEntry>> {
        let rows = sqlx::query_as::<_, MovementEntry>(
            r#"
            SELECT id, product_id, kind, quantity_delta, unit_price_cents, timestamp, notes
            FROM movements
            WHERE kind = ? AND timestamp >= ? AND timestamp <= ?
            ORDER BY id DESC
            "#,
        )
        .bind(kind)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Total number of ledger entries.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movements")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
