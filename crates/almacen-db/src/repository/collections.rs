//! # Collections Repository
//!
//! Settlement of PENDING (store-credit) sales.
//!
//! ## Settlement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    mark_paid (one transaction)                           │
//! │                                                                         │
//! │  fetch sale ──► PENDING? ──► flip to PAID, record real method/cash     │
//! │       │            │              │                                     │
//! │       │            │              └──► append collections row           │
//! │       │            └── already PAID ──► SaleAlreadyPaid (idempotence   │
//! │       │                                 guard: no second collection)   │
//! │       └── missing ──► SaleNotFound                                     │
//! │                                                                         │
//! │  The collections table is append-only: one row per settlement, with    │
//! │  the amount, the customer and the real payment method. The sale total  │
//! │  was frozen at registration - refunds before collection shrink it,     │
//! │  and the collection settles whatever total stands at that moment.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::info;

use almacen_core::{Collection, CoreError, PaymentMethod, Sale, SaleStatus, ValidationError};

use crate::error::DbResult;
use crate::repository::now_stamp;

/// Repository for pending-sale settlements.
#[derive(Debug, Clone)]
pub struct CollectionsRepository {
    pool: SqlitePool,
}

impl CollectionsRepository {
    /// Creates a new collections repository.
    pub fn new(pool: SqlitePool) -> Self {
        CollectionsRepository { pool }
    }

    /// Settles a PENDING sale: flips it to PAID, records how it was actually
    /// paid, and appends one collection row - atomically.
    ///
    /// ## Arguments
    /// * `method` - The real settlement method; defaults to cash. `Pending`
    ///   is rejected: a settlement cannot itself be deferred.
    /// * `amount_received_cents` - Optional cash handed over; change is
    ///   derived against the sale's standing total.
    ///
    /// An already-PAID sale fails with `SaleAlreadyPaid` and writes nothing,
    /// so a double-click can never record two collections.
    pub async fn mark_paid(
        &self,
        sale_id: i64,
        method: Option<PaymentMethod>,
        amount_received_cents: Option<i64>,
    ) -> DbResult<Collection> {
        let method = method.unwrap_or(PaymentMethod::Cash);
        if method == PaymentMethod::Pending {
            return Err(CoreError::Validation(ValidationError::NotAllowed {
                field: "payment method".to_string(),
                allowed: vec!["cash".to_string(), "transfer".to_string(), "qr".to_string()],
            })
            .into());
        }

        let mut tx = self.pool.begin().await?;

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, timestamp, payment_method, status, total_cents,
                   cash_received_cents, change_cents, customer_id, customer_name
            FROM sales
            WHERE id = ?
            "#,
        )
        .bind(sale_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(sale) = sale else {
            return Err(CoreError::SaleNotFound(sale_id).into());
        };
        if sale.status == SaleStatus::Paid {
            return Err(CoreError::SaleAlreadyPaid(sale_id).into());
        }

        let change_cents = amount_received_cents.map(|cash| cash - sale.total_cents);

        sqlx::query(
            r#"
            UPDATE sales
            SET status = ?, payment_method = ?, cash_received_cents = ?, change_cents = ?
            WHERE id = ?
            "#,
        )
        .bind(SaleStatus::Paid)
        .bind(method)
        .bind(amount_received_cents)
        .bind(change_cents)
        .bind(sale_id)
        .execute(&mut *tx)
        .await?;

        let timestamp = now_stamp();
        let result = sqlx::query(
            r#"
            INSERT INTO collections (sale_id, customer_id, timestamp, amount_cents, payment_method)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(sale_id)
        .bind(sale.customer_id)
        .bind(&timestamp)
        .bind(sale.total_cents)
        .bind(method)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(
            sale_id,
            amount_cents = sale.total_cents,
            method = ?method,
            "Pending sale collected"
        );

        Ok(Collection {
            id: result.last_insert_rowid(),
            sale_id,
            customer_id: sale.customer_id,
            timestamp,
            amount_cents: sale.total_cents,
            payment_method: method,
        })
    }

    /// Returns the most recent collections, newest first.
    pub async fn list_recent(&self, limit: i64) -> DbResult<Vec<Collection>> {
        let collections = sqlx::query_as::<_, Collection>(
            r#"
            SELECT id, sale_id, customer_id, timestamp, amount_cents, payment_method
            FROM collections
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(collections)
    }

    /// Returns every collection recorded against one customer, newest first.
    pub async fn for_customer(&self, customer_id: i64) -> DbResult<Vec<Collection>> {
        let collections = sqlx::query_as::<_, Collection>(
            r#"
            SELECT id, sale_id, customer_id, timestamp, amount_cents, payment_method
            FROM collections
            WHERE customer_id = ?
            ORDER BY id DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(collections)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
