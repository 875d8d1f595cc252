//! # Sale Repository
//!
//! The two heavyweight transactional engines: sale registration and refunds.
//!
//! ## Registration Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      register_sale (one transaction)                     │
//! │                                                                         │
//! │  validate cart ──► resolve customer ──► INSERT sale header             │
//! │       │                                                                 │
//! │       ▼  per line, in cart order:                                       │
//! │  re-read stock ──► enough? ──► UPDATE quantity ──► INSERT item         │
//! │       │               │             └──► append SALE ledger entry      │
//! │       │               └── no ──► InsufficientStock, ROLLBACK ALL       │
//! │       ▼                                                                 │
//! │  COMMIT ──► sale id                                                     │
//! │                                                                         │
//! │  Any failure - unknown product, unknown customer, short stock on the   │
//! │  LAST line - rolls back the header, every prior line's stock decrement │
//! │  and every ledger entry. There is no partial sale.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Refunds are the mirror image: restore stock, append REFUND entries, delete
//! the refunded line items, shrink the sale total. The sale header itself is
//! never deleted.

use sqlx::SqlitePool;
use tracing::info;

use almacen_core::pricing::sale_total;
use almacen_core::validation::validate_sale_lines;
use almacen_core::{
    CoreError, CustomerRef, Money, MovementKind, PaymentMethod, Sale, SaleLine, SaleLineItem,
    SaleStatus,
};

use crate::error::DbResult;
use crate::repository::movement::{append_movement, NewMovement};
use crate::repository::now_stamp;

const SALE_COLUMNS: &str = "id, timestamp, payment_method, status, total_cents, \
                            cash_received_cents, change_cents, customer_id, customer_name";

/// Repository for sales: registration, refunds, and queries.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new sale repository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers a sale atomically: header, line items, stock decrements and
    /// ledger entries all commit together or not at all.
    ///
    /// ## Arguments
    /// * `lines` - Cart lines, applied independently and in order. Duplicate
    ///   product ids are NOT merged; pre-aggregate if that matters.
    /// * `payment_method` - `Pending` creates a PENDING sale for later
    ///   collection; everything else is PAID on the spot.
    /// * `customer` - Resolved once, here: a customer id must exist (the
    ///   whole sale fails otherwise), a free-text name is stored as-is.
    /// * `cash_received_cents` - Optional; change is derived from it.
    ///
    /// Returns the new sale id.
    pub async fn register_sale(
        &self,
        lines: &[SaleLine],
        payment_method: PaymentMethod,
        customer: CustomerRef,
        cash_received_cents: Option<i64>,
    ) -> DbResult<i64> {
        validate_sale_lines(lines).map_err(CoreError::from)?;

        let total = sale_total(lines);
        let status = payment_method.initial_status();
        let change_cents = cash_received_cents.map(|cash| cash - total.cents());

        let mut tx = self.pool.begin().await?;

        let (customer_id, customer_name) = match customer {
            CustomerRef::Anonymous => (None, None),
            CustomerRef::Id(id) => {
                let name: Option<String> =
                    sqlx::query_scalar("SELECT name FROM customers WHERE id = ?")
                        .bind(id)
                        .fetch_optional(&mut *tx)
                        .await?;
                match name {
                    Some(name) => (Some(id), Some(name)),
                    None => return Err(CoreError::CustomerNotFound(id).into()),
                }
            }
            CustomerRef::Name(name) => (None, Some(name)),
        };

        let result = sqlx::query(
            r#"
            INSERT INTO sales (timestamp, payment_method, status, total_cents,
                               cash_received_cents, change_cents, customer_id, customer_name)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(now_stamp())
        .bind(payment_method)
        .bind(status)
        .bind(total.cents())
        .bind(cash_received_cents)
        .bind(change_cents)
        .bind(customer_id)
        .bind(&customer_name)
        .execute(&mut *tx)
        .await?;
        let sale_id = result.last_insert_rowid();

        for line in lines {
            // Re-read inside the transaction: the authoritative stock check.
            let current: Option<(i64, String)> =
                sqlx::query_as("SELECT quantity, name FROM products WHERE id = ?")
                    .bind(line.product_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            let Some((available, name)) = current else {
                return Err(CoreError::ProductNotFound(line.product_id).into());
            };
            if available < line.quantity {
                return Err(CoreError::InsufficientStock {
                    product: name,
                    available,
                    requested: line.quantity,
                }
                .into());
            }

            sqlx::query("UPDATE products SET quantity = quantity - ? WHERE id = ?")
                .bind(line.quantity)
                .bind(line.product_id)
                .execute(&mut *tx)
                .await?;

            sqlx::query(
                r#"
                INSERT INTO sale_items (sale_id, product_id, quantity, unit_price_cents, subtotal_cents)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(sale_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.unit_price_cents)
            .bind(line.subtotal_cents())
            .execute(&mut *tx)
            .await?;

            append_movement(
                &mut tx,
                NewMovement {
                    product_id: Some(line.product_id),
                    kind: MovementKind::Sale,
                    quantity_delta: -line.quantity,
                    unit_price_cents: line.unit_price_cents,
                    notes: &format!("Sale #{sale_id}"),
                },
            )
            .await?;
        }

        tx.commit().await?;
        info!(
            sale_id,
            total_cents = total.cents(),
            method = ?payment_method,
            "Sale registered"
        );
        Ok(sale_id)
    }

    // =========================================================================
    // Refunds
    // =========================================================================

    /// Refunds a sale, fully or partially, atomically.
    ///
    /// ## Arguments
    /// * `item_ids` - `None` refunds every remaining line item; `Some(ids)`
    ///   refunds only the named ones. Ids that are not live items of this
    ///   sale are skipped; only an empty effective set is an error.
    ///
    /// ## Behavior
    /// Per refunded item: stock is restored (a no-op when the product was
    /// deleted in the meantime), one REFUND ledger entry is appended, and
    /// the line item row is deleted. The sale total shrinks by the refunded
    /// amount; the sale header survives even a full refund.
    ///
    /// Returns the refunded amount.
    pub async fn refund_sale(&self, sale_id: i64, item_ids: Option<&[i64]>) -> DbResult<Money> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM sales WHERE id = ?")
            .bind(sale_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(CoreError::SaleNotFound(sale_id).into());
        }

        let items = sqlx::query_as::<_, SaleLineItem>(
            r#"
            SELECT id, sale_id, product_id, quantity, unit_price_cents, subtotal_cents
            FROM sale_items
            WHERE sale_id = ?
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&mut *tx)
        .await?;

        let targets: Vec<SaleLineItem> = match item_ids {
            None => items,
            Some(ids) => items.into_iter().filter(|i| ids.contains(&i.id)).collect(),
        };
        if targets.is_empty() {
            return Err(CoreError::NothingToRefund(sale_id).into());
        }

        let mut refunded = Money::zero();
        for item in &targets {
            if let Some(product_id) = item.product_id {
                // rows_affected may be 0: the product was hard-deleted and
                // there is no stock row to restore to.
                sqlx::query("UPDATE products SET quantity = quantity + ? WHERE id = ?")
                    .bind(item.quantity)
                    .bind(product_id)
                    .execute(&mut *tx)
                    .await?;
            }

            append_movement(
                &mut tx,
                NewMovement {
                    product_id: item.product_id,
                    kind: MovementKind::Refund,
                    quantity_delta: item.quantity,
                    unit_price_cents: item.unit_price_cents,
                    notes: &format!("Refund of sale #{sale_id}"),
                },
            )
            .await?;

            sqlx::query("DELETE FROM sale_items WHERE id = ?")
                .bind(item.id)
                .execute(&mut *tx)
                .await?;

            refunded += Money::from_cents(item.subtotal_cents);
        }

        sqlx::query("UPDATE sales SET total_cents = total_cents - ? WHERE id = ?")
            .bind(refunded.cents())
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(
            sale_id,
            refunded_cents = refunded.cents(),
            items = targets.len(),
            "Sale refunded"
        );
        Ok(refunded)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Fetches one sale by id.
    pub async fn get_by_id(&self, sale_id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE id = ?"
        ))
        .bind(sale_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Returns a sale's live (non-refunded) line items.
    pub async fn items(&self, sale_id: i64) -> DbResult<Vec<SaleLineItem>> {
        let items = sqlx::query_as::<_, SaleLineItem>(
            r#"
            SELECT id, sale_id, product_id, quantity, unit_price_cents, subtotal_cents
            FROM sale_items
            WHERE sale_id = ?
            ORDER BY id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Returns the most recent sales, newest first.
    pub async fn list_recent(&self, limit: i64) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales ORDER BY id DESC LIMIT ?"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Returns every PENDING sale, oldest first (the collections work queue).
    pub async fn list_pending(&self) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE status = ? ORDER BY id"
        ))
        .bind(SaleStatus::Pending)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
