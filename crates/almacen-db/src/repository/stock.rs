//! # Stock Adjuster
//!
//! Ad-hoc stock corrections outside the sale/refund flows: shrinkage,
//! breakage, a miscount found during inventory.
//!
//! ## Invariant
//! Stock never goes below zero. The check runs on the freshly-read quantity
//! inside the adjustment's own transaction, so concurrent writers cannot
//! slip a negative count past it.

use sqlx::SqlitePool;
use tracing::info;

use almacen_core::{CoreError, MovementKind};

use crate::error::DbResult;
use crate::repository::movement::{append_movement, NewMovement};

/// Repository for ad-hoc stock adjustments.
#[derive(Debug, Clone)]
pub struct StockRepository {
    pool: SqlitePool,
}

impl StockRepository {
    /// Creates a new stock repository.
    pub fn new(pool: SqlitePool) -> Self {
        StockRepository { pool }
    }

    /// Applies a signed stock delta to a product and records it in the
    /// ledger, atomically.
    ///
    /// ## Behavior
    /// - Unknown product: `ProductNotFound`, nothing written.
    /// - Result would be negative: `InsufficientStock`, nothing written.
    /// - Otherwise: quantity updated, one ledger entry appended at the
    ///   product's current price (INGRESS for positive deltas, SALE for
    ///   negative ones - shrinkage reads as an unreceipted sale).
    ///
    /// Returns the new stock level.
    pub async fn adjust(&self, product_id: i64, delta: i64, notes: &str) -> DbResult<i64> {
        let mut tx = self.pool.begin().await?;

        let current: Option<(i64, String, i64)> =
            sqlx::query_as("SELECT quantity, name, price_cents FROM products WHERE id = ?")
                .bind(product_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((quantity, name, price_cents)) = current else {
            return Err(CoreError::ProductNotFound(product_id).into());
        };

        let new_quantity = quantity + delta;
        if new_quantity < 0 {
            return Err(CoreError::InsufficientStock {
                product: name,
                available: quantity,
                requested: -delta,
            }
            .into());
        }

        sqlx::query("UPDATE products SET quantity = ? WHERE id = ?")
            .bind(new_quantity)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        let kind = if delta < 0 {
            MovementKind::Sale
        } else {
            MovementKind::Ingress
        };

        append_movement(
            &mut tx,
            NewMovement {
                product_id: Some(product_id),
                kind,
                quantity_delta: delta,
                unit_price_cents: price_cents,
                notes,
            },
        )
        .await?;

        tx.commit().await?;
        info!(product_id, delta, new_quantity, "Stock adjusted");
        Ok(new_quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use almacen_core::ProductUpsert;

    async fn seeded_db() -> (Database, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let id = db
            .catalog()
            .upsert_product(&ProductUpsert {
                code: "A-1".to_string(),
                name: "Widget".to_string(),
                quantity_delta: 10,
                cost_cents: Some(500),
                sector_id: None,
                barcode: None,
            })
            .await
            .unwrap();
        (db, id)
    }

    #[tokio::test]
    async fn test_positive_adjustment_is_ingress() {
        let (db, id) = seeded_db().await;

        let new_qty = db.stock().adjust(id, 5, "Found in back room").await.unwrap();
        assert_eq!(new_qty, 15);

        let ledger = db.movements().for_product(id).await.unwrap();
        assert_eq!(ledger[0].kind, MovementKind::Ingress);
        assert_eq!(ledger[0].quantity_delta, 5);
        assert_eq!(ledger[0].notes, "Found in back room");
    }

    #[tokio::test]
    async fn test_negative_adjustment_is_sale_kind() {
        let (db, id) = seeded_db().await;

        let new_qty = db.stock().adjust(id, -3, "Breakage").await.unwrap();
        assert_eq!(new_qty, 7);

        let ledger = db.movements().for_product(id).await.unwrap();
        assert_eq!(ledger[0].kind, MovementKind::Sale);
        assert_eq!(ledger[0].quantity_delta, -3);
    }

    #[tokio::test]
    async fn test_stock_never_goes_negative() {
        let (db, id) = seeded_db().await;

        let err = db.stock().adjust(id, -11, "Oops").await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientStock {
                available: 10,
                requested: 11,
                ..
            })
        ));

        // Nothing written: quantity and ledger untouched.
        let product = db.catalog().get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.quantity, 10);
        assert_eq!(product.movement_count, 1); // the initial ingress only

        // Draining to exactly zero is allowed.
        assert_eq!(db.stock().adjust(id, -10, "Clear out").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_product_rejected() {
        let (db, _) = seeded_db().await;

        let err = db.stock().adjust(999, 1, "").await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::ProductNotFound(999))
        ));
    }
}
