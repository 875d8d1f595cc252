//! # Catalog Repository
//!
//! Sectors (margin categories) and products: the writable catalog, with every
//! mutation mirrored into the movement ledger.
//!
//! ## Upsert vs Edit
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Two Different Write Semantics                            │
//! │                                                                         │
//! │  upsert_product (add-or-top-up, keyed by code)                          │
//! │  ├── Unknown code  → INSERT with the given fields                       │
//! │  ├── Known code    → quantity += delta; cost/sector/barcode fall        │
//! │  │                   back to the stored value when absent               │
//! │  └── Ledger        → one INGRESS entry, at the (re)derived price        │
//! │                                                                         │
//! │  edit_product (full overwrite, keyed by id)                             │
//! │  ├── Every field is authoritative: barcode None CLEARS the barcode,     │
//! │  │   quantity REPLACES the stock count                                  │
//! │  └── Ledger        → one EDIT entry, delta 0 (informational)            │
//! │                                                                         │
//! │  In both paths price_cents is recomputed from cost + sector margin;     │
//! │  it is never written directly by the caller.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use almacen_core::pricing::derive_price;
use almacen_core::validation::{
    normalize_barcode, validate_code, validate_margin_bps, validate_product_name,
    validate_stock_count,
};
use almacen_core::{
    CoreError, MarginRate, Money, MovementKind, Product, ProductEdit, ProductUpsert,
    ProductWithSector, Sector,
};

use crate::error::DbResult;
use crate::repository::movement::{append_movement, NewMovement};

// =============================================================================
// Internal Helpers
// =============================================================================

/// Resolves a sector id to its margin on the caller's connection.
///
/// Absent sector (or an id whose row was deleted) means margin 0, so the
/// derived price degrades to the bare cost instead of failing.
pub(crate) async fn sector_margin(
    conn: &mut SqliteConnection,
    sector_id: Option<i64>,
) -> DbResult<MarginRate> {
    let Some(id) = sector_id else {
        return Ok(MarginRate::zero());
    };

    let bps: Option<u32> = sqlx::query_scalar("SELECT margin_bps FROM sectors WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(bps.map(MarginRate::from_bps).unwrap_or_else(MarginRate::zero))
}

const PRODUCT_COLUMNS: &str =
    "id, code, name, quantity, cost_cents, sector_id, price_cents, barcode, movement_count";

// =============================================================================
// Catalog Repository
// =============================================================================

/// Repository for sectors and products.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new catalog repository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    // =========================================================================
    // Sectors
    // =========================================================================

    /// Lists all sectors, alphabetically.
    pub async fn list_sectors(&self) -> DbResult<Vec<Sector>> {
        let sectors = sqlx::query_as::<_, Sector>(
            "SELECT id, name, margin_bps FROM sectors ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sectors)
    }

    /// Fetches one sector by id.
    pub async fn get_sector(&self, id: i64) -> DbResult<Option<Sector>> {
        let sector = sqlx::query_as::<_, Sector>(
            "SELECT id, name, margin_bps FROM sectors WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sector)
    }

    /// Adds a sector. Name must be unique.
    pub async fn add_sector(&self, name: &str, margin: MarginRate) -> DbResult<i64> {
        validate_product_name(name).map_err(CoreError::from)?;
        validate_margin_bps(margin.bps()).map_err(CoreError::from)?;

        let result = sqlx::query("INSERT INTO sectors (name, margin_bps) VALUES (?, ?)")
            .bind(name.trim())
            .bind(margin.bps())
            .execute(&self.pool)
            .await?;

        info!(name = name.trim(), bps = margin.bps(), "Sector added");
        Ok(result.last_insert_rowid())
    }

    /// Renames a sector and/or changes its margin.
    ///
    /// Already-derived product prices are NOT retroactively recomputed; the
    /// new margin applies from the next upsert/edit of each product.
    pub async fn update_sector(&self, id: i64, name: &str, margin: MarginRate) -> DbResult<()> {
        validate_product_name(name).map_err(CoreError::from)?;
        validate_margin_bps(margin.bps()).map_err(CoreError::from)?;

        let result = sqlx::query("UPDATE sectors SET name = ?, margin_bps = ? WHERE id = ?")
            .bind(name.trim())
            .bind(margin.bps())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(crate::error::DbError::not_found("Sector", id));
        }

        Ok(())
    }

    /// Deletes a sector. Unguarded: products referencing it fall back to
    /// sector_id NULL (margin 0) via ON DELETE SET NULL.
    pub async fn delete_sector(&self, id: i64) -> DbResult<()> {
        sqlx::query("DELETE FROM sectors WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        info!(sector_id = id, "Sector deleted");
        Ok(())
    }

    // =========================================================================
    // Products: Writes
    // =========================================================================

    /// Adds a product or tops up an existing one, keyed by `code`.
    ///
    /// ## Behavior
    /// - Unknown code: inserts the product with the given fields; the
    ///   quantity delta becomes the initial stock.
    /// - Known code: adds the delta to the stored quantity (guarded against
    ///   going negative); absent cost/sector/barcode keep the stored values.
    /// - Either way the sale price is re-derived from cost + sector margin
    ///   and one INGRESS ledger entry is written, atomically.
    ///
    /// Returns the product id.
    pub async fn upsert_product(&self, input: &ProductUpsert) -> DbResult<i64> {
        validate_code(&input.code).map_err(CoreError::from)?;
        validate_product_name(&input.name).map_err(CoreError::from)?;

        let code = input.code.trim();
        let name = input.name.trim();
        let barcode_input = normalize_barcode(input.barcode.as_deref());

        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE code = ?"
        ))
        .bind(code)
        .fetch_optional(&mut *tx)
        .await?;

        let product_id = match existing {
            Some(current) => {
                let new_quantity = current.quantity + input.quantity_delta;
                if new_quantity < 0 {
                    return Err(CoreError::InsufficientStock {
                        product: current.name,
                        available: current.quantity,
                        requested: -input.quantity_delta,
                    }
                    .into());
                }

                // Absent fields fall back to the stored values.
                let cost_cents = input.cost_cents.or(current.cost_cents);
                let sector_id = input.sector_id.or(current.sector_id);
                let barcode = barcode_input.or(current.barcode);

                let margin = sector_margin(&mut tx, sector_id).await?;
                let price = derive_price(cost_cents.map(Money::from_cents), margin);

                sqlx::query(
                    r#"
                    UPDATE products
                    SET name = ?, quantity = ?, cost_cents = ?, sector_id = ?,
                        price_cents = ?, barcode = ?
                    WHERE id = ?
                    "#,
                )
                .bind(name)
                .bind(new_quantity)
                .bind(cost_cents)
                .bind(sector_id)
                .bind(price.cents())
                .bind(&barcode)
                .bind(current.id)
                .execute(&mut *tx)
                .await?;

                append_movement(
                    &mut tx,
                    NewMovement {
                        product_id: Some(current.id),
                        kind: MovementKind::Ingress,
                        quantity_delta: input.quantity_delta,
                        unit_price_cents: price.cents(),
                        notes: "Restock ingress",
                    },
                )
                .await?;

                debug!(code, delta = input.quantity_delta, "Product topped up");
                current.id
            }

            None => {
                validate_stock_count(input.quantity_delta).map_err(CoreError::from)?;

                let margin = sector_margin(&mut tx, input.sector_id).await?;
                let price = derive_price(input.cost_cents.map(Money::from_cents), margin);

                let result = sqlx::query(
                    r#"
                    INSERT INTO products (code, name, quantity, cost_cents, sector_id,
                                          price_cents, barcode)
                    VALUES (?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(code)
                .bind(name)
                .bind(input.quantity_delta)
                .bind(input.cost_cents)
                .bind(input.sector_id)
                .bind(price.cents())
                .bind(&barcode_input)
                .execute(&mut *tx)
                .await?;

                let id = result.last_insert_rowid();

                append_movement(
                    &mut tx,
                    NewMovement {
                        product_id: Some(id),
                        kind: MovementKind::Ingress,
                        quantity_delta: input.quantity_delta,
                        unit_price_cents: price.cents(),
                        notes: "Initial stock ingress",
                    },
                )
                .await?;

                info!(code, name, "Product created");
                id
            }
        };

        tx.commit().await?;
        Ok(product_id)
    }

    /// Overwrites every field of an existing product.
    ///
    /// Unlike [`upsert_product`](Self::upsert_product), the input is
    /// authoritative: `barcode: None` clears the stored barcode, `quantity`
    /// replaces the stock count. The price is re-derived. One EDIT ledger
    /// entry (delta 0) records the change.
    pub async fn edit_product(&self, product_id: i64, edit: &ProductEdit) -> DbResult<()> {
        validate_code(&edit.code).map_err(CoreError::from)?;
        validate_product_name(&edit.name).map_err(CoreError::from)?;
        validate_stock_count(edit.quantity).map_err(CoreError::from)?;

        let barcode = normalize_barcode(edit.barcode.as_deref());

        let mut tx = self.pool.begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM products WHERE id = ?")
            .bind(product_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(CoreError::ProductNotFound(product_id).into());
        }

        let margin = sector_margin(&mut tx, edit.sector_id).await?;
        let price = derive_price(edit.cost_cents.map(Money::from_cents), margin);

        sqlx::query(
            r#"
            UPDATE products
            SET code = ?, name = ?, quantity = ?, cost_cents = ?, sector_id = ?,
                price_cents = ?, barcode = ?
            WHERE id = ?
            "#,
        )
        .bind(edit.code.trim())
        .bind(edit.name.trim())
        .bind(edit.quantity)
        .bind(edit.cost_cents)
        .bind(edit.sector_id)
        .bind(price.cents())
        .bind(&barcode)
        .bind(product_id)
        .execute(&mut *tx)
        .await?;

        append_movement(
            &mut tx,
            NewMovement {
                product_id: Some(product_id),
                kind: MovementKind::Edit,
                quantity_delta: 0,
                unit_price_cents: price.cents(),
                notes: "Product edited",
            },
        )
        .await?;

        tx.commit().await?;
        info!(product_id, "Product edited");
        Ok(())
    }

    /// Hard-deletes a product.
    ///
    /// Silently a no-op when the id is unknown (double-click safe). The
    /// ledger keeps a DELETE entry carrying the product's last name in its
    /// notes; the entry itself has no product id, since the row is gone.
    pub async fn delete_product(&self, product_id: i64) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        let victim: Option<(String, i64)> =
            sqlx::query_as("SELECT name, price_cents FROM products WHERE id = ?")
                .bind(product_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((name, price_cents)) = victim else {
            return Ok(());
        };

        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        append_movement(
            &mut tx,
            NewMovement {
                product_id: None,
                kind: MovementKind::Delete,
                quantity_delta: 0,
                unit_price_cents: price_cents,
                notes: &format!("Deleted: {name}"),
            },
        )
        .await?;

        tx.commit().await?;
        info!(product_id, name, "Product deleted");
        Ok(())
    }

    // =========================================================================
    // Products: Reads
    // =========================================================================

    /// Lists the whole catalog joined with sector names, alphabetically.
    pub async fn list_products(&self) -> DbResult<Vec<ProductWithSector>> {
        let products = sqlx::query_as::<_, ProductWithSector>(
            r#"
            SELECT p.id, p.code, p.name, p.quantity, p.cost_cents, p.sector_id,
                   COALESCE(s.name, '') AS sector_name,
                   p.price_cents, p.barcode, p.movement_count
            FROM products p
            LEFT JOIN sectors s ON s.id = p.sector_id
            ORDER BY p.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Fetches one product by row id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Fetches one product by its unique internal code.
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE code = ?"
        ))
        .bind(code.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Fetches one product by barcode. The scanner path at the POS.
    pub async fn get_by_barcode(&self, barcode: &str) -> DbResult<Option<Product>> {
        let Some(barcode) = normalize_barcode(Some(barcode)) else {
            return Ok(None);
        };

        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE barcode = ?"
        ))
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Case-insensitive name/code search for the catalog screen.
    pub async fn search(&self, term: &str) -> DbResult<Vec<ProductWithSector>> {
        let pattern = format!("%{}%", term.trim());

        let products = sqlx::query_as::<_, ProductWithSector>(
            r#"
            SELECT p.id, p.code, p.name, p.quantity, p.cost_cents, p.sector_id,
                   COALESCE(s.name, '') AS sector_name,
                   p.price_cents, p.barcode, p.movement_count
            FROM products p
            LEFT JOIN sectors s ON s.id = p.sector_id
            WHERE p.name LIKE ? OR p.code LIKE ?
            ORDER BY p.name
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Total number of products in the catalog.
    pub async fn count_products(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
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

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn sector_id(db: &Database, name: &str) -> i64 {
        db.catalog()
            .list_sectors()
            .await
            .unwrap()
            .into_iter()
            .find(|s| s.name == name)
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_upsert_creates_with_derived_price() {
        let db = test_db().await;
        let grocery = sector_id(&db, "Grocery").await; // 3000 bps

        let id = db
            .catalog()
            .upsert_product(&ProductUpsert {
                code: "RICE-1K".to_string(),
                name: "Rice 1kg".to_string(),
                quantity_delta: 10,
                cost_cents: Some(10_000),
                sector_id: Some(grocery),
                barcode: Some("7791234567890".to_string()),
            })
            .await
            .unwrap();

        let product = db.catalog().get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.quantity, 10);
        // 10000 + 30% margin
        assert_eq!(product.price_cents, 13_000);
        assert_eq!(product.barcode.as_deref(), Some("7791234567890"));
    }

    #[tokio::test]
    async fn test_upsert_merges_quantity_and_keeps_absent_fields() {
        let db = test_db().await;
        let grocery = sector_id(&db, "Grocery").await;

        let id = db
            .catalog()
            .upsert_product(&ProductUpsert {
                code: "RICE-1K".to_string(),
                name: "Rice 1kg".to_string(),
                quantity_delta: 10,
                cost_cents: Some(10_000),
                sector_id: Some(grocery),
                barcode: Some("7791234567890".to_string()),
            })
            .await
            .unwrap();

        // Top up with absent cost/sector/barcode: stored values must survive.
        let same_id = db
            .catalog()
            .upsert_product(&ProductUpsert {
                code: "RICE-1K".to_string(),
                name: "Rice 1kg".to_string(),
                quantity_delta: 7,
                cost_cents: None,
                sector_id: None,
                barcode: None,
            })
            .await
            .unwrap();
        assert_eq!(same_id, id);

        let product = db.catalog().get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.quantity, 17);
        assert_eq!(product.cost_cents, Some(10_000));
        assert_eq!(product.sector_id, Some(grocery));
        assert_eq!(product.price_cents, 13_000);
        assert_eq!(product.barcode.as_deref(), Some("7791234567890"));

        // Two INGRESS entries, one per upsert.
        let ledger = db.movements().for_product(id).await.unwrap();
        assert_eq!(ledger.len(), 2);
        assert!(ledger.iter().all(|m| m.kind == MovementKind::Ingress));
    }

    #[tokio::test]
    async fn test_upsert_negative_delta_cannot_underflow() {
        let db = test_db().await;

        db.catalog()
            .upsert_product(&ProductUpsert {
                code: "A-1".to_string(),
                name: "A".to_string(),
                quantity_delta: 5,
                cost_cents: Some(100),
                sector_id: None,
                barcode: None,
            })
            .await
            .unwrap();

        let err = db
            .catalog()
            .upsert_product(&ProductUpsert {
                code: "A-1".to_string(),
                name: "A".to_string(),
                quantity_delta: -6,
                cost_cents: None,
                sector_id: None,
                barcode: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientStock { .. })
        ));

        // Stock untouched, no second ledger entry.
        let product = db.catalog().get_by_code("A-1").await.unwrap().unwrap();
        assert_eq!(product.quantity, 5);
        assert_eq!(product.movement_count, 1);
    }

    #[tokio::test]
    async fn test_upsert_blank_barcode_is_normalized_to_null() {
        let db = test_db().await;

        let a = db
            .catalog()
            .upsert_product(&ProductUpsert {
                code: "A-1".to_string(),
                name: "A".to_string(),
                quantity_delta: 1,
                cost_cents: None,
                sector_id: None,
                barcode: Some("   ".to_string()),
            })
            .await
            .unwrap();

        // A second blank barcode must not trip the UNIQUE constraint.
        db.catalog()
            .upsert_product(&ProductUpsert {
                code: "B-2".to_string(),
                name: "B".to_string(),
                quantity_delta: 1,
                cost_cents: None,
                sector_id: None,
                barcode: Some("".to_string()),
            })
            .await
            .unwrap();

        let product = db.catalog().get_by_id(a).await.unwrap().unwrap();
        assert!(product.barcode.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_barcode_rejected() {
        let db = test_db().await;

        db.catalog()
            .upsert_product(&ProductUpsert {
                code: "A-1".to_string(),
                name: "A".to_string(),
                quantity_delta: 1,
                cost_cents: None,
                sector_id: None,
                barcode: Some("779".to_string()),
            })
            .await
            .unwrap();

        let err = db
            .catalog()
            .upsert_product(&ProductUpsert {
                code: "B-2".to_string(),
                name: "B".to_string(),
                quantity_delta: 1,
                cost_cents: None,
                sector_id: None,
                barcode: Some("779".to_string()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_edit_overwrites_everything() {
        let db = test_db().await;
        let deli = sector_id(&db, "Deli").await; // 6000 bps

        let id = db
            .catalog()
            .upsert_product(&ProductUpsert {
                code: "HAM-200".to_string(),
                name: "Sliced Ham 200g".to_string(),
                quantity_delta: 8,
                cost_cents: Some(1000),
                sector_id: None,
                barcode: Some("779".to_string()),
            })
            .await
            .unwrap();

        db.catalog()
            .edit_product(
                id,
                &ProductEdit {
                    code: "HAM-200".to_string(),
                    name: "Sliced Ham 200 g".to_string(),
                    quantity: 3,
                    cost_cents: Some(1000),
                    sector_id: Some(deli),
                    barcode: None, // authoritative: clears the barcode
                },
            )
            .await
            .unwrap();

        let product = db.catalog().get_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.name, "Sliced Ham 200 g");
        assert_eq!(product.quantity, 3);
        assert_eq!(product.price_cents, 1600); // 1000 + 60%
        assert!(product.barcode.is_none());

        // Edit entry has delta 0.
        let ledger = db.movements().for_product(id).await.unwrap();
        assert_eq!(ledger[0].kind, MovementKind::Edit);
        assert_eq!(ledger[0].quantity_delta, 0);
    }

    #[tokio::test]
    async fn test_edit_unknown_product_fails() {
        let db = test_db().await;

        let err = db
            .catalog()
            .edit_product(
                999,
                &ProductEdit {
                    code: "X".to_string(),
                    name: "X".to_string(),
                    quantity: 0,
                    cost_cents: None,
                    sector_id: None,
                    barcode: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::ProductNotFound(999))));
    }

    #[tokio::test]
    async fn test_delete_keeps_named_ledger_entry() {
        let db = test_db().await;

        let id = db
            .catalog()
            .upsert_product(&ProductUpsert {
                code: "A-1".to_string(),
                name: "Disposable".to_string(),
                quantity_delta: 1,
                cost_cents: Some(100),
                sector_id: None,
                barcode: None,
            })
            .await
            .unwrap();

        db.catalog().delete_product(id).await.unwrap();
        assert!(db.catalog().get_by_id(id).await.unwrap().is_none());

        let rows = db.movements().recent(10).await.unwrap();
        let delete = &rows[0];
        assert_eq!(delete.kind, MovementKind::Delete);
        assert_eq!(delete.quantity_delta, 0);
        assert!(delete.product_name.is_none()); // weak ref, row gone
        assert_eq!(delete.notes, "Deleted: Disposable");

        // Double delete is a silent no-op.
        db.catalog().delete_product(id).await.unwrap();
        assert_eq!(db.movements().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_deleting_sector_degrades_margin_to_zero() {
        let db = test_db().await;
        let deli = sector_id(&db, "Deli").await;

        let id = db
            .catalog()
            .upsert_product(&ProductUpsert {
                code: "HAM-200".to_string(),
                name: "Sliced Ham".to_string(),
                quantity_delta: 1,
                cost_cents: Some(1000),
                sector_id: Some(deli),
                barcode: None,
            })
            .await
            .unwrap();

        db.catalog().delete_sector(deli).await.unwrap();

        // sector_id went NULL; the next top-up re-derives at margin 0.
        db.catalog()
            .upsert_product(&ProductUpsert {
                code: "HAM-200".to_string(),
                name: "Sliced Ham".to_string(),
                quantity_delta: 1,
                cost_cents: None,
                sector_id: None,
                barcode: None,
            })
            .await
            .unwrap();

        let product = db.catalog().get_by_id(id).await.unwrap().unwrap();
        assert!(product.sector_id.is_none());
        assert_eq!(product.price_cents, 1000);
    }

    #[tokio::test]
    async fn test_lookup_by_code_and_barcode() {
        let db = test_db().await;

        db.catalog()
            .upsert_product(&ProductUpsert {
                code: "A-1".to_string(),
                name: "A".to_string(),
                quantity_delta: 1,
                cost_cents: None,
                sector_id: None,
                barcode: Some("7791".to_string()),
            })
            .await
            .unwrap();

        assert!(db.catalog().get_by_code("A-1").await.unwrap().is_some());
        assert!(db.catalog().get_by_code("A-2").await.unwrap().is_none());
        assert!(db.catalog().get_by_barcode("7791").await.unwrap().is_some());
        assert!(db.catalog().get_by_barcode("  ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_matches_name_and_code() {
        let db = test_db().await;

        db.catalog()
            .upsert_product(&ProductUpsert {
                code: "HAM-200".to_string(),
                name: "Sliced Ham".to_string(),
                quantity_delta: 1,
                cost_cents: None,
                sector_id: None,
                barcode: None,
            })
            .await
            .unwrap();
        db.catalog()
            .upsert_product(&ProductUpsert {
                code: "RICE-1K".to_string(),
                name: "Rice 1kg".to_string(),
                quantity_delta: 1,
                cost_cents: None,
                sector_id: None,
                barcode: None,
            })
            .await
            .unwrap();

        assert_eq!(db.catalog().search("ham").await.unwrap().len(), 1);
        assert_eq!(db.catalog().search("RICE").await.unwrap().len(), 1);
        assert_eq!(db.catalog().search("").await.unwrap().len(), 2);
    }
}
