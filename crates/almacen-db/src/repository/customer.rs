//! # Customer Repository
//!
//! CRUD for customers on record. Sales reference customers with ON DELETE
//! SET NULL, so deleting a customer never touches sale history - the sale
//! keeps the resolved name text it captured at registration.

use sqlx::SqlitePool;
use tracing::info;

use almacen_core::validation::validate_product_name;
use almacen_core::{CoreError, Customer};

use crate::error::{DbError, DbResult};

/// Repository for customer records.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new customer repository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Adds a customer. Returns the new id.
    pub async fn add(
        &self,
        name: &str,
        phone: Option<&str>,
        address: Option<&str>,
        notes: Option<&str>,
    ) -> DbResult<i64> {
        validate_product_name(name).map_err(CoreError::from)?;

        let result = sqlx::query(
            "INSERT INTO customers (name, phone, address, notes) VALUES (?, ?, ?, ?)",
        )
        .bind(name.trim())
        .bind(phone)
        .bind(address)
        .bind(notes)
        .execute(&self.pool)
        .await?;

        info!(name = name.trim(), "Customer added");
        Ok(result.last_insert_rowid())
    }

    /// Overwrites a customer's fields.
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        phone: Option<&str>,
        address: Option<&str>,
        notes: Option<&str>,
    ) -> DbResult<()> {
        validate_product_name(name).map_err(CoreError::from)?;

        let result = sqlx::query(
            "UPDATE customers SET name = ?, phone = ?, address = ?, notes = ? WHERE id = ?",
        )
        .bind(name.trim())
        .bind(phone)
        .bind(address)
        .bind(notes)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        Ok(())
    }

    /// Deletes a customer. Past sales keep their captured name; their
    /// customer_id goes NULL.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        info!(customer_id = id, "Customer deleted");
        Ok(())
    }

    /// Fetches one customer by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, name, phone, address, notes FROM customers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Lists all customers, alphabetically.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT id, name, phone, address, notes FROM customers ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    /// Case-insensitive name search.
    pub async fn search(&self, term: &str) -> DbResult<Vec<Customer>> {
        let pattern = format!("%{}%", term.trim());

        let customers = sqlx::query_as::<_, Customer>(
            "SELECT id, name, phone, address, notes FROM customers WHERE name LIKE ? ORDER BY name",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use almacen_core::{CustomerRef, PaymentMethod, ProductUpsert, SaleLine};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_add_get_update_delete() {
        let db = test_db().await;

        let id = db
            .customers()
            .add("Maria Lopez", Some("555-0101"), None, None)
            .await
            .unwrap();

        let customer = db.customers().get_by_id(id).await.unwrap().unwrap();
        assert_eq!(customer.name, "Maria Lopez");
        assert_eq!(customer.phone.as_deref(), Some("555-0101"));

        db.customers()
            .update(id, "Maria Lopez", Some("555-0202"), Some("Main St 4"), None)
            .await
            .unwrap();
        let customer = db.customers().get_by_id(id).await.unwrap().unwrap();
        assert_eq!(customer.phone.as_deref(), Some("555-0202"));

        db.customers().delete(id).await.unwrap();
        assert!(db.customers().get_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_unknown_customer() {
        let db = test_db().await;
        let err = db
            .customers()
            .update(999, "Nobody", None, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_search() {
        let db = test_db().await;
        db.customers().add("Maria Lopez", None, None, None).await.unwrap();
        db.customers().add("Jose Garcia", None, None, None).await.unwrap();

        assert_eq!(db.customers().search("maria").await.unwrap().len(), 1);
        assert_eq!(db.customers().search("z").await.unwrap().len(), 1);
        assert_eq!(db.customers().search("").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_keeps_sale_name() {
        let db = test_db().await;

        let customer = db.customers().add("Don Jose", None, None, None).await.unwrap();
        let product = db
            .catalog()
            .upsert_product(&ProductUpsert {
                code: "A-1".to_string(),
                name: "Widget".to_string(),
                quantity_delta: 5,
                cost_cents: Some(100),
                sector_id: None,
                barcode: None,
            })
            .await
            .unwrap();
        let sale_id = db
            .sales()
            .register_sale(
                &[SaleLine {
                    product_id: product,
                    quantity: 1,
                    unit_price_cents: 100,
                }],
                PaymentMethod::Cash,
                CustomerRef::Id(customer),
                None,
            )
            .await
            .unwrap();

        db.customers().delete(customer).await.unwrap();

        // FK went NULL, captured name survives.
        let sale = db.sales().get_by_id(sale_id).await.unwrap().unwrap();
        assert!(sale.customer_id.is_none());
        assert_eq!(sale.customer_name.as_deref(), Some("Don Jose"));
    }
}
