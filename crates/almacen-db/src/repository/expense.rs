//! # Expense Repository
//!
//! Auxiliary store bookkeeping: categorized expenses (rent, utilities,
//! supplier freight). Kept deliberately simple - expenses never touch stock
//! or the movement ledger.

use sqlx::SqlitePool;
use tracing::info;

use almacen_core::validation::validate_price_cents;
use almacen_core::{CoreError, Expense, ExpenseCategory};

use crate::error::DbResult;
use crate::repository::now_stamp;

/// Repository for expense bookkeeping.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseRepository { pool }
    }

    /// Adds an expense category. Name must be unique.
    pub async fn add_category(&self, name: &str) -> DbResult<i64> {
        let result = sqlx::query("INSERT INTO expense_categories (name) VALUES (?)")
            .bind(name.trim())
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Lists all categories, alphabetically.
    pub async fn list_categories(&self) -> DbResult<Vec<ExpenseCategory>> {
        let categories = sqlx::query_as::<_, ExpenseCategory>(
            "SELECT id, name FROM expense_categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Records an expense, timestamped now.
    pub async fn add_expense(
        &self,
        category_id: Option<i64>,
        description: &str,
        amount_cents: i64,
    ) -> DbResult<i64> {
        validate_price_cents(amount_cents).map_err(CoreError::from)?;

        let result = sqlx::query(
            r#"
            INSERT INTO expenses (category_id, description, amount_cents, timestamp)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(category_id)
        .bind(description.trim())
        .bind(amount_cents)
        .bind(now_stamp())
        .execute(&self.pool)
        .await?;

        info!(amount_cents, "Expense recorded");
        Ok(result.last_insert_rowid())
    }

    /// Returns expenses within an inclusive timestamp range, newest first.
    pub async fn list_between(&self, from: &str, to: &str) -> DbResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, category_id, description, amount_cents, timestamp
            FROM expenses
            WHERE timestamp >= ? AND timestamp <= ?
            ORDER BY id DESC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// Sums expenses within an inclusive timestamp range, in cents.
    pub async fn total_between(&self, from: &str, to: &str) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount_cents), 0) FROM expenses WHERE timestamp >= ? AND timestamp <= ?",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
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

    const ALL_TIME: (&str, &str) = ("2000-01-01 00:00:00", "2099-12-31 23:59:59");

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_categories_and_expenses() {
        let db = test_db().await;

        let rent = db.expenses().add_category("Rent").await.unwrap();
        db.expenses().add_category("Utilities").await.unwrap();
        assert_eq!(db.expenses().list_categories().await.unwrap().len(), 2);

        db.expenses()
            .add_expense(Some(rent), "August rent", 80_000)
            .await
            .unwrap();
        db.expenses()
            .add_expense(None, "Light bulbs", 1_200)
            .await
            .unwrap();

        let (from, to) = ALL_TIME;
        assert_eq!(db.expenses().list_between(from, to).await.unwrap().len(), 2);
        assert_eq!(db.expenses().total_between(from, to).await.unwrap(), 81_200);
    }

    #[tokio::test]
    async fn test_duplicate_category_rejected() {
        let db = test_db().await;
        db.expenses().add_category("Rent").await.unwrap();

        let err = db.expenses().add_category("Rent").await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_negative_amount_rejected() {
        let db = test_db().await;

        let err = db.expenses().add_expense(None, "Bad", -100).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_total_is_zero_when_empty() {
        let db = test_db().await;
        let (from, to) = ALL_TIME;
        assert_eq!(db.expenses().total_between(from, to).await.unwrap(), 0);
    }
}
