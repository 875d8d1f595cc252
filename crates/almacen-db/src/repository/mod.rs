//! # Repository Module
//!
//! Database repository implementations for Almacen.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  GUI action ("Confirm Sale")                                            │
//! │       │                                                                 │
//! │       │  db.sales().register_sale(lines, method, customer, cash)       │
//! │       ▼                                                                 │
//! │  SaleRepository                                                         │
//! │  ├── register_sale(...)   ← one BEGIN..COMMIT, rollback on any error  │
//! │  ├── refund_sale(...)     ← same atomicity policy                     │
//! │  └── get_by_id(...)                                                    │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Transaction boundaries live in exactly one place                    │
//! │  • SQL is isolated per entity                                          │
//! │  • The GUI never touches a connection                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`catalog::CatalogRepository`] - Sectors and products (upsert/edit/delete)
//! - [`stock::StockRepository`] - Ad-hoc stock adjustments
//! - [`movement::MovementRepository`] - Append-only stock ledger queries
//! - [`sale::SaleRepository`] - Sale registration and refunds
//! - [`collections::CollectionsRepository`] - Pending-sale settlement
//! - [`customer::CustomerRepository`] - Customer records
//! - [`expense::ExpenseRepository`] - Expense bookkeeping

pub mod catalog;
pub mod collections;
pub mod customer;
pub mod expense;
pub mod movement;
pub mod sale;
pub mod stock;

/// Current local time as the sortable text format every table stores:
/// `YYYY-MM-DD HH:MM:SS`.
pub(crate) fn now_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_stamp_is_sortable_format() {
        let stamp = now_stamp();
        // YYYY-MM-DD HH:MM:SS is exactly 19 chars
        assert_eq!(stamp.len(), 19);
        assert_eq!(&stamp[4..5], "-");
        assert_eq!(&stamp[10..11], " ");
        assert_eq!(&stamp[13..14], ":");
    }
}
