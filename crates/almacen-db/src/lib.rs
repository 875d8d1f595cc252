//! # almacen-db: Database Layer for Almacen
//!
//! SQLite persistence and the transactional engines for the Almacen store
//! manager.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Almacen Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Desktop GUI (external)                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  almacen-core (Pure Logic)                       │   │
//! │  │            Types • Money • Pricing • Validation                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ almacen-db (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────────┐  ┌──────────────────────────┐ │   │
//! │  │   │   pool   │  │  migrations  │  │       repository         │ │   │
//! │  │   │ Database │  │   embedded   │  │ catalog stock movement   │ │   │
//! │  │   │ DbConfig │  │     SQL      │  │ sale collections ...     │ │   │
//! │  │   └──────────┘  └──────────────┘  └──────────────────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │                          SQLite (WAL mode)                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Transactional Engines
//!
//! Every multi-step mutation (sale registration, refund, stock adjustment,
//! catalog upsert, collection) runs inside one explicit transaction. A failure
//! at any step rolls the whole operation back; no partial writes survive.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use almacen_db::{Database, DbConfig};
//! use almacen_core::{CustomerRef, PaymentMethod, SaleLine};
//!
//! let db = Database::new(DbConfig::new("./almacen.db")).await?;
//!
//! let sale_id = db
//!     .sales()
//!     .register_sale(
//!         &[SaleLine { product_id: 1, quantity: 2, unit_price_cents: 1600 }],
//!         PaymentMethod::Cash,
//!         CustomerRef::Anonymous,
//!         Some(5000),
//!     )
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::catalog::CatalogRepository;
pub use repository::collections::CollectionsRepository;
pub use repository::customer::CustomerRepository;
pub use repository::expense::ExpenseRepository;
pub use repository::movement::MovementRepository;
pub use repository::sale::SaleRepository;
pub use repository::stock::StockRepository;
