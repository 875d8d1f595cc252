//! # almacen-core: Pure Business Logic for Almacen
//!
//! This crate is the **heart** of the Almacen store manager. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Almacen Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Desktop GUI (external)                       │   │
//! │  │    Catalog UI ──► POS UI ──► Refund UI ──► Collections UI      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ almacen-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  derive_  │  │   rules   │  │   │
//! │  │   │   Sale    │  │MarginRate │  │   price   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    almacen-db (Database Layer)                   │   │
//! │  │       SQLite queries, migrations, transactional engines          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, MovementEntry, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Price derivation from cost + sector margin
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use almacen_core::money::Money;
//! use almacen_core::pricing::derive_price;
//! use almacen_core::types::MarginRate;
//!
//! // Create money from cents (never from floats!)
//! let cost = Money::from_cents(10_000); // $100.00
//!
//! // Derive the sale price from cost + sector margin
//! let margin = MarginRate::from_bps(3000); // 30%
//! let price = derive_price(Some(cost), margin);
//!
//! assert_eq!(price.cents(), 13_000); // $130.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use almacen_core::Money` instead of
// `use almacen_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item in a sale
///
/// ## Business Reason
/// Prevents accidental over-selling (e.g., scanning 100000 instead of 10).
/// Matches the POS screen's quantity selector range.
pub const MAX_LINE_QUANTITY: i64 = 10_000;

/// Maximum line items allowed in a single sale
///
/// ## Business Reason
/// Prevents runaway carts and keeps ticket printing sane for a small store.
pub const MAX_SALE_LINES: usize = 100;

/// Maximum sector margin in basis points (100_000 = 1000%)
///
/// ## Business Reason
/// Margins above 100% are legitimate for some categories, but a cap guards
/// against fat-fingered input (e.g. entering 6000% instead of 60%).
pub const MAX_MARGIN_BPS: u32 = 100_000;

/// Maximum price or cost per unit, in cents ($1,000,000.00)
///
/// ## Business Reason
/// Nothing in a corner store costs a million dollars; a price past this is
/// scanner garbage or a typo. The cap also bounds every line subtotal
/// (MAX_PRICE_CENTS × MAX_LINE_QUANTITY) far below i64 overflow, so the
/// plain integer multiply in `SaleLine::subtotal_cents` is always safe on
/// validated input.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;
