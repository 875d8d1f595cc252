//! # Domain Types
//!
//! Core domain types used throughout Almacen.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │ MovementEntry   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  code (unique)  │   │  status         │   │  kind           │       │
//! │  │  quantity       │   │  total_cents    │   │  quantity_delta │       │
//! │  │  price_cents    │   │  payment_method │   │  unit_price     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   MarginRate    │   │   SaleStatus    │   │ PaymentMethod   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Paid           │   │  Cash, Transfer │       │
//! │  │  6000 = 60%     │   │  Pending        │   │  Qr, Pending    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every entity is a struct with named fields, never a positional row tuple,
//! so a schema change can never silently shift a column under a reader.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Margin Rate
// =============================================================================

/// Sector margin represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 6000 bps = 60% (e.g., the deli counter margin)
///
/// Storing the margin as an integer keeps price derivation exact; the
/// fraction shown in the UI (0.60) is a display concern only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginRate(u32);

impl MarginRate {
    /// Creates a margin rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        MarginRate(bps)
    }

    /// Creates a margin rate from a fraction (for convenience).
    ///
    /// `MarginRate::from_fraction(0.60)` == `MarginRate::from_bps(6000)`
    pub fn from_fraction(fraction: f64) -> Self {
        MarginRate((fraction * 10_000.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a fraction (for display only).
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.0 as f64 / 10_000.0
    }

    /// Zero margin (products without a sector).
    #[inline]
    pub const fn zero() -> Self {
        MarginRate(0)
    }

    /// Checks if the margin is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for MarginRate {
    fn default() -> Self {
        MarginRate::zero()
    }
}

// =============================================================================
// Sector
// =============================================================================

/// A margin category. A product's sale price is derived from its cost plus
/// its sector's margin.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sector {
    pub id: i64,
    /// Display name, unique (e.g. "Deli", "Bakery").
    pub name: String,
    /// Margin in basis points (6000 = 60%).
    pub margin_bps: u32,
}

impl Sector {
    /// Returns the margin as a MarginRate.
    #[inline]
    pub fn margin(&self) -> MarginRate {
        MarginRate::from_bps(self.margin_bps)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Row id.
    pub id: i64,

    /// Internal code - business identifier, unique.
    pub code: String,

    /// Display name shown on the POS screen and the ticket.
    pub name: String,

    /// Current stock level. Never negative.
    pub quantity: i64,

    /// Cost in cents (what the store paid). Absent until first priced ingress.
    pub cost_cents: Option<i64>,

    /// Margin category. Absent means margin 0: price == cost.
    pub sector_id: Option<i64>,

    /// Derived sale price in cents: cost + cost × sector margin.
    pub price_cents: i64,

    /// Barcode (EAN-13, UPC-A, etc.). Unique among non-NULL values;
    /// blank input is normalized to absent before persistence.
    pub barcode: Option<String>,

    /// Number of ledger entries recorded against this product.
    pub movement_count: i64,
}

impl Product {
    /// Returns the sale price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the cost as a Money type, if known.
    #[inline]
    pub fn cost(&self) -> Option<Money> {
        self.cost_cents.map(Money::from_cents)
    }

    /// Checks whether `quantity` units can be taken from stock.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.quantity >= quantity
    }
}

/// A product row joined with its sector name, for catalog listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductWithSector {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub quantity: i64,
    pub cost_cents: Option<i64>,
    pub sector_id: Option<i64>,
    /// Empty string when the product has no sector (or the sector was deleted).
    pub sector_name: String,
    pub price_cents: i64,
    pub barcode: Option<String>,
    pub movement_count: i64,
}

// =============================================================================
// Product boundary inputs
// =============================================================================

/// Input for the add-or-top-up catalog operation.
///
/// Bulk import and the "scan unknown code" POS flow both need idempotent
/// upsert semantics: the caller never pre-checks existence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpsert {
    pub code: String,
    pub name: String,
    /// Units being ingressed (the initial stock for a brand-new product).
    pub quantity_delta: i64,
    /// New cost; falls back to the existing cost when absent.
    pub cost_cents: Option<i64>,
    /// New sector; falls back to the existing sector when absent.
    pub sector_id: Option<i64>,
    /// Raw barcode input; normalized (blank ⇒ absent), falls back to the
    /// existing barcode when absent.
    pub barcode: Option<String>,
}

/// Full-overwrite edit of an existing product.
///
/// Unlike upsert, every field here is authoritative: `barcode: None` clears
/// the stored barcode, and `quantity` replaces the stock count outright
/// (the ledger records the edit with a delta of 0 - it is informational).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductEdit {
    pub code: String,
    pub name: String,
    pub quantity: i64,
    pub cost_cents: Option<i64>,
    pub sector_id: Option<i64>,
    pub barcode: Option<String>,
}

// =============================================================================
// Movement Ledger
// =============================================================================

/// What kind of stock/price-affecting event a ledger entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementKind {
    /// Stock added: initial stocking or restock.
    Ingress,
    /// Stock removed by a sale (or a negative ad-hoc adjustment).
    Sale,
    /// Product fields changed; quantity delta is always 0.
    Edit,
    /// Product hard-deleted; the entry keeps the name in its notes.
    Delete,
    /// Stock restored by a refund.
    Refund,
}

/// An immutable audit record of a stock/price-affecting event.
///
/// Entries are append-only: never mutated, never deleted. `product_id` is a
/// weak reference - it survives product deletion (DELETE entries are written
/// with no product id at all, since the row is already gone).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MovementEntry {
    pub id: i64,
    pub product_id: Option<i64>,
    pub kind: MovementKind,
    /// Signed stock change. Negative for sales, positive for ingress/refund,
    /// zero for edits and deletions.
    pub quantity_delta: i64,
    /// Product unit price at the time of the event, in cents.
    pub unit_price_cents: i64,
    /// Sortable `YYYY-MM-DD HH:MM:SS` text.
    pub timestamp: String,
    pub notes: String,
}

/// A ledger entry joined with the product's current name, for history views.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MovementRow {
    pub id: i64,
    /// Absent when the product has since been deleted.
    pub product_name: Option<String>,
    pub kind: MovementKind,
    pub quantity_delta: i64,
    pub unit_price_cents: i64,
    pub timestamp: String,
    pub notes: String,
}

// =============================================================================
// Customer
// =============================================================================

/// A customer on record. Referenced optionally by sales (required in practice
/// for deferred-payment sales, so someone owes the money).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// How the POS identifies the customer on a sale, resolved exactly once at
/// the sale-registration boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerRef {
    /// Walk-in sale, no customer recorded.
    #[default]
    Anonymous,
    /// A customer on record; registration fails if the id is unknown.
    Id(i64),
    /// Free-text name, stored as-is without creating a customer row.
    Name(String),
}

// =============================================================================
// Sale Status
// =============================================================================

/// The settlement status of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum SaleStatus {
    /// Settled at the counter.
    Paid,
    /// Deferred payment (store credit); settled later via a collection.
    Pending,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was (or will be) paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash at the counter.
    Cash,
    /// Bank transfer.
    Transfer,
    /// QR-code wallet payment.
    Qr,
    /// Deferred - creates a PENDING sale to be collected later.
    Pending,
}

impl PaymentMethod {
    /// The status a freshly registered sale gets for this method.
    ///
    /// Invariant: `status == Pending` iff `payment_method == Pending` at
    /// creation time.
    #[inline]
    pub fn initial_status(&self) -> SaleStatus {
        match self {
            PaymentMethod::Pending => SaleStatus::Pending,
            _ => SaleStatus::Paid,
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A registered sale. Never hard-deleted; refunds shrink its total and
/// remove line items, collections flip its status to PAID.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    /// Sortable `YYYY-MM-DD HH:MM:SS` text.
    pub timestamp: String,
    pub payment_method: PaymentMethod,
    pub status: SaleStatus,
    /// Sum of the live (non-refunded) line items' subtotals, in cents.
    pub total_cents: i64,
    /// Cash handed over, when the cashier recorded it.
    pub cash_received_cents: Option<i64>,
    /// cash_received - total. Negative means the customer still owes.
    pub change_cents: Option<i64>,
    pub customer_id: Option<i64>,
    /// Resolved display name (from the customer row, or free text as given).
    pub customer_name: Option<String>,
}

impl Sale {
    /// Returns the recorded total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Sale Line Item
// =============================================================================

/// One line of a sale. The unit price is frozen at sale time; refunds
/// hard-delete the row (the effect stays visible in the movement ledger).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleLineItem {
    pub id: i64,
    pub sale_id: i64,
    /// Weak reference; survives product deletion.
    pub product_id: Option<i64>,
    pub quantity: i64,
    pub unit_price_cents: i64,
    /// quantity × unit_price, in cents.
    pub subtotal_cents: i64,
}

impl SaleLineItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

/// Input line for sale registration: what the POS cart sends.
///
/// Lines are applied independently and in order - duplicate product ids are
/// NOT merged; a caller wanting merged quantities must pre-aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleLine {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl SaleLine {
    /// quantity × unit_price, in cents.
    ///
    /// Plain i64 multiply: `validate_sale_lines` caps both factors
    /// (MAX_LINE_QUANTITY × MAX_PRICE_CENTS = 10^12), so validated lines
    /// cannot overflow here.
    #[inline]
    pub fn subtotal_cents(&self) -> i64 {
        self.quantity * self.unit_price_cents
    }
}

// =============================================================================
// Collection
// =============================================================================

/// The record of a pending sale being paid: who, how much, how, and when.
/// Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Collection {
    pub id: i64,
    pub sale_id: i64,
    pub customer_id: Option<i64>,
    /// Sortable `YYYY-MM-DD HH:MM:SS` text.
    pub timestamp: String,
    /// The sale total that was settled, in cents.
    pub amount_cents: i64,
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Expenses (auxiliary bookkeeping)
// =============================================================================

/// A category for store expenses (rent, utilities, supplier freight...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ExpenseCategory {
    pub id: i64,
    pub name: String,
}

/// A store expense entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Expense {
    pub id: i64,
    pub category_id: Option<i64>,
    pub description: String,
    pub amount_cents: i64,
    /// Sortable `YYYY-MM-DD HH:MM:SS` text.
    pub timestamp: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
