//! # Pricing Module
//!
//! Price derivation from cost + sector margin, and sale total math.
//!
//! ## Price Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  price = cost + round(cost × margin)                                    │
//! │                                                                         │
//! │  cost $100.00, margin 30%  →  $130.00                                  │
//! │  cost $0.00,   margin 60%  →  $0.00                                    │
//! │  cost absent,  any margin  →  $0.00  (unpriced product)                │
//! │  margin absent (no sector / deleted sector)  →  price == cost          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every product-mutating operation (ingress, upsert, edit) recomputes the
//! price through [`derive_price`]; nothing else in the system is allowed to
//! invent a price.

use crate::money::Money;
use crate::types::{MarginRate, SaleLine};

/// Derives a product's sale price from its cost and sector margin.
///
/// A missing cost yields a zero price (the product is unpriced until its
/// first costed ingress). A zero margin - including the case of a deleted
/// or never-assigned sector - yields price == cost.
///
/// ## Rounding
/// The margin amount is rounded half-up to the nearest cent using integer
/// math: `(cost_cents × bps + 5000) / 10000`. i128 intermediate prevents
/// overflow on large costs.
///
/// ## Example
/// ```rust
/// use almacen_core::money::Money;
/// use almacen_core::pricing::derive_price;
/// use almacen_core::types::MarginRate;
///
/// let price = derive_price(Some(Money::from_cents(10_000)), MarginRate::from_bps(3000));
/// assert_eq!(price.cents(), 13_000); // $100.00 + 30% = $130.00
/// ```
pub fn derive_price(cost: Option<Money>, margin: MarginRate) -> Money {
    let cost = match cost {
        Some(c) => c,
        None => return Money::zero(),
    };

    let margin_cents = (cost.cents() as i128 * margin.bps() as i128 + 5000) / 10_000;
    cost + Money::from_cents(margin_cents as i64)
}

/// Computes the total of a cart: the sum of every line's subtotal.
///
/// Integer cents make the "rounded to 2 decimals" requirement structural -
/// there is nothing to round.
pub fn sale_total(lines: &[SaleLine]) -> Money {
    Money::from_cents(lines.iter().map(SaleLine::subtotal_cents).sum())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_price_basic() {
        // $100.00 at 30% margin = $130.00
        let price = derive_price(Some(Money::from_cents(10_000)), MarginRate::from_bps(3000));
        assert_eq!(price.cents(), 13_000);
    }

    #[test]
    fn test_derive_price_zero_cost() {
        // $0.00 at 60% margin = $0.00
        let price = derive_price(Some(Money::zero()), MarginRate::from_bps(6000));
        assert_eq!(price.cents(), 0);
    }

    #[test]
    fn test_derive_price_missing_cost() {
        // No cost at 30% margin = $0.00
        let price = derive_price(None, MarginRate::from_bps(3000));
        assert_eq!(price.cents(), 0);
    }

    #[test]
    fn test_derive_price_zero_margin_equals_cost() {
        // Missing/deleted sector yields margin 0: price == cost
        let price = derive_price(Some(Money::from_cents(4250)), MarginRate::zero());
        assert_eq!(price.cents(), 4250);
    }

    #[test]
    fn test_derive_price_rounds_half_up() {
        // $0.25 at 35%: 25 × 3500 = 87500; (87500 + 5000) / 10000 = 9 cents
        let price = derive_price(Some(Money::from_cents(25)), MarginRate::from_bps(3500));
        assert_eq!(price.cents(), 34);

        // $0.33 at 35%: 33 × 3500 = 115500 → 12 cents (11.55 rounds to 12)
        let price = derive_price(Some(Money::from_cents(33)), MarginRate::from_bps(3500));
        assert_eq!(price.cents(), 45);
    }

    #[test]
    fn test_derive_price_is_deterministic() {
        let cost = Some(Money::from_cents(777));
        let margin = MarginRate::from_bps(4000);
        assert_eq!(derive_price(cost, margin), derive_price(cost, margin));
    }

    #[test]
    fn test_sale_total() {
        let lines = vec![
            SaleLine {
                product_id: 1,
                quantity: 3,
                unit_price_cents: 500,
            },
            SaleLine {
                product_id: 2,
                quantity: 2,
                unit_price_cents: 1250,
            },
        ];
        assert_eq!(sale_total(&lines).cents(), 4000);
    }

    #[test]
    fn test_sale_total_empty_cart_is_zero() {
        assert_eq!(sale_total(&[]), Money::zero());
    }
}
