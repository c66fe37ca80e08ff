//! Discount application context.

use crate::cart::CartItem;
use crate::error::PricingError;
use crate::ids::CustomerId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// The ephemeral cart snapshot a discount decision is evaluated against.
///
/// Constructed per request; the engine treats it as read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountContext {
    /// Customer, when the session is authenticated.
    pub customer_id: Option<CustomerId>,
    /// Items in the cart.
    pub items: Vec<CartItem>,
    /// Cart subtotal before any discount.
    pub subtotal: Money,
    /// Whether any item needs physical fulfilment.
    pub shipping_required: bool,
    /// Cart currency.
    pub currency: Currency,
}

impl DiscountContext {
    /// Build a context from items, deriving the subtotal.
    ///
    /// Validates every item and checks that all prices share the cart
    /// currency.
    pub fn from_items(
        items: Vec<CartItem>,
        customer_id: Option<CustomerId>,
        currency: Currency,
    ) -> Result<Self, PricingError> {
        for item in &items {
            item.validate()?;
            if item.unit_price.currency != currency {
                return Err(PricingError::CurrencyMismatch {
                    expected: currency.code().to_string(),
                    got: item.unit_price.currency.code().to_string(),
                });
            }
        }

        let line_totals = items
            .iter()
            .map(CartItem::line_total)
            .collect::<Result<Vec<_>, _>>()?;
        let subtotal =
            Money::try_sum(line_totals.iter(), currency).ok_or(PricingError::Overflow)?;
        let shipping_required = items.iter().any(|i| i.requires_shipping);

        Ok(Self {
            customer_id,
            items,
            subtotal,
            shipping_required,
            currency,
        })
    }

    /// Total unit count across all items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;

    fn item(id: &str, qty: i64, cents: i64) -> CartItem {
        CartItem::new(ProductId::new(id), qty, Money::new(cents, Currency::USD)).unwrap()
    }

    #[test]
    fn test_subtotal_derivation() {
        let ctx = DiscountContext::from_items(
            vec![item("a", 2, 1000), item("b", 1, 2500)],
            None,
            Currency::USD,
        )
        .unwrap();
        assert_eq!(ctx.subtotal.amount_cents, 4500);
        assert_eq!(ctx.total_quantity(), 3);
        assert!(ctx.shipping_required);
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let foreign = CartItem::new(
            ProductId::new("a"),
            1,
            Money::new(1000, Currency::EUR),
        )
        .unwrap();
        let result = DiscountContext::from_items(vec![foreign], None, Currency::USD);
        assert!(matches!(result, Err(PricingError::CurrencyMismatch { .. })));
    }

    #[test]
    fn test_all_digital_cart() {
        let ctx = DiscountContext::from_items(
            vec![item("a", 1, 1000).digital()],
            None,
            Currency::USD,
        )
        .unwrap();
        assert!(!ctx.shipping_required);
    }
}
