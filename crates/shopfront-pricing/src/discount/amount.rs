//! Discount amount calculation.
//!
//! Computes the monetary effect of an already-eligible discount. Each
//! branch accumulates in `f64` minor units and rounds exactly once at the
//! end, never cumulatively across sub-steps, so per-item rounding drift
//! cannot creep into the total.

use crate::cart::{CartItem, DiscountContext};
use crate::discount::{BuyXGetYReward, DiscountDefinition, DiscountScope, DiscountValue};
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A line item the discount touched, kept for auditability and UI display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedItem {
    /// The discounted product.
    pub product_id: ProductId,
    /// Units of that product the discount covered.
    pub quantity: i64,
    /// Amount attributed to this line (display value; the application
    /// total is rounded independently from the unrounded sum).
    pub amount: Money,
    /// Why this line was affected.
    pub note: String,
}

/// The computed effect of a discount on a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountApplication {
    /// Total amount off the item subtotal, rounded once.
    pub amount: Money,
    /// Set for free-shipping discounts; consumed downstream to zero out
    /// the shipping rate. Decoupled from `amount` to avoid double
    /// accounting.
    pub free_shipping: bool,
    /// Line-level breakdown.
    pub affected_items: Vec<AffectedItem>,
}

/// Compute the monetary effect of an eligible discount.
///
/// The result never exceeds the cart subtotal, and never exceeds
/// `max_discount_amount` when one is set.
pub fn calculate(discount: &DiscountDefinition, context: &DiscountContext) -> DiscountApplication {
    let (amount, free_shipping, affected_items) = match &discount.value {
        DiscountValue::Percentage(percent) => {
            let (amount, affected) = percentage_amount(discount, context, *percent);
            (amount, false, affected)
        }
        DiscountValue::FixedAmount(value) => {
            let amount = value.min(&context.subtotal);
            (amount, false, Vec::new())
        }
        DiscountValue::FreeShipping => (Money::zero(context.currency), true, Vec::new()),
        DiscountValue::BuyXGetY {
            buy_quantity,
            get_quantity,
            reward,
        } => {
            let (amount, affected) =
                buy_x_get_y_amount(discount, context, *buy_quantity, *get_quantity, reward);
            (amount, false, affected)
        }
    };

    DiscountApplication {
        amount: clamp(amount, discount, context),
        free_shipping,
        affected_items,
    }
}

/// Clamp to the configured cap and to the cart subtotal.
fn clamp(amount: Money, discount: &DiscountDefinition, context: &DiscountContext) -> Money {
    let capped = match discount.max_discount_amount {
        Some(cap) => amount.min(&cap),
        None => amount,
    };
    capped.min(&context.subtotal)
}

/// Whether an item falls inside the discount's scope.
///
/// Customer scoping gates the discount as a whole (checked during
/// eligibility); item-wise, every item qualifies under it.
fn item_in_scope(item: &CartItem, scope: &DiscountScope) -> bool {
    match scope {
        DiscountScope::All | DiscountScope::Customers(_) => true,
        DiscountScope::Products(product_ids) => product_ids.contains(&item.product_id),
        DiscountScope::Categories(category_ids) => item
            .category_id
            .as_ref()
            .is_some_and(|c| category_ids.contains(c)),
    }
}

fn percentage_amount(
    discount: &DiscountDefinition,
    context: &DiscountContext,
    percent: f64,
) -> (Money, Vec<AffectedItem>) {
    match &discount.scope {
        DiscountScope::All | DiscountScope::Customers(_) => {
            let amount = Money::from_minor_f64(
                context.subtotal.amount_cents as f64 * percent / 100.0,
                context.currency,
            );
            (amount, Vec::new())
        }
        _ => {
            // Apply the percentage only to the matching subset.
            let mut base_cents: i64 = 0;
            let mut affected = Vec::new();
            for item in &context.items {
                if !item_in_scope(item, &discount.scope) {
                    continue;
                }
                let line_cents = item
                    .unit_price
                    .amount_cents
                    .saturating_mul(item.quantity);
                base_cents = base_cents.saturating_add(line_cents);
                affected.push(AffectedItem {
                    product_id: item.product_id.clone(),
                    quantity: item.quantity,
                    amount: Money::from_minor_f64(
                        line_cents as f64 * percent / 100.0,
                        context.currency,
                    ),
                    note: format!("{}% off eligible item", percent),
                });
            }
            let amount =
                Money::from_minor_f64(base_cents as f64 * percent / 100.0, context.currency);
            (amount, affected)
        }
    }
}

fn buy_x_get_y_amount(
    discount: &DiscountDefinition,
    context: &DiscountContext,
    buy_quantity: i64,
    get_quantity: i64,
    reward: &BuyXGetYReward,
) -> (Money, Vec<AffectedItem>) {
    if buy_quantity < 1 {
        return (Money::zero(context.currency), Vec::new());
    }

    let mut qualifying: Vec<&CartItem> = context
        .items
        .iter()
        .filter(|item| item_in_scope(item, &discount.scope))
        .collect();

    let qualifying_quantity: i64 = qualifying.iter().map(|i| i.quantity).sum();
    let applications = qualifying_quantity / buy_quantity;
    let mut remaining = applications * get_quantity.max(1);
    if remaining == 0 {
        return (Money::zero(context.currency), Vec::new());
    }

    // Cheapest eligible units are discounted first; the stable sort keeps
    // original cart order on price ties. This is an anti-gaming policy.
    qualifying.sort_by_key(|item| item.unit_price.amount_cents);

    let mut total_minor = 0.0_f64;
    let mut affected = Vec::new();
    for item in qualifying {
        if remaining == 0 {
            break;
        }
        let units = remaining.min(item.quantity);
        let price = item.unit_price.amount_cents as f64;
        let group_minor = match reward {
            BuyXGetYReward::PercentageOff(percent) => {
                price * units as f64 * percent / 100.0
            }
            BuyXGetYReward::AmountOff(value) => {
                let off = value.amount_cents as f64 * units as f64;
                off.min(price * units as f64)
            }
            BuyXGetYReward::Free => price * units as f64,
        };
        total_minor += group_minor;
        affected.push(AffectedItem {
            product_id: item.product_id.clone(),
            quantity: units,
            amount: Money::from_minor_f64(group_minor, context.currency),
            note: format!("buy {} get {} reward", buy_quantity, get_quantity.max(1)),
        });
        remaining -= units;
    }

    (Money::from_minor_f64(total_minor, context.currency), affected)
}
