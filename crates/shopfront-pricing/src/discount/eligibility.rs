//! Discount eligibility evaluation.
//!
//! Pure and side-effect-free: usage counters are read from the definition
//! snapshot and never mutated here. Checks run in a fixed order and the
//! first failure is the reported reason.

use crate::cart::DiscountContext;
use crate::discount::{DiscountDefinition, DiscountScope, DiscountStatus, MinimumRequirement};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a discount does not apply to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IneligibilityReason {
    /// The discount is inactive or marked expired.
    NotActive,
    /// The validity window has not opened yet.
    NotYetStarted,
    /// The validity window has closed.
    Expired,
    /// The total usage limit is exhausted.
    UsageLimitReached,
    /// This customer has exhausted their personal limit.
    CustomerLimitReached,
    /// The cart subtotal is below the required minimum.
    MinimumAmountNotMet,
    /// The cart unit count is below the required minimum.
    MinimumQuantityNotMet,
    /// None of the cart items is among the eligible products.
    NoEligibleProducts,
    /// None of the cart items is in an eligible category.
    NoEligibleCategories,
    /// The customer is not among the eligible customers.
    CustomerNotEligible,
}

impl IneligibilityReason {
    /// Human-readable message for UI display.
    pub fn message(&self) -> &'static str {
        match self {
            IneligibilityReason::NotActive => "This discount is not active",
            IneligibilityReason::NotYetStarted => "This discount is not yet valid",
            IneligibilityReason::Expired => "This discount has expired",
            IneligibilityReason::UsageLimitReached => "This discount has reached its usage limit",
            IneligibilityReason::CustomerLimitReached => {
                "You have already used this discount the maximum number of times"
            }
            IneligibilityReason::MinimumAmountNotMet => {
                "Your cart does not meet the minimum amount for this discount"
            }
            IneligibilityReason::MinimumQuantityNotMet => {
                "Your cart does not meet the minimum quantity for this discount"
            }
            IneligibilityReason::NoEligibleProducts => {
                "This discount does not apply to any item in your cart"
            }
            IneligibilityReason::NoEligibleCategories => {
                "This discount does not apply to any item in your cart"
            }
            IneligibilityReason::CustomerNotEligible => {
                "This discount is not available for your account"
            }
        }
    }
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Outcome of an eligibility evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eligibility {
    /// All checks passed.
    Eligible,
    /// The first failing check.
    Ineligible(IneligibilityReason),
}

impl Eligibility {
    /// Whether the discount applies.
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    /// The failure reason, when ineligible.
    pub fn reason(&self) -> Option<IneligibilityReason> {
        match self {
            Eligibility::Eligible => None,
            Eligibility::Ineligible(reason) => Some(*reason),
        }
    }
}

/// Evaluate whether a discount applies to a cart context at `now`.
///
/// `now` is supplied by the caller so the evaluation stays deterministic;
/// the engine never reads system time.
pub fn evaluate(
    discount: &DiscountDefinition,
    context: &DiscountContext,
    now: DateTime<Utc>,
) -> Eligibility {
    use Eligibility::Ineligible;
    use IneligibilityReason::*;

    if discount.status != DiscountStatus::Active {
        return Ineligible(NotActive);
    }

    if let Some(starts_at) = discount.starts_at {
        if now < starts_at {
            return Ineligible(NotYetStarted);
        }
    }

    if let Some(ends_at) = discount.ends_at {
        if now > ends_at {
            return Ineligible(Expired);
        }
    }

    if let Some(limit) = discount.usage_limit {
        if discount.current_usage >= limit {
            return Ineligible(UsageLimitReached);
        }
    }

    if let Some(limit) = discount.usage_limit_per_customer {
        if let Some(customer_id) = &context.customer_id {
            let used = discount
                .usage_by_customer
                .get(customer_id)
                .copied()
                .unwrap_or(0);
            if used >= limit {
                return Ineligible(CustomerLimitReached);
            }
        }
    }

    match &discount.minimum {
        Some(MinimumRequirement::Amount(threshold)) => {
            if context.subtotal.amount_cents < threshold.amount_cents {
                return Ineligible(MinimumAmountNotMet);
            }
        }
        Some(MinimumRequirement::Quantity(threshold)) => {
            if context.total_quantity() < *threshold {
                return Ineligible(MinimumQuantityNotMet);
            }
        }
        None => {}
    }

    match &discount.scope {
        DiscountScope::All => {}
        DiscountScope::Products(product_ids) => {
            let any_match = context
                .items
                .iter()
                .any(|item| product_ids.contains(&item.product_id));
            if !any_match {
                return Ineligible(NoEligibleProducts);
            }
        }
        DiscountScope::Categories(category_ids) => {
            let any_match = context.items.iter().any(|item| {
                item.category_id
                    .as_ref()
                    .is_some_and(|c| category_ids.contains(c))
            });
            if !any_match {
                return Ineligible(NoEligibleCategories);
            }
        }
        DiscountScope::Customers(customer_ids) => {
            let is_member = context
                .customer_id
                .as_ref()
                .is_some_and(|c| customer_ids.contains(c));
            if !is_member {
                return Ineligible(CustomerNotEligible);
            }
        }
    }

    Eligibility::Eligible
}
