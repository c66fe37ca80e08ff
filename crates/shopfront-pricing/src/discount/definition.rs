//! Discount definition types.
//!
//! Definitions are created and edited by the store owner through the
//! configuration store; the engine treats them as read-only input and never
//! mutates usage counters itself.

use crate::ids::{CategoryId, CustomerId, DiscountId, ProductId};
use crate::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What the discount is worth, per type.
///
/// A closed set of variants, each carrying only the fields its type needs,
/// so exhaustive matching replaces runtime field-presence checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiscountValue {
    /// Percentage off (0.0 - 100.0).
    Percentage(f64),
    /// Fixed amount off.
    FixedAmount(Money),
    /// Free shipping; carries no cart-amount effect.
    FreeShipping,
    /// Buy X units, get Y units discounted.
    BuyXGetY {
        /// Units that must be bought per application.
        buy_quantity: i64,
        /// Units rewarded per application.
        get_quantity: i64,
        /// How the rewarded units are discounted.
        reward: BuyXGetYReward,
    },
}

/// How rewarded units of a buy-X-get-Y discount are priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BuyXGetYReward {
    /// Percentage off each rewarded unit.
    PercentageOff(f64),
    /// Fixed amount off each rewarded unit, capped at the unit price.
    AmountOff(Money),
    /// Rewarded units are free.
    Free,
}

/// Which part of the cart the discount applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum DiscountScope {
    /// Whole cart.
    #[default]
    All,
    /// Only the listed products.
    Products(Vec<ProductId>),
    /// Only products in the listed categories.
    Categories(Vec<CategoryId>),
    /// Only the listed customers.
    Customers(Vec<CustomerId>),
}

/// A minimum the cart must meet before the discount is eligible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MinimumRequirement {
    /// Cart subtotal must reach this amount.
    Amount(Money),
    /// Total unit count must reach this quantity.
    Quantity(i64),
}

/// Lifecycle status of a discount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscountStatus {
    Active,
    Inactive,
    Expired,
}

/// A discount definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountDefinition {
    /// Unique discount identifier.
    pub id: DiscountId,
    /// Discount code (e.g., "SAVE10"), case-insensitive unique per store.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Type and value of the discount.
    pub value: DiscountValue,
    /// Which items or customers the discount applies to.
    pub scope: DiscountScope,
    /// Minimum the cart must meet.
    pub minimum: Option<MinimumRequirement>,
    /// Cap on the computed amount.
    pub max_discount_amount: Option<Money>,
    /// Maximum total redemptions (None = unlimited).
    pub usage_limit: Option<i64>,
    /// Maximum redemptions per customer.
    pub usage_limit_per_customer: Option<i64>,
    /// Redemptions so far.
    pub current_usage: i64,
    /// Redemptions per customer so far.
    pub usage_by_customer: HashMap<CustomerId, i64>,
    /// Validity window start (inclusive).
    pub starts_at: Option<DateTime<Utc>>,
    /// Validity window end; a cart at exactly this instant is still valid.
    pub ends_at: Option<DateTime<Utc>>,
    /// Lifecycle status.
    pub status: DiscountStatus,
    /// Applied without a code, against every eligible cart.
    pub is_automatic: bool,
    /// Orders multiple automatic discounts, higher first.
    pub priority: i32,
}

impl DiscountDefinition {
    fn base(code: impl Into<String>, name: impl Into<String>, value: DiscountValue) -> Self {
        let code = code.into();
        Self {
            id: DiscountId::new(format!("disc-{}", code.to_lowercase())),
            code,
            name: name.into(),
            value,
            scope: DiscountScope::All,
            minimum: None,
            max_discount_amount: None,
            usage_limit: None,
            usage_limit_per_customer: None,
            current_usage: 0,
            usage_by_customer: HashMap::new(),
            starts_at: None,
            ends_at: None,
            status: DiscountStatus::Active,
            is_automatic: false,
            priority: 0,
        }
    }

    /// Create a percentage discount.
    pub fn percentage(code: impl Into<String>, name: impl Into<String>, percent: f64) -> Self {
        Self::base(code, name, DiscountValue::Percentage(percent))
    }

    /// Create a fixed amount discount.
    pub fn fixed_amount(code: impl Into<String>, name: impl Into<String>, amount: Money) -> Self {
        Self::base(code, name, DiscountValue::FixedAmount(amount))
    }

    /// Create a free shipping discount.
    pub fn free_shipping(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self::base(code, name, DiscountValue::FreeShipping)
    }

    /// Create a buy-X-get-Y discount.
    pub fn buy_x_get_y(
        code: impl Into<String>,
        name: impl Into<String>,
        buy_quantity: i64,
        get_quantity: i64,
        reward: BuyXGetYReward,
    ) -> Self {
        Self::base(
            code,
            name,
            DiscountValue::BuyXGetY {
                buy_quantity,
                get_quantity,
                reward,
            },
        )
    }

    /// Restrict the discount to specific products.
    pub fn for_products(mut self, products: Vec<ProductId>) -> Self {
        self.scope = DiscountScope::Products(products);
        self
    }

    /// Restrict the discount to specific categories.
    pub fn for_categories(mut self, categories: Vec<CategoryId>) -> Self {
        self.scope = DiscountScope::Categories(categories);
        self
    }

    /// Restrict the discount to specific customers.
    pub fn for_customers(mut self, customers: Vec<CustomerId>) -> Self {
        self.scope = DiscountScope::Customers(customers);
        self
    }

    /// Require a minimum subtotal.
    pub fn with_minimum_amount(mut self, amount: Money) -> Self {
        self.minimum = Some(MinimumRequirement::Amount(amount));
        self
    }

    /// Require a minimum unit count.
    pub fn with_minimum_quantity(mut self, quantity: i64) -> Self {
        self.minimum = Some(MinimumRequirement::Quantity(quantity));
        self
    }

    /// Cap the computed amount.
    pub fn with_max_amount(mut self, cap: Money) -> Self {
        self.max_discount_amount = Some(cap);
        self
    }

    /// Limit total redemptions.
    pub fn with_usage_limit(mut self, limit: i64) -> Self {
        self.usage_limit = Some(limit);
        self
    }

    /// Limit redemptions per customer.
    pub fn with_per_customer_limit(mut self, limit: i64) -> Self {
        self.usage_limit_per_customer = Some(limit);
        self
    }

    /// Set the validity window.
    pub fn valid_between(
        mut self,
        starts_at: Option<DateTime<Utc>>,
        ends_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.starts_at = starts_at;
        self.ends_at = ends_at;
        self
    }

    /// Mark as automatic with the given priority.
    pub fn automatic(mut self, priority: i32) -> Self {
        self.is_automatic = true;
        self.priority = priority;
        self
    }

    /// Case-insensitive code match.
    pub fn matches_code(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code)
    }
}
