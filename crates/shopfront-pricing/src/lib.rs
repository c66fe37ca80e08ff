//! Cart pricing engine for Shopfront.
//!
//! Turns a cart (items, destination, optional discount code) into a priced
//! checkout summary:
//!
//! - **Cart**: immutable line-item snapshots and package metrics
//! - **Discount**: definitions, eligibility evaluation, amount calculation
//! - **Shipping**: zones, destination matching, rate calculation
//! - **Pipeline**: the three public operations composing the above
//!
//! The engine is a pure function of its inputs and the configuration
//! snapshot it is given: no I/O, no system-time reads (`now` is always a
//! parameter), no mutation of usage counters. It is safe to invoke
//! concurrently with no shared state between invocations.
//!
//! # Example
//!
//! ```rust
//! use shopfront_pricing::prelude::*;
//! use chrono::Utc;
//!
//! let snapshot = PricingSnapshot {
//!     discounts: vec![DiscountDefinition::percentage("SAVE10", "10% Off", 10.0)],
//!     zones: vec![],
//! };
//! let pipeline = PricingPipeline::new(&snapshot);
//!
//! let items = vec![CartItem::new(
//!     ProductId::new("prod-1"),
//!     2,
//!     Money::from_decimal(100.00, Currency::USD),
//! )
//! .unwrap()];
//! let context = DiscountContext::from_items(items, None, Currency::USD).unwrap();
//!
//! let outcome = pipeline.apply_discount("SAVE10", &context, Utc::now()).unwrap();
//! match outcome {
//!     DiscountOutcome::Applied(quote) => assert_eq!(quote.amount.amount_cents, 2000),
//!     DiscountOutcome::Ineligible { .. } => unreachable!(),
//! }
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod discount;
pub mod pipeline;
pub mod shipping;

pub use error::PricingError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::PricingError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Cart
    pub use crate::cart::{CartItem, DimensionUnit, Dimensions, DiscountContext, PackageMetrics};

    // Discount
    pub use crate::discount::{
        AffectedItem, BuyXGetYReward, DiscountApplication, DiscountDefinition, DiscountScope,
        DiscountStatus, DiscountValue, Eligibility, IneligibilityReason, MinimumRequirement,
    };

    // Shipping
    pub use crate::shipping::{
        DeliveryEstimate, DeliveryTime, DeliveryTimeUnit, Destination, MethodFeatures,
        QuoteOptions, RateConditions, RatePlan, RateQuote, ShippingMethod, ShippingZone,
    };

    // Pipeline
    pub use crate::pipeline::{
        AutomaticDiscount, DiscountOutcome, DiscountQuote, PricingPipeline, PricingSnapshot,
        ShippingQuote, UsageRecord,
    };
}
