//! Pricing pipeline orchestrator.
//!
//! Composes metrics aggregation, discount evaluation/calculation, and zone
//! matching/rate calculation into the three public operations. The pipeline
//! is a pure function of its inputs and the configuration snapshot it
//! borrows: it holds no state, performs no I/O, and never mutates usage
//! counters. Persisting a redemption is the caller's job, driven by the
//! [`UsageRecord`] each applied discount carries; exact enforcement of
//! scarce codes under concurrent redemptions therefore requires the caller
//! to serialize that write.

use crate::cart::{CartItem, DiscountContext, PackageMetrics};
use crate::discount::{
    self, AffectedItem, DiscountDefinition, DiscountStatus, Eligibility, IneligibilityReason,
};
use crate::error::PricingError;
use crate::ids::{CustomerId, DiscountId};
use crate::money::Money;
use crate::shipping::{
    self, Destination, QuoteOptions, RateQuote, ShippingZone,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Immutable configuration snapshot a pipeline invocation runs against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingSnapshot {
    pub discounts: Vec<DiscountDefinition>,
    pub zones: Vec<ShippingZone>,
}

/// The command a caller applies to persist a redemption.
///
/// The engine only emits this; it never increments usage itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub discount_id: DiscountId,
    pub code: String,
    pub customer_id: Option<CustomerId>,
}

/// A successfully applied discount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountQuote {
    pub discount_id: DiscountId,
    pub code: String,
    pub name: String,
    /// Amount off the item subtotal, rounded once.
    pub amount: Money,
    /// Zero out the shipping rate downstream.
    pub free_shipping: bool,
    /// Line-level breakdown for display.
    pub affected_items: Vec<AffectedItem>,
    /// Subtotal after the discount.
    pub new_subtotal: Money,
    /// Redemption command for the caller to persist.
    pub usage: UsageRecord,
}

/// Result of applying a discount code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiscountOutcome {
    /// The discount applies; the quote carries the breakdown.
    Applied(DiscountQuote),
    /// The code exists but a validity check failed. A normal business
    /// outcome, not an error.
    Ineligible {
        code: String,
        reason: IneligibilityReason,
    },
}

/// Result of quoting shipping for a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShippingQuote {
    /// Nothing in the cart needs shipping; the rate list is empty by
    /// construction, not by failure.
    NotRequired,
    /// No configured zone serves the destination.
    Unavailable,
    /// Rates sorted ascending, cheapest first.
    Available(Vec<RateQuote>),
}

impl ShippingQuote {
    /// The quoted rates; empty for the non-`Available` outcomes.
    pub fn rates(&self) -> &[RateQuote] {
        match self {
            ShippingQuote::Available(rates) => rates,
            _ => &[],
        }
    }
}

/// An automatic discount that would apply to a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomaticDiscount {
    pub discount_id: DiscountId,
    pub code: String,
    pub name: String,
    pub priority: i32,
    pub amount: Money,
    pub free_shipping: bool,
    pub affected_items: Vec<AffectedItem>,
}

/// The pricing pipeline over one configuration snapshot.
pub struct PricingPipeline<'a> {
    snapshot: &'a PricingSnapshot,
}

impl<'a> PricingPipeline<'a> {
    /// Create a pipeline over a snapshot.
    pub fn new(snapshot: &'a PricingSnapshot) -> Self {
        Self { snapshot }
    }

    /// Apply a discount code to a cart context.
    ///
    /// The lookup is case-insensitive. An unknown code is a
    /// [`PricingError::DiscountNotFound`]; a known but ineligible code is
    /// the [`DiscountOutcome::Ineligible`] outcome with its reason.
    pub fn apply_discount(
        &self,
        code: &str,
        context: &DiscountContext,
        now: DateTime<Utc>,
    ) -> Result<DiscountOutcome, PricingError> {
        let definition = self
            .snapshot
            .discounts
            .iter()
            .find(|d| d.matches_code(code))
            .ok_or_else(|| {
                debug!(code, "discount code not found");
                PricingError::DiscountNotFound(code.to_string())
            })?;

        match discount::evaluate(definition, context, now) {
            Eligibility::Ineligible(reason) => {
                debug!(code = %definition.code, %reason, "discount ineligible");
                Ok(DiscountOutcome::Ineligible {
                    code: definition.code.clone(),
                    reason,
                })
            }
            Eligibility::Eligible => {
                let application = discount::calculate(definition, context);
                let new_subtotal = context
                    .subtotal
                    .try_subtract(&application.amount)
                    .ok_or(PricingError::Overflow)?;
                debug!(
                    code = %definition.code,
                    amount = application.amount.amount_cents,
                    "discount applied"
                );
                Ok(DiscountOutcome::Applied(DiscountQuote {
                    discount_id: definition.id.clone(),
                    code: definition.code.clone(),
                    name: definition.name.clone(),
                    amount: application.amount,
                    free_shipping: application.free_shipping,
                    affected_items: application.affected_items,
                    new_subtotal,
                    usage: UsageRecord {
                        discount_id: definition.id.clone(),
                        code: definition.code.clone(),
                        customer_id: context.customer_id.clone(),
                    },
                }))
            }
        }
    }

    /// Quote shipping rates for a cart to a destination.
    ///
    /// All-digital carts short-circuit to [`ShippingQuote::NotRequired`];
    /// a destination no zone serves is [`ShippingQuote::Unavailable`], so a
    /// caller can distinguish "nothing to ship" from "no service here".
    pub fn quote_shipping(
        &self,
        items: &[CartItem],
        destination: &Destination,
        options: &QuoteOptions,
        now: DateTime<Utc>,
    ) -> Result<ShippingQuote, PricingError> {
        for item in items {
            item.validate()?;
        }

        let metrics = PackageMetrics::aggregate(items, options.currency);
        if !metrics.requires_shipping {
            debug!("cart has no shippable items");
            return Ok(ShippingQuote::NotRequired);
        }

        let matched = shipping::match_zones(destination, &self.snapshot.zones);
        if matched.is_empty() {
            debug!(country = %destination.country, "no zone serves destination");
            return Ok(ShippingQuote::Unavailable);
        }
        debug!(zones = matched.len(), "matched shipping zones");

        let mut quotes = Vec::new();
        for zone in matched {
            for method in &zone.methods {
                let Some(rate) = shipping::calculate_rate(method, &metrics, options) else {
                    continue;
                };
                quotes.push(RateQuote {
                    zone_id: zone.id.clone(),
                    zone_name: zone.name.clone(),
                    method_id: method.id.clone(),
                    method_name: method.name.clone(),
                    rate,
                    delivery: shipping::delivery_estimate(method, now),
                    carrier: method.carrier.clone(),
                    features: method.features,
                });
            }
        }

        // Cheapest first; the stable sort keeps zone/method discovery
        // order on ties.
        quotes.sort_by_key(|q| q.rate.amount_cents);
        Ok(ShippingQuote::Available(quotes))
    }

    /// Quote every automatic discount that would apply to a cart, ranked
    /// by priority descending.
    ///
    /// Advisory only: stacking policy between automatic discounts is the
    /// caller's decision.
    pub fn quote_automatic_discounts(
        &self,
        context: &DiscountContext,
        now: DateTime<Utc>,
    ) -> Vec<AutomaticDiscount> {
        let mut applicable: Vec<AutomaticDiscount> = self
            .snapshot
            .discounts
            .iter()
            .filter(|d| d.is_automatic && d.status == DiscountStatus::Active)
            .filter(|d| discount::evaluate(d, context, now).is_eligible())
            .filter_map(|d| {
                let application = discount::calculate(d, context);
                if application.amount.is_positive() || application.free_shipping {
                    Some(AutomaticDiscount {
                        discount_id: d.id.clone(),
                        code: d.code.clone(),
                        name: d.name.clone(),
                        priority: d.priority,
                        amount: application.amount,
                        free_shipping: application.free_shipping,
                        affected_items: application.affected_items,
                    })
                } else {
                    None
                }
            })
            .collect();

        applicable.sort_by_key(|d| std::cmp::Reverse(d.priority));
        applicable
    }
}
