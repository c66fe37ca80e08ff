//! Shipping rate calculation.
//!
//! Computes a price for one method against the aggregated package metrics.
//! The whole computation runs in `f64` minor units and rounds back to
//! integer minor units exactly once, after surcharges.

use crate::cart::PackageMetrics;
use crate::ids::{MethodId, ZoneId};
use crate::money::{Currency, Money};
use crate::shipping::{MethodFeatures, RatePlan, ShippingMethod};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Insurance surcharge: 1% of package value, with a floor in whole
/// currency units.
const INSURANCE_RATE: f64 = 0.01;
const INSURANCE_FLOOR_UNITS: f64 = 5.0;

/// Signature-on-delivery surcharge, in whole currency units.
const SIGNATURE_FEE_UNITS: f64 = 3.0;

/// Expedited handling multiplier, applied after all additive surcharges.
const EXPEDITED_MULTIPLIER: f64 = 1.5;

/// Caller options for a rate quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteOptions {
    pub include_insurance: bool,
    pub include_signature: bool,
    pub expedited: bool,
    pub currency: Currency,
}

impl QuoteOptions {
    /// Plain quote with no surcharges.
    pub fn standard(currency: Currency) -> Self {
        Self {
            include_insurance: false,
            include_signature: false,
            expedited: false,
            currency,
        }
    }
}

impl Default for QuoteOptions {
    fn default() -> Self {
        Self::standard(Currency::default())
    }
}

/// Estimated delivery window as concrete dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryEstimate {
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
    pub min_days: i64,
    pub max_days: i64,
}

/// A priced method offered for a destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    pub zone_id: ZoneId,
    pub zone_name: String,
    pub method_id: MethodId,
    pub method_name: String,
    pub rate: Money,
    pub delivery: Option<DeliveryEstimate>,
    /// Carrier metadata, passed through untouched.
    pub carrier: Option<serde_json::Value>,
    pub features: MethodFeatures,
}

/// Compute the rate for one method, or `None` when the method does not
/// apply to this package.
///
/// Steps run in a fixed order: condition gate, base formula per rate plan,
/// clamp to `max_rate`, additive surcharges (insurance then signature),
/// the expedited multiplier last (it inflates the whole rate including
/// add-ons), then a single rounding. The result is never negative.
pub fn calculate_rate(
    method: &ShippingMethod,
    metrics: &PackageMetrics,
    options: &QuoteOptions,
) -> Option<Money> {
    if !method.enabled || !conditions_met(method, metrics) {
        return None;
    }

    let value_minor = metrics.total_value.amount_cents as f64;
    let mut rate_minor = match &method.rate_plan {
        RatePlan::Free { threshold } => {
            if metrics.total_value.amount_cents >= threshold.amount_cents {
                0.0
            } else {
                return None;
            }
        }
        RatePlan::FlatRate { base } => base.amount_cents as f64,
        RatePlan::WeightBased { base, per_kg } | RatePlan::Carrier { base, per_kg } => {
            base.amount_cents as f64 + per_kg.amount_cents as f64 * metrics.total_weight
        }
        RatePlan::PriceBased {
            base,
            percent_of_value,
        } => base.amount_cents as f64 + value_minor * percent_of_value / 100.0,
        RatePlan::LocalPickup { base } => base.amount_cents as f64,
    };

    if let Some(max_rate) = method.max_rate {
        rate_minor = rate_minor.min(max_rate.amount_cents as f64);
    }

    let unit_scale = 10_i64.pow(options.currency.decimal_places()) as f64;
    if options.include_insurance {
        rate_minor += (value_minor * INSURANCE_RATE).max(INSURANCE_FLOOR_UNITS * unit_scale);
    }
    if options.include_signature {
        rate_minor += SIGNATURE_FEE_UNITS * unit_scale;
    }
    if options.expedited {
        rate_minor *= EXPEDITED_MULTIPLIER;
    }

    Some(Money::from_minor_f64(rate_minor.max(0.0), options.currency))
}

/// Check the method's package bounds against the metrics.
fn conditions_met(method: &ShippingMethod, metrics: &PackageMetrics) -> bool {
    let c = &method.conditions;
    if let Some(min) = c.min_weight {
        if metrics.total_weight < min {
            return false;
        }
    }
    if let Some(max) = c.max_weight {
        if metrics.total_weight > max {
            return false;
        }
    }
    if let Some(min) = c.min_value {
        if metrics.total_value.amount_cents < min.amount_cents {
            return false;
        }
    }
    if let Some(max) = c.max_value {
        if metrics.total_value.amount_cents > max.amount_cents {
            return false;
        }
    }
    if let Some(min) = c.min_quantity {
        if metrics.item_count < min {
            return false;
        }
    }
    if let Some(max) = c.max_quantity {
        if metrics.item_count > max {
            return false;
        }
    }
    true
}

/// Build the concrete delivery window for a method quoted at `now`.
pub fn delivery_estimate(method: &ShippingMethod, now: DateTime<Utc>) -> Option<DeliveryEstimate> {
    let delivery = method.delivery?;
    let min_days = delivery.min_days();
    let max_days = delivery.max_days();
    Some(DeliveryEstimate {
        earliest: now + Duration::days(min_days),
        latest: now + Duration::days(max_days),
        min_days,
        max_days,
    })
}
