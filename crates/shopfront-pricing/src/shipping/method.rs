//! Shipping method types.

use crate::ids::MethodId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// How a method prices a package.
///
/// A closed set of variants, one per configured method type, each carrying
/// only the pricing fields that type uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RatePlan {
    /// Free shipping once the package value reaches the threshold; below
    /// it the method is not offered at all.
    Free { threshold: Money },
    /// One price regardless of package.
    FlatRate { base: Money },
    /// Base plus a per-kilogram rate.
    WeightBased { base: Money, per_kg: Money },
    /// Base plus a percentage of the package value. The originating
    /// configuration called this field a per-item rate, but it has always
    /// behaved as a percentage-of-value surcharge; that behavior is kept.
    PriceBased {
        base: Money,
        percent_of_value: f64,
    },
    /// Carrier-estimated rate. Until a real carrier API is integrated this
    /// uses the weight-based formula as a placeholder estimate, not a
    /// guarantee.
    Carrier { base: Money, per_kg: Money },
    /// Customer pickup; usually a zero base rate.
    LocalPickup { base: Money },
}

/// Package bounds a method is willing to serve. Any violated bound makes
/// the method inapplicable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RateConditions {
    pub min_weight: Option<f64>,
    pub max_weight: Option<f64>,
    pub min_value: Option<Money>,
    pub max_value: Option<Money>,
    pub min_quantity: Option<i64>,
    pub max_quantity: Option<i64>,
}

/// Unit for delivery time estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryTimeUnit {
    Hours,
    Days,
    Weeks,
}

/// Estimated delivery window, in the configured unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryTime {
    pub min: i64,
    pub max: i64,
    pub unit: DeliveryTimeUnit,
}

impl DeliveryTime {
    /// Create a delivery window in days.
    pub fn days(min: i64, max: i64) -> Self {
        Self {
            min,
            max,
            unit: DeliveryTimeUnit::Days,
        }
    }

    /// Convert a value in this unit to whole days, rounding hours up.
    pub fn to_days(&self, value: i64) -> i64 {
        match self.unit {
            DeliveryTimeUnit::Hours => (value + 23) / 24,
            DeliveryTimeUnit::Days => value,
            DeliveryTimeUnit::Weeks => value * 7,
        }
    }

    /// Minimum window in days.
    pub fn min_days(&self) -> i64 {
        self.to_days(self.min)
    }

    /// Maximum window in days.
    pub fn max_days(&self) -> i64 {
        self.to_days(self.max)
    }
}

/// Optional service features a method offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MethodFeatures {
    pub tracking: bool,
    pub insurance: bool,
    pub signature: bool,
}

/// A priced shipping method inside a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethod {
    /// Unique identifier.
    pub id: MethodId,
    /// Display name.
    pub name: String,
    /// Disabled methods are never quoted.
    pub enabled: bool,
    /// Pricing formula.
    pub rate_plan: RatePlan,
    /// Package bounds this method serves.
    pub conditions: RateConditions,
    /// Upper bound on the computed rate, applied before surcharges.
    pub max_rate: Option<Money>,
    /// Delivery window estimate.
    pub delivery: Option<DeliveryTime>,
    /// Carrier metadata, passed through untouched.
    pub carrier: Option<serde_json::Value>,
    /// Service features.
    pub features: MethodFeatures,
}

impl ShippingMethod {
    /// Create an enabled method with the given rate plan.
    pub fn new(id: impl Into<String>, name: impl Into<String>, rate_plan: RatePlan) -> Self {
        Self {
            id: MethodId::new(id),
            name: name.into(),
            enabled: true,
            rate_plan,
            conditions: RateConditions::default(),
            max_rate: None,
            delivery: None,
            carrier: None,
            features: MethodFeatures::default(),
        }
    }

    /// Set the package bounds.
    pub fn with_conditions(mut self, conditions: RateConditions) -> Self {
        self.conditions = conditions;
        self
    }

    /// Cap the computed rate.
    pub fn with_max_rate(mut self, max_rate: Money) -> Self {
        self.max_rate = Some(max_rate);
        self
    }

    /// Set the delivery window.
    pub fn with_delivery(mut self, delivery: DeliveryTime) -> Self {
        self.delivery = Some(delivery);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_delivery_time_conversion() {
        let hours = DeliveryTime {
            min: 12,
            max: 48,
            unit: DeliveryTimeUnit::Hours,
        };
        assert_eq!(hours.min_days(), 1);
        assert_eq!(hours.max_days(), 2);

        let weeks = DeliveryTime {
            min: 1,
            max: 2,
            unit: DeliveryTimeUnit::Weeks,
        };
        assert_eq!(weeks.min_days(), 7);
        assert_eq!(weeks.max_days(), 14);

        let days = DeliveryTime::days(3, 5);
        assert_eq!(days.min_days(), 3);
        assert_eq!(days.max_days(), 5);
    }

    #[test]
    fn test_method_builder() {
        let method = ShippingMethod::new(
            "standard",
            "Standard Shipping",
            RatePlan::FlatRate {
                base: Money::new(599, Currency::USD),
            },
        )
        .with_delivery(DeliveryTime::days(5, 7));
        assert!(method.enabled);
        assert_eq!(method.delivery.unwrap().min_days(), 5);
    }
}
