//! Shipping module.
//!
//! Contains zones and destination matching, priced methods, and the rate
//! calculator.

mod method;
mod rate;
mod zone;

pub use method::{
    DeliveryTime, DeliveryTimeUnit, MethodFeatures, RateConditions, RatePlan, ShippingMethod,
};
pub use rate::{calculate_rate, delivery_estimate, DeliveryEstimate, QuoteOptions, RateQuote};
pub use zone::{match_zones, postal_pattern_matches, Destination, ShippingZone};
