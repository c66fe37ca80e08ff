//! Cart snapshot module.
//!
//! Contains the immutable line-item snapshot, the per-request discount
//! context, and package metrics aggregation.

mod context;
mod item;
mod metrics;

pub use context::DiscountContext;
pub use item::{CartItem, DimensionUnit, Dimensions};
pub use metrics::PackageMetrics;
