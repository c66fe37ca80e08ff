//! Configuration source contract for the Shopfront pricing engine.
//!
//! The engine is a pure function of a [`PricingSnapshot`]; this crate
//! defines where snapshots come from. A [`ConfigSource`] backend reads the
//! per-store discount and shipping-zone tables (read-only as far as the
//! engine is concerned) and hands back an immutable snapshot per
//! invocation. Usage-counter persistence stays with the caller: the engine
//! only emits `UsageRecord` commands, it never writes through this crate.

mod error;
mod source;

pub use error::ConfigError;
pub use source::{ConfigSource, InMemoryConfig};

pub use shopfront_pricing::pipeline::PricingSnapshot;
