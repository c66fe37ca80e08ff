//! Configuration source trait and the in-memory reference backend.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use shopfront_pricing::discount::DiscountDefinition;
use shopfront_pricing::ids::StoreId;
use shopfront_pricing::pipeline::PricingSnapshot;
use shopfront_pricing::shipping::ShippingZone;

use crate::ConfigError;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A per-store source of pricing configuration.
///
/// Backends fetch the tables however they like (settings store, database,
/// cache); the engine only ever sees the immutable snapshot.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Fetch the store's discount definitions.
    async fn get_discounts(&self, store: &StoreId) -> ConfigResult<Vec<DiscountDefinition>>;

    /// Fetch the store's shipping zones.
    async fn get_shipping_zones(&self, store: &StoreId) -> ConfigResult<Vec<ShippingZone>>;

    /// Compose both tables into one snapshot for a pipeline invocation.
    async fn snapshot(&self, store: &StoreId) -> ConfigResult<PricingSnapshot> {
        Ok(PricingSnapshot {
            discounts: self.get_discounts(store).await?,
            zones: self.get_shipping_zones(store).await?,
        })
    }
}

/// In-memory configuration source, used by tests and as the reference
/// backend.
#[derive(Default)]
pub struct InMemoryConfig {
    stores: RwLock<HashMap<StoreId, PricingSnapshot>>,
}

impl InMemoryConfig {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace a store's configuration.
    pub fn set_store(&self, store: StoreId, snapshot: PricingSnapshot) {
        self.stores
            .write()
            .expect("config store lock poisoned")
            .insert(store, snapshot);
    }

    fn with_store<T>(
        &self,
        store: &StoreId,
        f: impl FnOnce(&PricingSnapshot) -> T,
    ) -> ConfigResult<T> {
        let stores = self.stores.read().expect("config store lock poisoned");
        stores
            .get(store)
            .map(f)
            .ok_or_else(|| ConfigError::StoreNotFound(store.to_string()))
    }
}

#[async_trait]
impl ConfigSource for InMemoryConfig {
    async fn get_discounts(&self, store: &StoreId) -> ConfigResult<Vec<DiscountDefinition>> {
        self.with_store(store, |s| s.discounts.clone())
    }

    async fn get_shipping_zones(&self, store: &StoreId) -> ConfigResult<Vec<ShippingZone>> {
        self.with_store(store, |s| s.zones.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_pricing::prelude::*;

    fn sample_snapshot() -> PricingSnapshot {
        PricingSnapshot {
            discounts: vec![DiscountDefinition::percentage("SAVE10", "10% Off", 10.0)],
            zones: vec![ShippingZone::new("us", "United States", vec!["US"])],
        }
    }

    #[tokio::test]
    async fn test_snapshot_roundtrip() {
        let source = InMemoryConfig::new();
        let store = StoreId::new("store-1");
        source.set_store(store.clone(), sample_snapshot());

        let snapshot = source.snapshot(&store).await.unwrap();
        assert_eq!(snapshot.discounts.len(), 1);
        assert_eq!(snapshot.discounts[0].code, "SAVE10");
        assert_eq!(snapshot.zones.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_store() {
        let source = InMemoryConfig::new();
        let result = source.snapshot(&StoreId::new("missing")).await;
        assert!(matches!(result, Err(ConfigError::StoreNotFound(_))));
    }

    #[tokio::test]
    async fn test_stores_are_isolated() {
        let source = InMemoryConfig::new();
        source.set_store(StoreId::new("a"), sample_snapshot());
        source.set_store(StoreId::new("b"), PricingSnapshot::default());

        let b = source.snapshot(&StoreId::new("b")).await.unwrap();
        assert!(b.discounts.is_empty());

        let a = source.get_discounts(&StoreId::new("a")).await.unwrap();
        assert_eq!(a.len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_feeds_pipeline() {
        let source = InMemoryConfig::new();
        let store = StoreId::new("store-1");
        source.set_store(store.clone(), sample_snapshot());

        let snapshot = source.snapshot(&store).await.unwrap();
        let pipeline = PricingPipeline::new(&snapshot);

        let items = vec![CartItem::new(
            ProductId::new("p"),
            1,
            Money::new(10000, Currency::USD),
        )
        .unwrap()];
        let ctx = DiscountContext::from_items(items, None, Currency::USD).unwrap();
        let outcome = pipeline
            .apply_discount("SAVE10", &ctx, chrono::Utc::now())
            .unwrap();
        assert!(matches!(outcome, DiscountOutcome::Applied(_)));
    }
}
