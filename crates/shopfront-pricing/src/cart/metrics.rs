//! Package metrics aggregation.
//!
//! Reduces cart line items into the aggregate weight/value/quantity/volume
//! figures that shipping conditions and rates are evaluated against.

use crate::cart::CartItem;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Derived aggregate figures for a cart, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageMetrics {
    /// Total weight of shippable items, in kilograms.
    pub total_weight: f64,
    /// Total volume of shippable items with known dimensions.
    pub total_volume: f64,
    /// Total value of shippable items.
    pub total_value: Money,
    /// Unit count across all items, shippable or not.
    pub item_count: i64,
    /// Whether any item needs physical fulfilment.
    pub requires_shipping: bool,
    /// Cube-edge approximation of the package: ceil(cbrt(total_volume)).
    ///
    /// A deliberate simplification, not a packing solver; only meaningful
    /// while no real carrier integration supplies measured dimensions.
    pub estimated_dimension: Option<f64>,
}

impl PackageMetrics {
    /// Aggregate metrics over cart items.
    ///
    /// Weight, value and volume accumulate only over items that require
    /// shipping; `item_count` counts every unit in the cart. An empty item
    /// list yields all-zero metrics with `requires_shipping = false`.
    pub fn aggregate(items: &[CartItem], currency: Currency) -> Self {
        let mut total_weight = 0.0;
        let mut total_volume = 0.0;
        let mut total_value_cents: i64 = 0;
        let mut item_count: i64 = 0;
        let mut requires_shipping = false;

        for item in items {
            item_count += item.quantity;
            if !item.requires_shipping {
                continue;
            }
            requires_shipping = true;
            if let Some(weight) = item.weight {
                total_weight += weight * item.quantity as f64;
            }
            total_value_cents = total_value_cents
                .saturating_add(item.unit_price.amount_cents.saturating_mul(item.quantity));
            if let Some(dims) = item.dimensions {
                total_volume += dims.volume() * item.quantity as f64;
            }
        }

        let estimated_dimension = if total_volume > 0.0 {
            Some(total_volume.cbrt().ceil())
        } else {
            None
        };

        Self {
            total_weight,
            total_volume,
            total_value: Money::new(total_value_cents, currency),
            item_count,
            requires_shipping,
            estimated_dimension,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{DimensionUnit, Dimensions};
    use crate::ids::ProductId;

    fn item(id: &str, qty: i64, cents: i64) -> CartItem {
        CartItem::new(ProductId::new(id), qty, Money::new(cents, Currency::USD)).unwrap()
    }

    #[test]
    fn test_empty_cart() {
        let metrics = PackageMetrics::aggregate(&[], Currency::USD);
        assert_eq!(metrics.total_weight, 0.0);
        assert_eq!(metrics.total_value.amount_cents, 0);
        assert_eq!(metrics.item_count, 0);
        assert!(!metrics.requires_shipping);
        assert!(metrics.estimated_dimension.is_none());
    }

    #[test]
    fn test_weight_and_value_accumulate_per_quantity() {
        let items = vec![
            item("a", 2, 1000).with_weight(0.5),
            item("b", 1, 2500).with_weight(2.0),
        ];
        let metrics = PackageMetrics::aggregate(&items, Currency::USD);
        assert!((metrics.total_weight - 3.0).abs() < f64::EPSILON);
        assert_eq!(metrics.total_value.amount_cents, 4500);
        assert_eq!(metrics.item_count, 3);
        assert!(metrics.requires_shipping);
    }

    #[test]
    fn test_digital_items_counted_but_not_weighed() {
        let items = vec![
            item("book", 1, 2000).with_weight(1.0),
            item("ebook", 3, 999).digital(),
        ];
        let metrics = PackageMetrics::aggregate(&items, Currency::USD);
        // All units count toward the cart quantity semantic.
        assert_eq!(metrics.item_count, 4);
        // Only the shippable item contributes weight and value.
        assert!((metrics.total_weight - 1.0).abs() < f64::EPSILON);
        assert_eq!(metrics.total_value.amount_cents, 2000);
        assert!(metrics.requires_shipping);
    }

    #[test]
    fn test_all_digital_cart() {
        let items = vec![item("ebook", 2, 999).digital()];
        let metrics = PackageMetrics::aggregate(&items, Currency::USD);
        assert!(!metrics.requires_shipping);
        assert_eq!(metrics.item_count, 2);
        assert_eq!(metrics.total_value.amount_cents, 0);
    }

    #[test]
    fn test_cube_root_dimension_estimate() {
        let dims = Dimensions {
            length: 10.0,
            width: 10.0,
            height: 10.0,
            unit: DimensionUnit::Cm,
        };
        let items = vec![item("box", 2, 1000).with_dimensions(dims)];
        let metrics = PackageMetrics::aggregate(&items, Currency::USD);
        // 2 * 1000 = 2000 cubic cm, cbrt ~ 12.6 -> ceil 13
        assert!((metrics.total_volume - 2000.0).abs() < f64::EPSILON);
        assert_eq!(metrics.estimated_dimension, Some(13.0));
    }
}
