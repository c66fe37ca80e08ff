//! Cart line item types.

use crate::error::PricingError;
use crate::ids::{CategoryId, ProductId, VariantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Unit for item dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DimensionUnit {
    #[default]
    Cm,
    In,
}

/// Physical dimensions of a single unit of an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub unit: DimensionUnit,
}

impl Dimensions {
    /// Volume of a single unit, in the declared unit cubed.
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height
    }
}

/// An immutable snapshot of one cart line, as supplied by the caller.
///
/// The engine never mutates items; it only derives metrics and amounts
/// from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Variant, when the product has variants.
    pub variant_id: Option<VariantId>,
    /// Quantity (always >= 1).
    pub quantity: i64,
    /// Unit price (never negative).
    pub unit_price: Money,
    /// Category the product belongs to, when known.
    pub category_id: Option<CategoryId>,
    /// Unit weight in kilograms.
    pub weight: Option<f64>,
    /// Unit dimensions.
    pub dimensions: Option<Dimensions>,
    /// Whether the item is taxable.
    pub taxable: bool,
    /// Whether the item needs physical fulfilment.
    pub requires_shipping: bool,
}

impl CartItem {
    /// Create a new cart item.
    ///
    /// Returns an error if the quantity is below 1 or the unit price is
    /// negative.
    pub fn new(
        product_id: ProductId,
        quantity: i64,
        unit_price: Money,
    ) -> Result<Self, PricingError> {
        if quantity < 1 {
            return Err(PricingError::InvalidQuantity(quantity));
        }
        if unit_price.is_negative() {
            return Err(PricingError::Validation(format!(
                "negative unit price for product {}",
                product_id
            )));
        }
        Ok(Self {
            product_id,
            variant_id: None,
            quantity,
            unit_price,
            category_id: None,
            weight: None,
            dimensions: None,
            taxable: true,
            requires_shipping: true,
        })
    }

    /// Set the category.
    pub fn in_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Set the unit weight in kilograms.
    pub fn with_weight(mut self, kg: f64) -> Self {
        self.weight = Some(kg);
        self
    }

    /// Set the unit dimensions.
    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Mark the item as digital (no physical fulfilment).
    pub fn digital(mut self) -> Self {
        self.requires_shipping = false;
        self.weight = None;
        self.dimensions = None;
        self
    }

    /// Line total: unit price times quantity.
    pub fn line_total(&self) -> Result<Money, PricingError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(PricingError::Overflow)
    }

    /// Validate an externally constructed item.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.quantity < 1 {
            return Err(PricingError::InvalidQuantity(self.quantity));
        }
        if self.unit_price.is_negative() {
            return Err(PricingError::Validation(format!(
                "negative unit price for product {}",
                self.product_id
            )));
        }
        Ok(())
    }
}
