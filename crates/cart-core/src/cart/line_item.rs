//! Cart line items.

use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// One product's presence in the cart.
///
/// Inside a [`CartState`](crate::cart::CartState) every line satisfies
/// `1 <= quantity <= stock_limit`. A free-standing `LineItem` used as an add
/// candidate may hold anything; the store clamps it on insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Catalog product this line refers to. Unique within a cart.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub display_name: String,
    /// Unit price captured when the product was first added.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: i64,
    /// Catalog stock when the product was first added.
    pub stock_limit: i64,
    /// Image reference for display.
    pub image_ref: String,
    /// Promotional discount shown on the cart page, in percent.
    pub discount_percentage: Option<f64>,
}

impl LineItem {
    /// Create a line item candidate with quantity 1.
    pub fn new(
        product_id: impl Into<ProductId>,
        display_name: impl Into<String>,
        unit_price: Money,
        stock_limit: i64,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            display_name: display_name.into(),
            unit_price,
            quantity: 1,
            stock_limit,
            image_ref: String::new(),
            discount_percentage: None,
        }
    }

    /// Set the requested quantity.
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = image_ref.into();
        self
    }

    /// Set the display discount.
    pub fn with_discount(mut self, percent: f64) -> Self {
        self.discount_percentage = Some(percent);
        self
    }

    /// `unit_price * quantity`.
    pub fn line_total(&self) -> Money {
        self.unit_price.saturating_mul(self.quantity)
    }

    /// Discount amount for the whole line, zero when no discount applies.
    pub fn line_discount(&self) -> Money {
        match self.discount_percentage {
            Some(pct) if pct > 0.0 => self.line_total().percentage(pct.min(100.0)),
            _ => Money::zero(self.unit_price.currency),
        }
    }

    /// Whether another unit can still be added.
    pub fn can_increment(&self) -> bool {
        self.quantity < self.stock_limit
    }

    /// Bring a fresh candidate into a storable shape: price in the cart's
    /// currency, stock limit of at least one, non-negative price, quantity
    /// clamped into `[1, stock_limit]`.
    pub(crate) fn normalized(mut self, currency: Currency) -> Self {
        self.retag_price(currency);
        if self.stock_limit < 1 {
            tracing::debug!(
                product_id = %self.product_id,
                stock_limit = self.stock_limit,
                "stock limit below one, using 1"
            );
            self.stock_limit = 1;
        }
        if self.unit_price.is_negative() {
            tracing::debug!(product_id = %self.product_id, "negative unit price, using 0");
            self.unit_price = Money::zero(self.unit_price.currency);
        }
        self.quantity = clamp_quantity(self.quantity, self.stock_limit);
        self
    }

    /// Express the unit price in `currency`, keeping its decimal amount.
    ///
    /// No exchange rate is applied: a line priced ¥500 in a USD cart becomes
    /// $500.00, which is also what a persisted snapshot would reload as.
    pub(crate) fn retag_price(&mut self, currency: Currency) {
        if self.unit_price.currency == currency {
            return;
        }
        tracing::warn!(
            product_id = %self.product_id,
            from = self.unit_price.currency.code(),
            to = currency.code(),
            "unit price in foreign currency, re-tagging"
        );
        self.unit_price = Money::from_decimal(self.unit_price.to_decimal(), currency);
    }

    /// Take non-empty presentation fields from a newer candidate.
    pub(crate) fn refresh_display(&mut self, candidate: &LineItem) {
        if !candidate.display_name.is_empty() {
            self.display_name.clone_from(&candidate.display_name);
        }
        if !candidate.image_ref.is_empty() {
            self.image_ref.clone_from(&candidate.image_ref);
        }
    }
}

/// Clamp a requested quantity into `[1, stock_limit]`.
///
/// A `stock_limit` below one is treated as one.
pub fn clamp_quantity(requested: i64, stock_limit: i64) -> i64 {
    requested.max(1).min(stock_limit.max(1))
}
