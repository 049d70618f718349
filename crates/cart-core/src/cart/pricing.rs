//! Order summary calculations.

use crate::cart::CartState;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Default sales tax rate applied at checkout.
pub const DEFAULT_TAX_RATE: f64 = 0.10;

/// Inputs to the order summary that do not come from the cart itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingOptions {
    /// Tax rate as a fraction (0.10 = 10%).
    pub tax_rate: f64,
    /// Flat shipping charge. `None` means free shipping.
    pub shipping: Option<Money>,
}

impl Default for PricingOptions {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            shipping: None,
        }
    }
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    /// Subtotal before discounts.
    pub subtotal: Money,
    /// Total of per-line display discounts.
    pub savings: Money,
    /// `subtotal - savings`.
    pub discounted_subtotal: Money,
    /// Shipping cost.
    pub shipping: Money,
    /// Tax on the discounted subtotal.
    pub tax: Money,
    /// `discounted_subtotal + shipping + tax`.
    pub grand_total: Money,
    /// Per-line breakdown.
    pub lines: Vec<LineSummary>,
}

/// Pricing breakdown for a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineSummary {
    pub product_id: ProductId,
    pub display_name: String,
    pub unit_price: Money,
    pub quantity: i64,
    /// `unit_price * quantity`.
    pub line_total: Money,
    /// Discount on this line.
    pub discount: Money,
}

impl CartSummary {
    /// Price a cart.
    ///
    /// The summary is built from the line items, not from the state's cached
    /// aggregates, so it is correct even right after a restore.
    pub fn calculate(state: &CartState, options: &PricingOptions) -> Result<Self, CommerceError> {
        let currency = state.currency();

        let mut lines = Vec::with_capacity(state.items.len());
        for item in &state.items {
            let line_total = item
                .unit_price
                .checked_mul(item.quantity)
                .ok_or(CommerceError::Overflow)?;
            lines.push(LineSummary {
                product_id: item.product_id.clone(),
                display_name: item.display_name.clone(),
                unit_price: item.unit_price,
                quantity: item.quantity,
                line_total,
                discount: item.line_discount(),
            });
        }

        let subtotal = Money::try_sum(lines.iter().map(|l| &l.line_total), currency)
            .ok_or(CommerceError::Overflow)?;
        let savings = Money::try_sum(lines.iter().map(|l| &l.discount), currency)
            .ok_or(CommerceError::Overflow)?;
        let discounted_subtotal = subtotal
            .checked_sub(&savings)
            .ok_or(CommerceError::Overflow)?;

        let shipping = options.shipping.unwrap_or_else(|| Money::zero(currency));
        if shipping.currency != currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: currency.code().to_string(),
                got: shipping.currency.code().to_string(),
            });
        }

        let tax = discounted_subtotal.percentage(options.tax_rate * 100.0);
        let grand_total = discounted_subtotal
            .checked_add(&shipping)
            .and_then(|m| m.checked_add(&tax))
            .ok_or(CommerceError::Overflow)?;

        Ok(Self {
            subtotal,
            savings,
            discounted_subtotal,
            shipping,
            tax,
            grand_total,
            lines,
        })
    }

    /// Check if any discounts are applied.
    pub fn has_savings(&self) -> bool {
        self.savings.amount_cents > 0
    }

    /// Whether shipping is free.
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}
