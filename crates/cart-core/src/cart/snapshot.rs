//! Persisted snapshot format.
//!
//! ```json
//! {
//!   "items": [{ "productId": "p1", "displayName": "Widget", "unitPrice": 10.0,
//!               "quantity": 2, "stockLimit": 5, "imageRef": "" }],
//!   "itemCount": 2,
//!   "subtotal": 20.0
//! }
//! ```
//!
//! Prices are decimal numbers on the wire and minor units in memory.

use std::collections::HashSet;

use crate::cart::{CartState, LineItem};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Deserializer, Serialize};

/// Storage key used when none is configured.
pub const DEFAULT_CART_KEY: &str = "cart";

/// Serialized form of a [`CartState`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub items: Vec<SnapshotItem>,
    #[serde(deserialize_with = "whole_number")]
    pub item_count: i64,
    pub subtotal: f64,
}

/// Serialized form of a [`LineItem`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotItem {
    pub product_id: ProductId,
    #[serde(default)]
    pub display_name: String,
    pub unit_price: f64,
    #[serde(deserialize_with = "whole_number")]
    pub quantity: i64,
    #[serde(deserialize_with = "whole_number")]
    pub stock_limit: i64,
    #[serde(default)]
    pub image_ref: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<f64>,
}

impl CartSnapshot {
    /// Capture the current state.
    pub fn from_state(state: &CartState) -> Self {
        Self {
            items: state.items.iter().map(SnapshotItem::from_item).collect(),
            item_count: state.item_count,
            subtotal: state.subtotal.to_decimal(),
        }
    }

    /// Rebuild a state, trusting the stored aggregates.
    ///
    /// Rejects snapshots whose lines could not have been produced by the
    /// store: duplicate products, quantities outside `[1, stockLimit]`,
    /// negative or non-finite prices.
    pub fn into_state(self, currency: Currency) -> Result<CartState, CommerceError> {
        if self.item_count < 0 {
            return Err(invalid(format!("negative itemCount {}", self.item_count)));
        }
        if !self.subtotal.is_finite() || self.subtotal < 0.0 {
            return Err(invalid(format!("bad subtotal {}", self.subtotal)));
        }

        let mut seen = HashSet::with_capacity(self.items.len());
        let mut items = Vec::with_capacity(self.items.len());
        for item in self.items {
            if !seen.insert(item.product_id.clone()) {
                return Err(invalid(format!("duplicate product {}", item.product_id)));
            }
            items.push(item.into_item(currency)?);
        }

        Ok(CartState {
            items,
            item_count: self.item_count,
            subtotal: Money::from_decimal(self.subtotal, currency),
        })
    }
}

impl SnapshotItem {
    fn from_item(item: &LineItem) -> Self {
        Self {
            product_id: item.product_id.clone(),
            display_name: item.display_name.clone(),
            unit_price: item.unit_price.to_decimal(),
            quantity: item.quantity,
            stock_limit: item.stock_limit,
            image_ref: item.image_ref.clone(),
            discount_percentage: item.discount_percentage,
        }
    }

    fn into_item(self, currency: Currency) -> Result<LineItem, CommerceError> {
        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err(invalid(format!(
                "bad unitPrice {} for {}",
                self.unit_price, self.product_id
            )));
        }
        if self.stock_limit < 1 || self.quantity < 1 || self.quantity > self.stock_limit {
            return Err(invalid(format!(
                "quantity {} outside [1, {}] for {}",
                self.quantity, self.stock_limit, self.product_id
            )));
        }

        Ok(LineItem {
            product_id: self.product_id,
            display_name: self.display_name,
            unit_price: Money::from_decimal(self.unit_price, currency),
            quantity: self.quantity,
            stock_limit: self.stock_limit,
            image_ref: self.image_ref,
            discount_percentage: self.discount_percentage,
        })
    }
}

/// Accept counts written either as integers or as integral floats (`2.0`).
fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Ok(value as i64)
    } else {
        Err(serde::de::Error::custom(format!(
            "expected a whole number, got {}",
            value
        )))
    }
}

fn invalid(reason: String) -> CommerceError {
    CommerceError::InvalidSnapshot(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> CartState {
        let mut state = CartState::new(Currency::USD);
        state.items.push(
            LineItem::new("p1", "Widget", Money::new(1000, Currency::USD), 5)
                .with_quantity(2)
                .with_image("widget.png"),
        );
        state.recompute();
        state
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(CartSnapshot::from_state(&sample_state())).unwrap();

        assert_eq!(json["itemCount"], 2);
        assert_eq!(json["subtotal"], 20.0);
        let item = &json["items"][0];
        assert_eq!(item["productId"], "p1");
        assert_eq!(item["displayName"], "Widget");
        assert_eq!(item["unitPrice"], 10.0);
        assert_eq!(item["quantity"], 2);
        assert_eq!(item["stockLimit"], 5);
        assert_eq!(item["imageRef"], "widget.png");
        assert!(item.get("discountPercentage").is_none());
    }

    #[test]
    fn test_into_state_restores_lines() {
        let state = sample_state();
        let restored = CartSnapshot::from_state(&state)
            .into_state(Currency::USD)
            .unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_into_state_trusts_stored_aggregates() {
        let mut snapshot = CartSnapshot::from_state(&sample_state());
        snapshot.item_count = 7;
        snapshot.subtotal = 1.5;

        let restored = snapshot.into_state(Currency::USD).unwrap();
        assert_eq!(restored.item_count, 7);
        assert_eq!(restored.subtotal.amount_cents, 150);
    }

    #[test]
    fn test_presentation_fields_default() {
        let json = r#"{"items":[{"productId":"p1","unitPrice":3.5,"quantity":1,"stockLimit":2}],
                       "itemCount":1,"subtotal":3.5}"#;
        let snapshot: CartSnapshot = serde_json::from_str(json).unwrap();
        let state = snapshot.into_state(Currency::USD).unwrap();
        assert_eq!(state.items[0].display_name, "");
        assert_eq!(state.items[0].unit_price.amount_cents, 350);
    }

    #[test]
    fn test_integral_float_counts_accepted() {
        let json = r#"{"items":[{"productId":"p1","unitPrice":10,"quantity":2.0,"stockLimit":5.0}],
                       "itemCount":2.0,"subtotal":20}"#;
        let snapshot: CartSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.item_count, 2);

        let state = snapshot.into_state(Currency::USD).unwrap();
        assert_eq!(state.items[0].quantity, 2);
        assert_eq!(state.items[0].stock_limit, 5);
    }

    #[test]
    fn test_fractional_counts_rejected() {
        let json = r#"{"items":[],"itemCount":2.5,"subtotal":0}"#;
        assert!(serde_json::from_str::<CartSnapshot>(json).is_err());

        let json = r#"{"items":[],"itemCount":"2","subtotal":0}"#;
        assert!(serde_json::from_str::<CartSnapshot>(json).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_quantity() {
        let mut snapshot = CartSnapshot::from_state(&sample_state());
        snapshot.items[0].quantity = 6;
        assert!(matches!(
            snapshot.into_state(Currency::USD),
            Err(CommerceError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_products() {
        let mut snapshot = CartSnapshot::from_state(&sample_state());
        let dup = snapshot.items[0].clone();
        snapshot.items.push(dup);
        assert!(snapshot.into_state(Currency::USD).is_err());
    }

    #[test]
    fn test_rejects_negative_price() {
        let mut snapshot = CartSnapshot::from_state(&sample_state());
        snapshot.items[0].unit_price = -1.0;
        assert!(snapshot.into_state(Currency::USD).is_err());
    }
}
