use cart_core::prelude::*;
use cart_storage::{CartStorage, FileStorage, MemoryStorage};
use tempfile::TempDir;

fn p1() -> LineItem {
    LineItem::new("p1", "Widget", Money::from_decimal(10.0, Currency::USD), 5)
}

fn id(s: &str) -> ProductId {
    ProductId::new(s)
}

#[test]
fn test_double_add_merges_into_one_line() {
    let mut store = CartStore::new(MemoryStorage::new());
    store.add_item(p1());
    store.add_item(p1());

    assert_eq!(store.items().len(), 1);
    assert_eq!(store.items()[0].quantity, 2);
    assert_eq!(store.subtotal().display(), "$20.00");
}

#[test]
fn test_update_above_stock_clamps() {
    let mut store = CartStore::new(MemoryStorage::new());
    store.add_item(p1());
    store.update_quantity(&id("p1"), 100);
    assert_eq!(store.get(&id("p1")).map(|i| i.quantity), Some(5));
}

#[test]
fn test_update_to_zero_clamps_to_one() {
    let mut store = CartStore::new(MemoryStorage::new());
    store.add_item(p1().with_quantity(4));
    store.update_quantity(&id("p1"), 0);
    assert_eq!(store.get(&id("p1")).map(|i| i.quantity), Some(1));
}

#[test]
fn test_remove_unknown_is_silent() {
    let mut store = CartStore::new(MemoryStorage::new());
    store.add_item(p1().with_quantity(2));
    let before = store.state().clone();

    store.remove_item(&id("unknown"));
    assert_eq!(store.state(), &before);
}

#[test]
fn test_clear_then_reload_is_empty() {
    let storage = MemoryStorage::new();
    let mut store = CartStore::new(storage.clone());
    store.add_item(p1());
    store.clear();

    assert!(storage.get("cart").unwrap().is_none());
    let reloaded = CartStore::open(storage);
    assert!(reloaded.is_empty());
    assert_eq!(reloaded.item_count(), 0);
    assert!(reloaded.subtotal().is_zero());
}

#[test]
fn test_round_trip_across_instances() {
    let storage = MemoryStorage::new();
    let mut first = CartStore::new(storage.clone());
    first.add_item(p1());

    let mut second = CartStore::new(storage);
    assert!(second.load_persisted());
    assert_eq!(second.items(), first.items());
    assert_eq!(second.item_count(), 1);
    assert_eq!(second.subtotal(), first.subtotal());
}

#[test]
fn test_file_storage_survives_restart() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("cart-data");

    {
        let mut store = CartStore::new(FileStorage::open(&dir).unwrap());
        store.add_item(p1().with_quantity(3).with_image("widget.png"));
        store.add_item(LineItem::new("p2", "Gadget", Money::new(1250, Currency::USD), 2));
    }

    let store = CartStore::open(FileStorage::open(&dir).unwrap());
    let ids: Vec<&str> = store.items().iter().map(|i| i.product_id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "p2"]);
    assert_eq!(store.item_count(), 4);
    assert_eq!(store.subtotal().display(), "$42.50");
    assert_eq!(store.items()[0].image_ref, "widget.png");
}

#[test]
fn test_snapshot_written_in_wire_shape() {
    let storage = MemoryStorage::new();
    let mut store = CartStore::new(storage.clone());
    store.add_item(p1().with_quantity(2));

    let raw = storage.get("cart").unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(json["items"].is_array());
    assert_eq!(json["itemCount"], 2);
    assert_eq!(json["subtotal"], 20.0);
    assert_eq!(json["items"][0]["productId"], "p1");
    assert_eq!(json["items"][0]["stockLimit"], 5);
}

#[test]
fn test_summary_uses_discounts() {
    let mut store = CartStore::new(MemoryStorage::new());
    store.add_item(p1().with_quantity(2).with_discount(50.0));

    let summary = store.summary(&PricingOptions::default()).unwrap();
    assert_eq!(summary.subtotal.display(), "$20.00");
    assert_eq!(summary.savings.display(), "$10.00");
    assert_eq!(summary.tax.display(), "$1.00");
    assert_eq!(summary.grand_total.display(), "$11.00");
}
