//! Add a product to the cart.

use anyhow::Result;
use cart_core::cart::LineItem;
use cart_core::{Money, ProductId};

use super::{parse_price, AddArgs};
use crate::context::Context;

/// Run the add command.
pub fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let currency = ctx.config.pricing.currency()?;
    let price = Money::from_decimal(parse_price(&args.price)?, currency);
    let product_id = ProductId::new(args.product_id);
    let name = args.name.unwrap_or_else(|| product_id.to_string());

    let mut candidate =
        LineItem::new(product_id.clone(), name, price, args.stock).with_quantity(args.quantity);
    if let Some(image) = args.image {
        candidate = candidate.with_image(image);
    }
    if let Some(discount) = args.discount {
        candidate = candidate.with_discount(discount);
    }

    let cart = ctx.open_cart()?;
    let before = cart.read(|store| store.get(&product_id).map(|i| i.quantity));
    cart.add_item(candidate);

    cart.read(|store| {
        let Some(line) = store.get(&product_id) else {
            return;
        };
        if ctx.output.is_json() {
            ctx.output.json(line);
            return;
        }

        match before {
            Some(prev) if prev == line.quantity => ctx.output.warn(&format!(
                "{} already at stock limit ({})",
                line.display_name, line.stock_limit
            )),
            Some(_) => ctx.output.success(&format!(
                "{} now x{} in cart",
                line.display_name, line.quantity
            )),
            None => ctx.output.success(&format!(
                "Added {} x{}",
                line.display_name, line.quantity
            )),
        }
        ctx.output.badge(store.item_count(), store.subtotal());
    });

    Ok(())
}
