//! Remove a product from the cart.

use anyhow::Result;
use cart_core::ProductId;

use super::RemoveArgs;
use crate::context::Context;

/// Run the remove command.
pub fn run(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let product_id = ProductId::new(args.product_id);
    let cart = ctx.open_cart()?;
    let removed = cart.remove_item(&product_id);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "productId": product_id,
            "removed": removed,
            "itemCount": cart.item_count(),
        }));
        return Ok(());
    }

    if removed {
        ctx.output.success(&format!("Removed {}", product_id));
    } else {
        ctx.output.info(&format!("{} is not in the cart", product_id));
    }
    ctx.output.badge(cart.item_count(), cart.subtotal());
    Ok(())
}
