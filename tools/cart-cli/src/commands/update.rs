//! Change the quantity of a cart line.

use anyhow::Result;
use cart_core::ProductId;

use super::UpdateArgs;
use crate::context::Context;

/// Run the update command.
pub fn run(args: UpdateArgs, ctx: &Context) -> Result<()> {
    let product_id = ProductId::new(args.product_id);
    let cart = ctx.open_cart()?;

    if !cart.update_quantity(&product_id, args.quantity) {
        if ctx.output.is_json() {
            ctx.output.json(&serde_json::json!({ "productId": product_id, "updated": false }));
        } else {
            ctx.output.info(&format!("{} is not in the cart", product_id));
        }
        return Ok(());
    }

    cart.read(|store| {
        let Some(line) = store.get(&product_id) else {
            return;
        };
        if ctx.output.is_json() {
            ctx.output.json(line);
            return;
        }

        if line.quantity != args.quantity {
            ctx.output.warn(&format!(
                "Requested {}, set to {} (allowed 1..={})",
                args.quantity, line.quantity, line.stock_limit
            ));
        } else {
            ctx.output
                .success(&format!("{} set to x{}", line.display_name, line.quantity));
        }
        ctx.output.badge(store.item_count(), store.subtotal());
    });

    Ok(())
}
