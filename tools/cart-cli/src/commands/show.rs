//! Show cart contents.

use anyhow::Result;
use cart_core::cart::CartSnapshot;

use crate::context::Context;

/// Run the show command.
pub fn run(ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart()?;

    cart.read(|store| {
        if ctx.output.is_json() {
            ctx.output.json(&CartSnapshot::from_state(store.state()));
            return;
        }

        ctx.output.header("Shopping Cart");
        if store.is_empty() {
            ctx.output.info("Your cart is empty");
            return;
        }

        ctx.output.cart_lines(store.items());
        println!();
        ctx.output.badge(store.item_count(), store.subtotal());
    });

    Ok(())
}
