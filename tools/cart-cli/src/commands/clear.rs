//! Empty the cart.

use anyhow::Result;
use dialoguer::Confirm;

use super::ClearArgs;
use crate::context::Context;

/// Run the clear command.
pub fn run(args: ClearArgs, ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart()?;
    let count = cart.item_count();

    if count == 0 {
        ctx.output.info("Cart is already empty");
    } else if !args.yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove all {} items from the cart?", count))
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    // Clearing an empty cart still erases a stale snapshot.
    cart.clear();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "cleared": count }));
    } else if count > 0 {
        ctx.output.success(&format!("Removed {} items", count));
    }
    Ok(())
}
