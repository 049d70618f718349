//! Order summary.

use anyhow::Result;

use crate::context::Context;

/// Run the summary command.
pub fn run(ctx: &Context) -> Result<()> {
    let options = ctx.config.pricing.options()?;
    let cart = ctx.open_cart()?;
    let summary = cart.read(|store| store.summary(&options))?;

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    ctx.output.header("Order Summary");
    if summary.lines.is_empty() {
        ctx.output.info("Your cart is empty");
        return Ok(());
    }

    for line in &summary.lines {
        ctx.output.kv(
            &format!("{} x{}", line.display_name, line.quantity),
            &line.line_total.display(),
        );
    }
    println!();
    ctx.output.summary(&summary);
    if summary.has_savings() {
        ctx.output
            .success(&format!("You saved {}!", summary.savings.display()));
    }
    Ok(())
}
