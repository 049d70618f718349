//! Configuration management commands.

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Path => show_path(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    ctx.output.info("[store]");
    ctx.output.kv("data_dir", &ctx.data_dir().display().to_string());
    ctx.output.kv("key", &ctx.config.store.key);

    ctx.output.info("[pricing]");
    ctx.output.kv("currency", &ctx.config.pricing.currency);
    ctx.output
        .kv("tax_rate", &format!("{}%", ctx.config.pricing.tax_rate * 100.0));
    ctx.output
        .kv("shipping", &ctx.config.pricing.shipping.to_string());

    Ok(())
}

fn show_path(ctx: &Context) -> Result<()> {
    let dir = ctx.data_dir();
    let key = ctx.cart_key()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "dataDir": dir,
            "key": key,
        }));
    } else {
        println!("{}", dir.join(format!("{}.json", key)).display());
    }
    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let target = ctx.config_target();
    if target.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            target.display()
        );
    }

    std::fs::write(&target, generate_default_config())
        .with_context(|| format!("Failed to write {}", target.display()))?;
    ctx.output
        .success(&format!("Wrote {}", target.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let Some(ref path) = ctx.config_path else {
        ctx.output.info("No config file found; using defaults");
        return Ok(());
    };

    // Re-read from disk so edits since startup are checked too.
    let path_str = path
        .to_str()
        .with_context(|| format!("Config path is not UTF-8: {}", path.display()))?;
    CliConfig::load(path_str)?;
    ctx.output
        .success(&format!("{} is valid", path.display()));
    Ok(())
}
