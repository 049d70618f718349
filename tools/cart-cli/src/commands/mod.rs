//! CLI command implementations.

pub mod add;
pub mod clear;
pub mod config;
pub mod remove;
pub mod show;
pub mod summary;
pub mod update;

use clap::{Args, Subcommand};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Catalog product ID.
    pub product_id: String,

    /// Unit price as a decimal amount (e.g. 19.99).
    #[arg(short, long)]
    pub price: String,

    /// Units currently in stock; the cart never holds more.
    #[arg(short, long)]
    pub stock: i64,

    /// Units to add.
    #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
    pub quantity: i64,

    /// Display name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Image reference.
    #[arg(long)]
    pub image: Option<String>,

    /// Promotional discount in percent.
    #[arg(long)]
    pub discount: Option<f64>,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Catalog product ID.
    pub product_id: String,
}

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Catalog product ID.
    pub product_id: String,

    /// New quantity; clamped to the line's stock limit and to at least 1.
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Print where the cart is stored.
    Path,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Parse a user-supplied decimal price.
pub fn parse_price(raw: &str) -> anyhow::Result<f64> {
    let trimmed = raw.trim().trim_start_matches('$');
    let value: f64 = trimmed
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid price: {:?}", raw))?;
    if !value.is_finite() || value < 0.0 {
        anyhow::bail!("Price must be a non-negative amount, got {}", raw);
    }
    Ok(value)
}
