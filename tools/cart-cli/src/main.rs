//! Cart CLI - a terminal shopping cart on top of the cart store.
//!
//! Commands:
//! - `cart add` - Add a product (merges with an existing line)
//! - `cart remove` - Remove a product
//! - `cart update` - Change a line's quantity
//! - `cart clear` - Empty the cart
//! - `cart show` - List cart contents
//! - `cart summary` - Order summary with shipping and tax
//! - `cart config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AddArgs, ClearArgs, ConfigArgs, RemoveArgs, UpdateArgs};

/// Cart CLI - Manage a locally persisted shopping cart
#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Cart profile (keeps a separate cart per profile)
    #[arg(short = 'P', long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add(AddArgs),

    /// Remove a product from the cart
    Remove(RemoveArgs),

    /// Change the quantity of a product in the cart
    Update(UpdateArgs),

    /// Remove everything from the cart
    Clear(ClearArgs),

    /// Show cart contents
    Show,

    /// Show the order summary
    Summary,

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);
    init_tracing(output.is_verbose());

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, cli.profile, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Add(args) => commands::add::run(args, &ctx),
        Commands::Remove(args) => commands::remove::run(args, &ctx),
        Commands::Update(args) => commands::update::run(args, &ctx),
        Commands::Clear(args) => commands::clear::run(args, &ctx),
        Commands::Show => commands::show::run(&ctx),
        Commands::Summary => commands::summary::run(&ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_add_with_profile_parses() {
        let cli = Cli::try_parse_from([
            "cart", "-P", "office", "add", "p1", "-p", "10", "--stock", "5",
        ])
        .unwrap();

        assert_eq!(cli.profile.as_deref(), Some("office"));
        match cli.command {
            Commands::Add(args) => {
                assert_eq!(args.product_id, "p1");
                assert_eq!(args.price, "10");
                assert_eq!(args.stock, 5);
                assert_eq!(args.quantity, 1);
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn test_global_profile_after_subcommand() {
        let cli = Cli::try_parse_from(["cart", "show", "--profile", "home"]).unwrap();
        assert_eq!(cli.profile.as_deref(), Some("home"));
        assert!(matches!(cli.command, Commands::Show));
    }
}
