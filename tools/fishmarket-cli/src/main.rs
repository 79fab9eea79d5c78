//! fishmarket - command line tool for the storefront cart.
//!
//! Commands:
//! - `fishmarket add` - Add a product to the cart
//! - `fishmarket remove` - Remove a cart line
//! - `fishmarket set` - Change a line's quantity
//! - `fishmarket show` - Show cart contents and totals
//! - `fishmarket export` - Print the cart as order records
//! - `fishmarket clear` - Empty the cart
//! - `fishmarket checkout` - Place an order for the cart
//! - `fishmarket config` - Manage configuration

mod commands;
mod config;
mod context;
mod gateway;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AddArgs, CheckoutArgs, ClearArgs, ConfigArgs, RemoveArgs, SetArgs};

/// fishmarket - manage the storefront cart from the shell
#[derive(Parser)]
#[command(name = "fishmarket")]
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

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add(AddArgs),

    /// Remove a line from the cart
    Remove(RemoveArgs),

    /// Set the quantity of a line
    Set(SetArgs),

    /// Show cart contents and totals
    Show,

    /// Print the cart as order records
    Export,

    /// Empty the cart
    Clear(ClearArgs),

    /// Place an order for everything in the cart
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    logging::init(&ctx.config.logging, ctx.output.is_verbose())?;
    tracing::debug!(config = ?ctx.config_path, cart_key = %ctx.config.cart_key(), "loaded configuration");

    // Execute command
    let result = match cli.command {
        Commands::Add(args) => commands::cart::add(args, &ctx),
        Commands::Remove(args) => commands::cart::remove(args, &ctx),
        Commands::Set(args) => commands::cart::set(args, &ctx),
        Commands::Show => commands::cart::show(&ctx),
        Commands::Export => commands::cart::export(&ctx),
        Commands::Clear(args) => commands::cart::clear(args, &ctx),
        Commands::Checkout(args) => commands::checkout::run(args, &ctx),
        Commands::Config(args) => commands::config::run(args, &ctx),
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
