//! CLI command implementations.

pub mod cart;
pub mod checkout;
pub mod config;

use clap::{Args, Subcommand};

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Catalog product id.
    pub product_id: String,

    /// Product name.
    #[arg(short, long)]
    pub name: String,

    /// Unit price in major units (e.g. 12.50).
    #[arg(short, long)]
    pub price: f64,

    /// Product image URL or path.
    #[arg(short, long, default_value = "")]
    pub image: String,

    /// Pre-discount reference price in major units.
    #[arg(long)]
    pub original_price: Option<f64>,

    /// Quantity to add.
    #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
    pub qty: i64,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Line id as shown by `show`.
    pub line_id: String,
}

/// Arguments for the set command.
#[derive(Args)]
pub struct SetArgs {
    /// Line id as shown by `show`.
    pub line_id: String,

    /// New quantity; zero or less removes the line.
    #[arg(allow_negative_numbers = true)]
    pub qty: i64,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Customer name.
    #[arg(long)]
    pub name: String,

    /// Contact phone number.
    #[arg(long)]
    pub phone: String,

    /// Delivery address.
    #[arg(long)]
    pub address: String,

    /// Contact email.
    #[arg(long)]
    pub email: Option<String>,

    /// Note for the shop.
    #[arg(long)]
    pub note: Option<String>,

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
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
