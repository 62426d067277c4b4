//! Custom Gift Card CLI - Settings and provisioning tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the store's gift card settings
//! giftcard-cli settings show
//!
//! # Change the accepted amount range
//! giftcard-cli settings set --min-price 50 --max-price 2000
//!
//! # Disable physical cards
//! giftcard-cli settings set --physical false
//!
//! # Provision a variant without going through the proxy
//! giftcard-cli provision --amount 350 --type digital
//! ```
//!
//! # Commands
//!
//! - `settings show` - Print the shop's gift card settings metafields
//! - `settings set` - Update gift card settings (only provided flags change)
//! - `provision` - Run the provisioning pipeline directly against Shopify

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "giftcard-cli")]
#[command(author, version, about = "Custom gift card CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage gift card settings metafields
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Provision a gift card variant for an amount
    Provision {
        /// Gift card amount, e.g. 350 or 350.50
        #[arg(short, long)]
        amount: String,

        /// Card type (`digital` or `physical`)
        #[arg(short = 't', long = "type", default_value = "digital")]
        card_type: String,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the shop's gift card settings
    Show,
    /// Update gift card settings; flags that are not provided keep their value
    Set {
        /// Smallest accepted amount
        #[arg(long)]
        min_price: Option<i64>,

        /// Largest accepted amount
        #[arg(long)]
        max_price: Option<i64>,

        /// Master switch for the gift card feature
        #[arg(long)]
        enabled: Option<bool>,

        /// Offer digital cards
        #[arg(long)]
        digital: Option<bool>,

        /// Offer physical cards
        #[arg(long)]
        physical: Option<bool>,

        /// Offer the gift box upsell with physical cards
        #[arg(long)]
        giftbox: Option<bool>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show().await?,
            SettingsAction::Set {
                min_price,
                max_price,
                enabled,
                digital,
                physical,
                giftbox,
            } => {
                commands::settings::set(&commands::settings::SettingsUpdate {
                    min_price,
                    max_price,
                    enabled,
                    digital,
                    physical,
                    giftbox,
                })
                .await?;
            }
        },
        Commands::Provision { amount, card_type } => {
            commands::provision::run(&amount, &card_type).await?;
        }
    }
    Ok(())
}
