use crate::config::toml_config::{ShopConfig, StorageBackend};
use crate::core::checkout::CheckoutForm;
use crate::core::receipt::ReceiptFormat;
use crate::utils::error::Result;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "skipass-shop")]
#[command(about = "SkiPass Cloud demo shop: cart, checkout and order confirmation")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory for the file-backed slots (overrides storage.path)
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the available plans
    Plans,
    /// Show the cart with subtotals
    Cart,
    /// Add a plan to the cart
    Add {
        plan: String,
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove a plan from the cart
    Remove { plan: String },
    /// Set the quantity of a plan already in the cart
    Qty {
        plan: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Empty the cart
    Clear,
    /// Submit the checkout form
    Checkout {
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        fullname: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        country: Option<String>,
        /// invoice, card or sepa
        #[arg(long)]
        payment: Option<String>,
    },
    /// Show the confirmation for the last order
    Order {
        #[arg(long, value_enum, default_value_t = ReceiptFormat::Text)]
        format: ReceiptFormat,
    },
    /// Inspect or change the cookie consent
    Consent {
        #[arg(value_enum, default_value_t = ConsentAction::Show)]
        action: ConsentAction,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConsentAction {
    Show,
    Accept,
    Reject,
    Reset,
}

impl Command {
    pub fn checkout_form(&self) -> Option<CheckoutForm> {
        match self {
            Command::Checkout {
                company,
                fullname,
                email,
                country,
                payment,
            } => Some(CheckoutForm {
                company: company.clone(),
                fullname: fullname.clone(),
                email: email.clone(),
                country: country.clone(),
                payment: payment.clone(),
            }),
            _ => None,
        }
    }
}

impl CliConfig {
    /// File configuration (or defaults) with command-line overrides applied.
    pub fn resolve(&self) -> Result<ShopConfig> {
        let mut config = match &self.config {
            Some(path) => ShopConfig::from_file(path)?,
            None => ShopConfig::default(),
        };
        if let Some(dir) = &self.data_dir {
            config.storage.backend = StorageBackend::File;
            config.storage.path = dir.clone();
        }
        if self.log_json {
            config.logging.json = true;
        }
        Ok(config)
    }
}
