//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::card::{CardPayment, CreditCard};

use super::defaults;

/// Cielo gateway client
///
/// Detects card brands, validates and tokenizes cards, and captures
/// credit-card sales against the Cielo e-commerce API.
#[derive(Debug, Parser)]
#[command(name = "cielo-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Merchant identifier
    #[arg(long = "merchant-id", env = "CIELO_MERCHANT_ID", global = true)]
    pub merchant_id: Option<String>,

    /// Merchant secret key
    #[arg(
        long = "merchant-key",
        env = "CIELO_MERCHANT_KEY",
        hide_env_values = true,
        global = true
    )]
    pub merchant_key: Option<String>,

    /// Base URL for transactional requests (defaults to the sandbox)
    #[arg(long = "command-url", global = true)]
    pub command_url: Option<String>,

    /// Base URL for lookups (defaults to the sandbox)
    #[arg(long = "query-url", global = true)]
    pub query_url: Option<String>,

    /// Path to configuration file
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for cielo-gateway
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = defaults::CONFIG_FILE)]
        output: PathBuf,
    },

    /// Look up the brand of a card number
    Brand {
        /// Card number (only the first nine digits are sent)
        number: String,
    },

    /// Check a card with a zero-value authorization
    Validate {
        #[command(flatten)]
        card: CardArgs,
    },

    /// Store a card and print its token
    Tokenize {
        /// Customer name attached to the token
        #[arg(long)]
        customer: String,

        #[command(flatten)]
        card: CardArgs,
    },

    /// Charge a card with immediate capture and print the payment id
    Pay {
        #[command(flatten)]
        card: CardArgs,

        #[command(flatten)]
        payment: PaymentArgs,
    },
}

/// Card fields shared by the card subcommands.
#[derive(Debug, Clone, Args)]
pub struct CardArgs {
    /// Card number
    #[arg(long)]
    pub number: String,

    /// Name printed on the card
    #[arg(long)]
    pub holder: String,

    /// Expiration month (1-12)
    #[arg(long = "exp-month")]
    pub exp_month: u32,

    /// Expiration year (four digits)
    #[arg(long = "exp-year")]
    pub exp_year: i32,

    /// Security code
    #[arg(long = "security-code")]
    pub security_code: String,
}

impl From<&CardArgs> for CreditCard {
    fn from(args: &CardArgs) -> Self {
        Self::new(
            args.number.clone(),
            args.holder.clone(),
            args.exp_month,
            args.exp_year,
            args.security_code.clone(),
        )
    }
}

/// Sale fields for the `pay` subcommand.
#[derive(Debug, Clone, Args)]
pub struct PaymentArgs {
    /// Amount in centavos
    #[arg(long)]
    pub amount: u64,

    /// Number of installments
    #[arg(long, default_value_t = 1)]
    pub installments: u32,

    /// Label shown on the cardholder's statement
    #[arg(long = "soft-descriptor")]
    pub soft_descriptor: String,

    /// Merchant order id (a random one is generated when omitted)
    #[arg(long = "order-id")]
    pub order_id: Option<String>,
}

impl From<&PaymentArgs> for CardPayment {
    fn from(args: &PaymentArgs) -> Self {
        let order_id = args
            .order_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string());

        Self::new(
            order_id,
            args.amount,
            args.installments,
            args.soft_descriptor.clone(),
        )
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Parses CLI arguments from an iterator, returning clap's error
    /// instead of exiting.
    ///
    /// # Errors
    ///
    /// Returns the clap error for invalid or missing arguments.
    pub fn try_parse_from_iter<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Command::Init { .. })
    }
}
