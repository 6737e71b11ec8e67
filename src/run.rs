//! Operation dispatch for the command line.
//!
//! Turns a parsed subcommand into an [`Operation`], runs it against a
//! [`GatewayClient`] and reports what the caller should print.

use std::fmt;

use thiserror::Error;

use cielo_gateway::card::{CardPayment, CreditCard};
use cielo_gateway::config::{Command, ValidatedConfig};
use cielo_gateway::gateway::{GatewayClient, GatewayError};
use cielo_gateway::time::{Clock, Sleeper};
use cielo_gateway::transport::HttpClient;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to create the gateway client.
    #[error("Failed to create gateway client: {0}")]
    ClientSetup(#[source] GatewayError),

    /// The gateway operation failed.
    #[error("{operation} failed: {source}")]
    Operation {
        /// Subcommand name
        operation: &'static str,
        /// Underlying gateway error
        #[source]
        source: GatewayError,
    },
}

impl RunError {
    /// Returns true if a charge may have been captured despite the failure.
    #[must_use]
    pub const fn is_outcome_unknown(&self) -> bool {
        match self {
            Self::Operation { source, .. } => source.is_outcome_unknown(),
            Self::ClientSetup(_) => false,
        }
    }
}

/// One gateway call requested from the command line.
#[derive(Debug)]
pub enum Operation {
    /// Look up the card brand.
    Brand { number: String },
    /// Zero-value authorization.
    Validate { card: CreditCard },
    /// Store the card and return a token.
    Tokenize { customer: String, card: CreditCard },
    /// Captured sale.
    Pay {
        payment: CardPayment,
        card: CreditCard,
    },
}

impl Operation {
    /// Builds the operation for `command`, or `None` for `init`.
    ///
    /// A `pay` without `--order-id` gets a freshly generated order id here.
    #[must_use]
    pub fn from_command(command: &Command) -> Option<Self> {
        match command {
            Command::Init { .. } => None,
            Command::Brand { number } => Some(Self::Brand {
                number: number.clone(),
            }),
            Command::Validate { card } => Some(Self::Validate { card: card.into() }),
            Command::Tokenize { customer, card } => Some(Self::Tokenize {
                customer: customer.clone(),
                card: card.into(),
            }),
            Command::Pay { card, payment } => Some(Self::Pay {
                payment: payment.into(),
                card: card.into(),
            }),
        }
    }

    /// Returns the subcommand name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Brand { .. } => "brand",
            Self::Validate { .. } => "validate",
            Self::Tokenize { .. } => "tokenize",
            Self::Pay { .. } => "pay",
        }
    }
}

/// Successful result of an [`Operation`].
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Card brand name
    Brand(String),
    /// The card passed zero-value authorization
    CardValid,
    /// Card token
    Token(String),
    /// Captured sale
    Payment {
        /// Merchant order id sent with the sale
        order_id: String,
        /// Gateway payment id
        payment_id: String,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Brand(brand) => f.write_str(brand),
            Self::CardValid => f.write_str("Card is valid"),
            Self::Token(token) => f.write_str(token),
            Self::Payment { payment_id, .. } => f.write_str(payment_id),
        }
    }
}

/// Runs `operation` against a client built from `config`.
///
/// Excluded from coverage - performs real network I/O.
///
/// # Errors
///
/// Returns [`RunError::ClientSetup`] if the HTTP client cannot be built,
/// or [`RunError::Operation`] if the gateway call fails.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, operation: Operation) -> Result<Outcome, RunError> {
    let client = GatewayClient::connect(config.gateway).map_err(RunError::ClientSetup)?;
    run_operation(&client, operation).await
}

/// Runs `operation` against `client`.
///
/// # Errors
///
/// Returns [`RunError::Operation`] wrapping the gateway error.
pub async fn run_operation<H, S, C>(
    client: &GatewayClient<H, S, C>,
    operation: Operation,
) -> Result<Outcome, RunError>
where
    H: HttpClient,
    S: Sleeper,
    C: Clock,
{
    let name = operation.name();
    tracing::debug!(operation = name, "Running operation");

    let result = match operation {
        Operation::Brand { number } => client.detect_brand(&number).await.map(Outcome::Brand),
        Operation::Validate { card } => client
            .validate_card(&card)
            .await
            .map(|()| Outcome::CardValid),
        Operation::Tokenize { customer, card } => client
            .tokenize_card(&customer, &card)
            .await
            .map(Outcome::Token),
        Operation::Pay { payment, card } => client
            .process_payment(&payment, &card)
            .await
            .map(|payment_id| Outcome::Payment {
                order_id: payment.order_id,
                payment_id,
            }),
    };

    result.map_err(|source| RunError::Operation {
        operation: name,
        source,
    })
}
