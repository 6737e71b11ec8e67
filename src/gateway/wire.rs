//! JSON records exchanged with the gateway.
//!
//! Request records borrow from the caller's card and payment and carry no
//! `Debug` impl, so a payload holding a full card number cannot end up in a
//! log line by accident. Response records make every field optional: which
//! ones are required is decided by the operation, not by the decoder. A
//! field of the wrong JSON type reads as absent.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::card::{CardPayment, CreditCard};

/// Card fields shared by every payload that carries a card.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CardFields<'a> {
    card_number: &'a str,
    holder: &'a str,
    expiration_date: String,
    security_code: &'a str,
}

impl<'a> CardFields<'a> {
    pub(crate) fn from_card(card: &'a CreditCard) -> Self {
        Self {
            card_number: &card.number,
            holder: &card.holder,
            expiration_date: card.expiration_date(),
            security_code: &card.security_code,
        }
    }
}

/// Body of `POST /1/zeroauth`.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ZeroAuthRequest<'a> {
    card_type: &'static str,
    #[serde(flatten)]
    card: CardFields<'a>,
    save_card: bool,
}

impl<'a> ZeroAuthRequest<'a> {
    pub(crate) fn new(card: &'a CreditCard) -> Self {
        Self {
            card_type: CREDIT_CARD,
            card: CardFields::from_card(card),
            save_card: false,
        }
    }
}

/// Body of `POST /1/card`.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TokenizeRequest<'a> {
    customer_name: &'a str,
    #[serde(flatten)]
    card: CardFields<'a>,
}

impl<'a> TokenizeRequest<'a> {
    pub(crate) fn new(customer_name: &'a str, card: &'a CreditCard) -> Self {
        Self {
            customer_name,
            card: CardFields::from_card(card),
        }
    }
}

/// Body of `POST /1/sales`.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SaleRequest<'a> {
    merchant_order_id: &'a str,
    payment: SalePayment<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct SalePayment<'a> {
    #[serde(rename = "Type")]
    kind: &'static str,
    amount: u64,
    currency: &'static str,
    country: &'static str,
    installments: u32,
    capture: bool,
    soft_descriptor: &'a str,
    credit_card: CardFields<'a>,
}

impl<'a> SaleRequest<'a> {
    pub(crate) fn new(payment: &'a CardPayment, card: &'a CreditCard) -> Self {
        Self {
            merchant_order_id: &payment.order_id,
            payment: SalePayment {
                kind: CREDIT_CARD,
                amount: payment.amount,
                currency: "BRL",
                country: "BRA",
                installments: payment.installments,
                capture: true,
                soft_descriptor: &payment.soft_descriptor,
                credit_card: CardFields::from_card(card),
            },
        }
    }
}

const CREDIT_CARD: &str = "CreditCard";

/// Body of a `GET /1/cardBin/{bin}` answer.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CardBinResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) provider: Option<String>,
}

/// Body of a `POST /1/zeroauth` answer.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ZeroAuthResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) valid: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) return_code: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) return_message: Option<String>,
}

/// Body of a `POST /1/card` answer.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CardTokenResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) card_token: Option<String>,
}

/// Body of a `POST /1/sales` answer.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SaleResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) payment: Option<SaleResponsePayment>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SaleResponsePayment {
    #[serde(default, deserialize_with = "lenient")]
    pub(crate) payment_id: Option<String>,
}

impl ZeroAuthResponse {
    /// Returns the `Valid` flag; anything but `true` means invalid.
    pub(crate) fn is_valid(&self) -> bool {
        self.valid.unwrap_or_default()
    }
}

impl SaleResponse {
    /// Returns the payment id, treating an empty string as absent.
    pub(crate) fn into_payment_id(self) -> Option<String> {
        self.payment
            .and_then(|p| p.payment_id)
            .filter(|id| !id.is_empty())
    }
}

/// Decodes an optional field, reading a value of the wrong type as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Treats an empty string as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
