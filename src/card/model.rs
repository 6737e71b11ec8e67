//! Card and payment value types.

use std::fmt;

/// Raw credit card data supplied by the caller.
///
/// Never persisted and never logged in full: the `Debug` output masks the
/// number and hides the security code. Use [`CreditCard::masked_number`]
/// when a card needs to appear in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct CreditCard {
    /// Card number (7 to 19 digits)
    pub number: String,
    /// Name printed on the card (1 to 25 characters)
    pub holder: String,
    /// Expiration month (1 to 12)
    pub expiration_month: u32,
    /// Expiration year (four digits, not in the past)
    pub expiration_year: i32,
    /// Security code (1 to 4 digits)
    pub security_code: String,
}

impl CreditCard {
    /// Creates a card from its fields.
    ///
    /// No validation happens here; see [`validate_card`](super::validate_card).
    #[must_use]
    pub fn new(
        number: impl Into<String>,
        holder: impl Into<String>,
        expiration_month: u32,
        expiration_year: i32,
        security_code: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            holder: holder.into(),
            expiration_month,
            expiration_year,
            security_code: security_code.into(),
        }
    }

    /// Returns the expiration date as the gateway expects it: `MM/YYYY`.
    ///
    /// ```
    /// use cielo_gateway::card::CreditCard;
    ///
    /// let card = CreditCard::new("4111111111111111", "Ada Lovelace", 2, 2030, "123");
    /// assert_eq!(card.expiration_date(), "02/2030");
    /// ```
    #[must_use]
    pub fn expiration_date(&self) -> String {
        format!("{:02}/{:04}", self.expiration_month, self.expiration_year)
    }

    /// Returns the card number with everything but the last four characters
    /// replaced by `*`.
    #[must_use]
    pub fn masked_number(&self) -> String {
        mask(&self.number)
    }

    /// Returns the bank identification prefix used for brand lookup:
    /// the first nine characters of the number.
    #[must_use]
    pub fn bin(&self) -> String {
        bin_of(&self.number)
    }
}

impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCard")
            .field("number", &self.masked_number())
            .field("holder", &self.holder)
            .field("expiration", &self.expiration_date())
            .field("security_code", &"***")
            .finish()
    }
}

/// A single captured credit-card sale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPayment {
    /// Merchant order identifier (1 to 50 ASCII letters or digits)
    pub order_id: String,
    /// Amount in minor currency units (centavos), at least 1
    pub amount: u64,
    /// Number of installments, at least 1
    pub installments: u32,
    /// Label shown on the cardholder's statement (1 to 13 ASCII letters or digits)
    pub soft_descriptor: String,
}

impl CardPayment {
    /// Creates a payment from its fields.
    ///
    /// No validation happens here; see [`validate_payment`](super::validate_payment).
    #[must_use]
    pub fn new(
        order_id: impl Into<String>,
        amount: u64,
        installments: u32,
        soft_descriptor: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            amount,
            installments,
            soft_descriptor: soft_descriptor.into(),
        }
    }
}

/// Masks all but the last four characters of a card number.
pub(crate) fn mask(number: &str) -> String {
    let len = number.chars().count();
    let visible = len.saturating_sub(4);
    number
        .chars()
        .enumerate()
        .map(|(i, c)| if i < visible { '*' } else { c })
        .collect()
}

/// First nine characters of a card number.
pub(crate) fn bin_of(number: &str) -> String {
    number.chars().take(9).collect()
}
