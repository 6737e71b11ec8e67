//! Validation error type.

use thiserror::Error;

/// A violated card or payment constraint.
///
/// Produced before any network I/O; names the exact field and rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Card number is shorter than the minimum length.
    #[error("field Number cannot be less than {min} characters")]
    NumberTooShort {
        /// Minimum number of characters
        min: usize,
    },

    /// Card number is longer than the maximum length.
    #[error("field Number cannot exceed {max} characters")]
    NumberTooLong {
        /// Maximum number of characters
        max: usize,
    },

    /// Card number contains something other than ASCII digits.
    #[error("field Number must contain only digits")]
    NumberNotDigits,

    /// Cardholder name is empty.
    #[error("field Holder cannot be empty")]
    HolderEmpty,

    /// Cardholder name is too long.
    #[error("field Holder cannot exceed {max} characters")]
    HolderTooLong {
        /// Maximum number of characters
        max: usize,
    },

    /// Expiration month is not between 1 and 12.
    #[error("field ExpirationMonth must be between 1 and 12, got {month}")]
    MonthOutOfRange {
        /// Month given
        month: u32,
    },

    /// Expiration year is before the current year.
    #[error("field ExpirationYear must be the current year ({current}) or later, got {year}")]
    YearInPast {
        /// Year given
        year: i32,
        /// Current calendar year
        current: i32,
    },

    /// Security code is empty.
    #[error("field SecurityCode cannot be empty")]
    SecurityCodeEmpty,

    /// Security code is too long.
    #[error("field SecurityCode cannot exceed {max} characters")]
    SecurityCodeTooLong {
        /// Maximum number of characters
        max: usize,
    },

    /// Security code contains something other than ASCII digits.
    #[error("field SecurityCode must contain only digits")]
    SecurityCodeNotDigits,

    /// Merchant order id is empty.
    #[error("field MerchantOrderId cannot be empty")]
    OrderIdEmpty,

    /// Merchant order id is too long.
    #[error("field MerchantOrderId cannot exceed {max} characters")]
    OrderIdTooLong {
        /// Maximum number of characters
        max: usize,
    },

    /// Merchant order id contains characters other than ASCII letters and digits.
    #[error("field MerchantOrderId can contain letters and digits only")]
    OrderIdNotAlphanumeric,

    /// Amount is zero.
    #[error("field Amount cannot be less than 1")]
    AmountTooSmall,

    /// Installment count is zero.
    #[error("field Installments cannot be less than 1")]
    InstallmentsTooSmall,

    /// Soft descriptor is empty.
    #[error("field SoftDescriptor cannot be empty")]
    SoftDescriptorEmpty,

    /// Soft descriptor is too long.
    #[error("field SoftDescriptor cannot exceed {max} characters")]
    SoftDescriptorTooLong {
        /// Maximum number of characters
        max: usize,
    },

    /// Soft descriptor contains characters other than ASCII letters and digits.
    #[error("field SoftDescriptor can contain letters and digits only")]
    SoftDescriptorNotAlphanumeric,
}

impl ValidationError {
    /// Returns the gateway field name the error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NumberTooShort { .. } | Self::NumberTooLong { .. } | Self::NumberNotDigits => {
                "Number"
            }
            Self::HolderEmpty | Self::HolderTooLong { .. } => "Holder",
            Self::MonthOutOfRange { .. } => "ExpirationMonth",
            Self::YearInPast { .. } => "ExpirationYear",
            Self::SecurityCodeEmpty
            | Self::SecurityCodeTooLong { .. }
            | Self::SecurityCodeNotDigits => "SecurityCode",
            Self::OrderIdEmpty | Self::OrderIdTooLong { .. } | Self::OrderIdNotAlphanumeric => {
                "MerchantOrderId"
            }
            Self::AmountTooSmall => "Amount",
            Self::InstallmentsTooSmall => "Installments",
            Self::SoftDescriptorEmpty
            | Self::SoftDescriptorTooLong { .. }
            | Self::SoftDescriptorNotAlphanumeric => "SoftDescriptor",
        }
    }
}
