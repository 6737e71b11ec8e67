//! Field-level checks that gate every outbound call.
//!
//! Checks run in a fixed order and stop at the first violation, so the same
//! input always yields the same error.

use super::{CardPayment, CreditCard, ValidationError};

/// Card number length bounds (inclusive).
pub const NUMBER_MIN_LEN: usize = 7;
/// Card number length bounds (inclusive).
pub const NUMBER_MAX_LEN: usize = 19;
/// Longest accepted holder name.
pub const HOLDER_MAX_LEN: usize = 25;
/// Longest accepted security code.
pub const SECURITY_CODE_MAX_LEN: usize = 4;
/// Longest accepted merchant order id.
pub const ORDER_ID_MAX_LEN: usize = 50;
/// Longest accepted soft descriptor.
pub const SOFT_DESCRIPTOR_MAX_LEN: usize = 13;

/// Checks every card field.
///
/// `current_year` is the calendar year at call time; cards expiring in an
/// earlier year are rejected. There is no upper bound on the year.
///
/// # Errors
///
/// Returns the first violated constraint, checking number, holder, month,
/// year and security code in that order.
pub fn validate_card(card: &CreditCard, current_year: i32) -> Result<(), ValidationError> {
    let number_len = card.number.chars().count();
    if number_len < NUMBER_MIN_LEN {
        return Err(ValidationError::NumberTooShort {
            min: NUMBER_MIN_LEN,
        });
    }
    if number_len > NUMBER_MAX_LEN {
        return Err(ValidationError::NumberTooLong {
            max: NUMBER_MAX_LEN,
        });
    }
    if !is_digits(&card.number) {
        return Err(ValidationError::NumberNotDigits);
    }

    if card.holder.is_empty() {
        return Err(ValidationError::HolderEmpty);
    }
    if card.holder.chars().count() > HOLDER_MAX_LEN {
        return Err(ValidationError::HolderTooLong {
            max: HOLDER_MAX_LEN,
        });
    }

    if !(1..=12).contains(&card.expiration_month) {
        return Err(ValidationError::MonthOutOfRange {
            month: card.expiration_month,
        });
    }
    if card.expiration_year < current_year {
        return Err(ValidationError::YearInPast {
            year: card.expiration_year,
            current: current_year,
        });
    }

    if card.security_code.is_empty() {
        return Err(ValidationError::SecurityCodeEmpty);
    }
    if card.security_code.chars().count() > SECURITY_CODE_MAX_LEN {
        return Err(ValidationError::SecurityCodeTooLong {
            max: SECURITY_CODE_MAX_LEN,
        });
    }
    if !is_digits(&card.security_code) {
        return Err(ValidationError::SecurityCodeNotDigits);
    }

    Ok(())
}

/// Checks every payment field.
///
/// # Errors
///
/// Returns the first violated constraint, checking order id, amount,
/// installments and soft descriptor in that order.
pub fn validate_payment(payment: &CardPayment) -> Result<(), ValidationError> {
    if payment.order_id.is_empty() {
        return Err(ValidationError::OrderIdEmpty);
    }
    if payment.order_id.chars().count() > ORDER_ID_MAX_LEN {
        return Err(ValidationError::OrderIdTooLong {
            max: ORDER_ID_MAX_LEN,
        });
    }
    if !is_alphanumeric(&payment.order_id) {
        return Err(ValidationError::OrderIdNotAlphanumeric);
    }

    if payment.amount == 0 {
        return Err(ValidationError::AmountTooSmall);
    }
    if payment.installments == 0 {
        return Err(ValidationError::InstallmentsTooSmall);
    }

    if payment.soft_descriptor.is_empty() {
        return Err(ValidationError::SoftDescriptorEmpty);
    }
    if payment.soft_descriptor.chars().count() > SOFT_DESCRIPTOR_MAX_LEN {
        return Err(ValidationError::SoftDescriptorTooLong {
            max: SOFT_DESCRIPTOR_MAX_LEN,
        });
    }
    if !is_alphanumeric(&payment.soft_descriptor) {
        return Err(ValidationError::SoftDescriptorNotAlphanumeric);
    }

    Ok(())
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_alphanumeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphanumeric())
}
