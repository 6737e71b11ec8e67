//! Card and payment data, and the validation gate applied before any
//! gateway call.
//!
//! - [`CreditCard`] and [`CardPayment`] are plain caller-built values
//! - [`validate_card`] and [`validate_payment`] are pure checks returning
//!   the first violated constraint as a [`ValidationError`]

mod error;
mod model;
mod validate;

#[cfg(test)]
mod model_tests;

pub use error::ValidationError;
pub use model::{CardPayment, CreditCard};
pub(crate) use model::{bin_of, mask};
pub use validate::{
    HOLDER_MAX_LEN, NUMBER_MAX_LEN, NUMBER_MIN_LEN, ORDER_ID_MAX_LEN, SECURITY_CODE_MAX_LEN,
    SOFT_DESCRIPTOR_MAX_LEN, validate_card, validate_payment,
};
