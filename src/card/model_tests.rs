//! Tests for card and payment value types.

use super::{CardPayment, CreditCard, bin_of, mask};

fn card() -> CreditCard {
    CreditCard::new("5024007153463100", "Teste Holder", 2, 2030, "123")
}

mod expiration_date {
    use super::*;

    #[test]
    fn pads_month_to_two_digits() {
        assert_eq!(card().expiration_date(), "02/2030");
    }

    #[test]
    fn two_digit_month_is_unchanged() {
        let card = CreditCard::new("4111111111111111", "A", 12, 2031, "1");
        assert_eq!(card.expiration_date(), "12/2031");
    }

    #[test]
    fn pads_year_to_four_digits() {
        let card = CreditCard::new("4111111111111111", "A", 7, 999, "1");
        assert_eq!(card.expiration_date(), "07/0999");
    }
}

mod masking {
    use super::*;

    #[test]
    fn keeps_last_four_digits() {
        assert_eq!(card().masked_number(), "************3100");
    }

    #[test]
    fn short_values_are_left_visible() {
        assert_eq!(mask("123"), "123");
        assert_eq!(mask(""), "");
    }

    #[test]
    fn debug_hides_number_and_security_code() {
        let card = CreditCard::new("5024007153463100", "Teste Holder", 2, 2030, "987");
        let debug = format!("{card:?}");

        assert!(debug.contains("************3100"));
        assert!(debug.contains("02/2030"));
        assert!(!debug.contains("5024007153463100"));
        assert!(!debug.contains("987"));
    }
}

mod bin {
    use super::*;

    #[test]
    fn takes_first_nine_characters() {
        assert_eq!(card().bin(), "502400715");
    }

    #[test]
    fn shorter_numbers_are_used_whole() {
        assert_eq!(bin_of("41111"), "41111");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(bin_of("１２３４５６７８９０"), "１２３４５６７８９");
    }
}

mod card_payment {
    use super::*;

    #[test]
    fn new_sets_all_fields() {
        let payment = CardPayment::new("order1", 1569, 1, "LOJATESTE");

        assert_eq!(payment.order_id, "order1");
        assert_eq!(payment.amount, 1569);
        assert_eq!(payment.installments, 1);
        assert_eq!(payment.soft_descriptor, "LOJATESTE");
    }
}
