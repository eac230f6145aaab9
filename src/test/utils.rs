#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::app::utils::{format_money, format_percent, format_quantity, format_signed_money};

    #[test]
    fn money_is_grouped_and_rounded() {
        assert_eq!(format_money(dec!(1234567.891), "$"), "$1,234,567.89");
        assert_eq!(format_money(dec!(80), "$"), "$80.00");
        assert_eq!(format_money(dec!(999.999), "$"), "$1,000.00");
        assert_eq!(format_money(dec!(0), "€"), "€0.00");
    }

    #[test]
    fn negative_money_puts_sign_first() {
        assert_eq!(format_money(dec!(-10000), "$"), "-$10,000.00");
    }

    #[test]
    fn signed_money() {
        assert_eq!(format_signed_money(dec!(20), "$"), "+$20.00");
        assert_eq!(format_signed_money(dec!(-10), "$"), "-$10.00");
    }

    #[test]
    fn percent_and_quantity() {
        assert_eq!(format_percent(dec!(0.0533)), "5.3%");
        assert_eq!(format_percent(dec!(2)), "200.0%");
        assert_eq!(format_quantity(dec!(2.500)), "2.5");
    }

    #[test]
    fn percent_saturates_instead_of_overflowing() {
        assert_eq!(format_percent(dec!(99.99)), "9999.0%");
        assert_eq!(format_percent(dec!(100)), ">9999%");
        assert_eq!(format_percent(Decimal::MAX), ">9999%");
        assert_eq!(format_percent(Decimal::MIN), "<-9999%");
    }
}
