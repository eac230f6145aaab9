#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::{
        app::normalize::{coerce_decimal, defaulted_cells, normalize_holding, normalize_holdings, normalize_ticker},
        models::{Coerced, RawHolding},
    };

    #[test]
    fn strips_currency_symbols_and_separators() {
        assert_eq!(coerce_decimal("$1,200"), Coerced::Parsed(dec!(1200)));
        assert_eq!(coerce_decimal(" $1,200.50 "), Coerced::Parsed(dec!(1200.50)));
        assert_eq!(coerce_decimal("0.00045"), Coerced::Parsed(dec!(0.00045)));
        assert_eq!(coerce_decimal("1e3"), Coerced::Parsed(dec!(1000)));
    }

    #[test]
    fn malformed_cells_default_to_zero() {
        for raw in ["abc", "", "   ", "$", "12abc", "1.2.3"] {
            let coerced = coerce_decimal(raw);
            assert!(coerced.is_defaulted(), "{:?} should default", raw);
            assert_eq!(coerced.value(), dec!(0));
        }
        assert_eq!(
            coerce_decimal("abc"),
            Coerced::Defaulted {
                raw: "abc".to_string()
            }
        );
    }

    #[test]
    fn negative_numbers_default_to_zero() {
        assert!(coerce_decimal("-5").is_defaulted());
        assert!(coerce_decimal("-$1,000").is_defaulted());
    }

    #[test]
    fn tickers_are_trimmed_and_uppercased() {
        assert_eq!(normalize_ticker("  btc-usd "), "BTC-USD");
        assert_eq!(normalize_ticker("AAPL"), "AAPL");
        assert_eq!(normalize_ticker("   "), "");
    }

    #[test]
    fn blank_asset_name_falls_back_to_ticker() {
        let holding = normalize_holding(&RawHolding::new(
            " ".to_string(),
            " eth-usd".to_string(),
            "0.5".to_string(),
            "$2,000".to_string(),
        ));

        assert_eq!(holding.asset_name(), "ETH-USD");
        assert_eq!(holding.ticker(), "ETH-USD");
        assert_eq!(holding.quantity().value(), dec!(0.5));
        assert_eq!(holding.purchase_price().value(), dec!(2000));
    }

    #[test]
    fn counts_defaulted_cells_across_rows() {
        let rows = vec![
            RawHolding::new("A".into(), "A".into(), "abc".into(), "10".into()),
            RawHolding::new("B".into(), "B".into(), "".into(), "".into()),
            RawHolding::new("C".into(), "C".into(), "1".into(), "$5".into()),
        ];

        assert_eq!(defaulted_cells(&normalize_holdings(&rows)), 3);
    }
}
