use rust_decimal::Decimal;

/// Formats an amount with two decimals and thousands separators, sign in
/// front of the symbol: `-$1,234.50`.
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    let sign = if amount < Decimal::ZERO { "-" } else { "" };
    format!("{}{}{}", sign, symbol, group_thousands(amount.abs().round_dp(2)))
}

/// Like `format_money` but always signed, for gains.
pub fn format_signed_money(amount: Decimal, symbol: &str) -> String {
    if amount >= Decimal::ZERO {
        format!("+{}", format_money(amount, symbol))
    } else {
        format_money(amount, symbol)
    }
}

const PERCENT_CAP: Decimal = Decimal::from_parts(9999, 0, 0, false, 0);

/// Ratio as a percentage with one decimal. Values beyond 9999% are shown
/// saturated, since the ratio is unclamped and can reach `Decimal::MAX`.
pub fn format_percent(ratio: Decimal) -> String {
    match ratio.checked_mul(Decimal::ONE_HUNDRED) {
        Some(percent) if percent.abs() <= PERCENT_CAP => {
            format!("{:.1}%", percent.round_dp(1))
        }
        _ if ratio.is_sign_negative() => format!("<-{}%", PERCENT_CAP),
        _ => format!(">{}%", PERCENT_CAP),
    }
}

pub fn format_quantity(quantity: Decimal) -> String {
    quantity.normalize().to_string()
}

fn group_thousands(amount: Decimal) -> String {
    let formatted = format!("{:.2}", amount);
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, digit) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}.{}", grouped, frac_part)
}
