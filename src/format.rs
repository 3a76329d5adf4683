//! Display formatting for prices, percentages and large numbers
//!
//! Output follows en-US conventions: comma thousands separators, a leading
//! minus sign and the currency symbol in front.

use crate::types::Currency;
use rust_decimal::{Decimal, RoundingStrategy};

/// Minimum fraction digits shown for a price
const MIN_FRACTION_DIGITS: usize = 2;

/// Maximum fraction digits shown for a price
const MAX_FRACTION_DIGITS: u32 = 6;

/// Compact notation suffixes, largest first
const COMPACT_UNITS: &[(u32, &str)] = &[(12, "T"), (9, "B"), (6, "M"), (3, "K")];

/// Symbol prefix for a currency, falling back to its uppercase code
pub fn currency_symbol(currency: &Currency) -> String {
    match currency.code() {
        "usd" => "$".to_string(),
        "eur" => "€".to_string(),
        "gbp" => "£".to_string(),
        "jpy" => "¥".to_string(),
        "inr" => "₹".to_string(),
        "krw" => "₩".to_string(),
        _ => format!("{} ", currency.display_code()),
    }
}

/// Formats a monetary value, e.g. `$50,000.00` or `$0.000025`
pub fn format_currency(value: Decimal, currency: &Currency) -> String {
    let rounded = value
        .abs()
        .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    let digits = rounded.to_string();
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

    let mut fraction = frac_part.to_string();
    while fraction.len() < MIN_FRACTION_DIGITS {
        fraction.push('0');
    }

    let sign = if value.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!(
        "{}{}{}.{}",
        sign,
        currency_symbol(currency),
        group_thousands(int_part),
        fraction
    )
}

/// Formats an `f64` price; non-finite values render as "n/a"
pub fn format_currency_f64(value: f64, currency: &Currency) -> String {
    match Decimal::try_from(value) {
        Ok(decimal) => format_currency(decimal, currency),
        Err(_) => "n/a".to_string(),
    }
}

/// Formats a percentage with two decimals, e.g. `2.50%`
pub fn format_percent(value: Option<Decimal>) -> String {
    let Some(value) = value else {
        return "n/a".to_string();
    };

    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(2);
    format!("{}%", rounded)
}

/// Short human notation, e.g. `1.2K`, `350M`, `1.1T`
pub fn format_compact(value: Decimal) -> String {
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    let magnitude = value.abs();

    let mut unit_index = COMPACT_UNITS
        .iter()
        .position(|(exp, _)| magnitude >= Decimal::from(10u64.pow(*exp)))
        .unwrap_or(COMPACT_UNITS.len());

    loop {
        let (scaled, suffix) = match COMPACT_UNITS.get(unit_index) {
            Some((exp, suffix)) => (magnitude / Decimal::from(10u64.pow(*exp)), *suffix),
            None => (magnitude, ""),
        };

        let dp = if scaled < Decimal::TEN { 1 } else { 0 };
        let rounded = scaled
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
            .normalize();

        // 999_950 rounds to "1000K"; promote to the next unit instead
        if rounded >= Decimal::ONE_THOUSAND && unit_index > 0 {
            unit_index -= 1;
            continue;
        }

        return format!("{}{}{}", sign, rounded, suffix);
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn usd() -> Currency {
        Currency::usd()
    }

    #[test]
    fn test_format_currency_usd() {
        assert_eq!(format_currency(dec!(50000), &usd()), "$50,000.00");
        assert_eq!(format_currency(dec!(1234567.891), &usd()), "$1,234,567.891");
        assert_eq!(format_currency(dec!(0.000025), &usd()), "$0.000025");
        assert_eq!(format_currency(dec!(0.12345678), &usd()), "$0.123457");
        assert_eq!(format_currency(dec!(999), &usd()), "$999.00");
        assert_eq!(format_currency(dec!(0), &usd()), "$0.00");
    }

    #[test]
    fn test_format_currency_negative_and_other_codes() {
        assert_eq!(format_currency(dec!(-12.5), &usd()), "-$12.50");
        assert_eq!(format_currency(dec!(-0.0000001), &usd()), "$0.00");

        let eur = Currency::new("eur").unwrap();
        assert_eq!(format_currency(dec!(1000), &eur), "€1,000.00");

        let btc = Currency::new("btc").unwrap();
        assert_eq!(format_currency(dec!(1.5), &btc), "BTC 1.50");
    }

    #[test]
    fn test_format_currency_f64() {
        assert_eq!(format_currency_f64(43210.5, &usd()), "$43,210.50");
        assert_eq!(format_currency_f64(f64::NAN, &usd()), "n/a");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(Some(dec!(2.5))), "2.50%");
        assert_eq!(format_percent(Some(dec!(-3.14159))), "-3.14%");
        assert_eq!(format_percent(Some(dec!(-0.001))), "0.00%");
        assert_eq!(format_percent(Some(dec!(7))), "7.00%");
        assert_eq!(format_percent(None), "n/a");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(dec!(999)), "999");
        assert_eq!(format_compact(dec!(1.234)), "1.2");
        assert_eq!(format_compact(dec!(1234)), "1.2K");
        assert_eq!(format_compact(dec!(12345)), "12K");
        assert_eq!(format_compact(dec!(350000000)), "350M");
        assert_eq!(format_compact(dec!(1050000000)), "1.1B");
        assert_eq!(format_compact(dec!(1200000000000)), "1.2T");
        assert_eq!(format_compact(dec!(999950)), "1M");
        assert_eq!(format_compact(dec!(-2500)), "-2.5K");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("123456789"), "123,456,789");
    }
}
