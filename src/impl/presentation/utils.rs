use iso_currency::Currency;
use num_format::{Locale, ToFormattedString as _};

use crate::domain::logic::utils::to_cents;

pub(crate) const LINE_WIDTH: usize = 48;

/// Standard number decimal places for the given currency
/// (ex. JPY = 0, USD = 2).
fn decimal_places(currency: Currency) -> u32 {
    currency.exponent().unwrap_or(0) as u32
}

/// Format cash amount with leading currency symbol, correct number of decimal
/// places and thousands separators (ex. `$1,234.50`, `-$3.05`).
///
/// Always uses the en locale ('.' as decimal mark, ',' between thousands),
/// regardless of the currency.
pub(crate) fn format_amount(amount: f64, currency: Currency) -> String {
    let places = decimal_places(currency);
    let minor_units = if places == 2 {
        to_cents(amount)
    } else {
        (amount * 10f64.powi(places as i32)).round() as i64
    };
    let sign = if minor_units < 0 { "-" } else { "" };
    let minor_units = minor_units.unsigned_abs();
    let scale = 10u64.pow(places);
    let integer_part = (minor_units / scale).to_formatted_string(&Locale::en);
    if places == 0 {
        format!("{sign}{}{integer_part}", currency.symbol())
    } else {
        format!(
            "{sign}{}{integer_part}.{:0width$}",
            currency.symbol(),
            minor_units % scale,
            width = places as usize,
        )
    }
}

/// Section header padded with dashes to the line width
/// (ex. `--- Items ------...`).
pub(crate) fn section_header(title: &str) -> String {
    let head = format!("--- {title} ");
    let pad = LINE_WIDTH.saturating_sub(head.chars().count());
    format!("{head}{}", "-".repeat(pad))
}

/// Label on the left, value right-aligned to the line width.
pub(crate) fn label_value(label: &str, value: &str) -> String {
    let width = LINE_WIDTH.saturating_sub(label.chars().count());
    format!("{label}{value:>width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_two_decimal_currency() {
        assert_eq!(format_amount(89.47, Currency::USD), "$89.47");
        assert_eq!(format_amount(1234.5, Currency::USD), "$1,234.50");
        assert_eq!(format_amount(0.0, Currency::USD), "$0.00");
        assert_eq!(format_amount(-3.05, Currency::USD), "-$3.05");
    }

    #[test]
    fn formats_zero_decimal_currency() {
        assert_eq!(
            format_amount(1200.4, Currency::JPY),
            format!("{}1,200", Currency::JPY.symbol())
        );
    }

    #[test]
    fn pads_to_line_width() {
        assert_eq!(section_header("Items").chars().count(), LINE_WIDTH);
        let line = label_value("Total", "$10.00");
        assert_eq!(line.chars().count(), LINE_WIDTH);
        assert!(line.starts_with("Total ") && line.ends_with("$10.00"));
    }
}
