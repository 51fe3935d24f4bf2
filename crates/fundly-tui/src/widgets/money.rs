//! Monetary amount formatting for tables and detail panes.

/// Format an amount with two decimals and thousands separators,
/// e.g. `1234567.5` → `"1 234 567.50"`.
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac:02}")
}

/// Format a signed amount with an explicit `+`/`-` prefix.
pub fn format_signed(amount: f64) -> String {
    if amount >= 0.0 {
        format!("+{}", format_amount(amount))
    } else {
        format_amount(amount)
    }
}

/// Render a server-side percentage (already 0-100) for display.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_small_amounts() {
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(50.0), "50.00");
        assert_eq!(format_amount(7.5), "7.50");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_amount(1234.0), "1 234.00");
        assert_eq!(format_amount(1_234_567.5), "1 234 567.50");
    }

    #[test]
    fn negative_amounts_keep_the_sign() {
        assert_eq!(format_amount(-42.25), "-42.25");
        assert_eq!(format_signed(-42.25), "-42.25");
    }

    #[test]
    fn signed_formatting_adds_plus() {
        assert_eq!(format_signed(10.0), "+10.00");
    }

    #[test]
    fn rounds_to_cents() {
        assert_eq!(format_amount(0.005), "0.01");
        assert_eq!(format_amount(99.999), "100.00");
    }

    #[test]
    fn percent_renders_one_decimal() {
        assert_eq!(format_percent(60.25), "60.2%");
        assert_eq!(format_percent(100.0), "100.0%");
    }
}
