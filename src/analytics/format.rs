//! Number formatting for dashboard display

/// Insert a `,` between every group of three digits, counting from the right.
///
/// Works on the decimal representation of a non-negative integer; callers
/// split off any sign or fractional part first (see [`format_amount`]).
pub fn format_with_thousands_separator(n: u64) -> String {
    group_digits(&n.to_string())
}

/// Format an arbitrary amount with grouped integer digits.
///
/// Whole values print without decimals, anything with a fractional part
/// prints with two. Non-finite values print as `0`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let negative = value < 0.0;
    let rendered = if value.fract() == 0.0 {
        format!("{:.0}", value.abs())
    } else {
        format!("{:.2}", value.abs())
    };

    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (rendered.as_str(), None),
    };

    let mut out = String::with_capacity(rendered.len() + rendered.len() / 3 + 1);
    if negative && rendered.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Signed growth label used by the sample-data statistics.
///
/// A zero `previous` always reads `+100.00`; otherwise the signed growth with
/// two decimals, with `+` only for non-negative values.
pub fn signed_growth_label(current: f64, previous: f64) -> String {
    if previous == 0.0 {
        return "+100.00".to_string();
    }
    let growth = (current - previous) / previous * 100.0;
    if growth >= 0.0 {
        format!("+{:.2}", growth)
    } else {
        format!("{:.2}", growth)
    }
}

/// Format sales given in thousands of rupees, e.g. `₹22.89k`
pub fn format_sales_thousands(value: f64) -> String {
    format!("₹{:.2}k", value)
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_separator() {
        assert_eq!(format_with_thousands_separator(1_234_567), "1,234,567");
        assert_eq!(format_with_thousands_separator(12), "12");
        assert_eq!(format_with_thousands_separator(0), "0");
        assert_eq!(format_with_thousands_separator(999), "999");
        assert_eq!(format_with_thousands_separator(1_000), "1,000");
        assert_eq!(format_with_thousands_separator(123_456), "123,456");
        assert_eq!(
            format_with_thousands_separator(u64::MAX),
            "18,446,744,073,709,551,615"
        );
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(2_547_890.0), "2,547,890");
        assert_eq!(format_amount(1234.5), "1,234.50");
        assert_eq!(format_amount(-9_876_543.21), "-9,876,543.21");
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(-0.001), "0.00");
        assert_eq!(format_amount(f64::NAN), "0");
    }

    #[test]
    fn test_signed_growth_label() {
        assert_eq!(signed_growth_label(185_000.0, 165_000.0), "+12.12");
        assert_eq!(signed_growth_label(50.0, 100.0), "-50.00");
        assert_eq!(signed_growth_label(100.0, 100.0), "+0.00");
        assert_eq!(signed_growth_label(0.0, 0.0), "+100.00");
    }

    #[test]
    fn test_format_sales() {
        assert_eq!(format_sales_thousands(22.89), "₹22.89k");
        assert_eq!(format_sales_thousands(412.84), "₹412.84k");
    }
}
