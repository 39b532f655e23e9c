//! Number formatting for metric display: `1234567.891` → `1,234,567.89`.

/// Format with `decimals` fraction digits and `,` between thousands groups.
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value);
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted.as_str()),
    };
    let (integer_part, fraction) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match fraction {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Money amounts: two decimals, grouped.
pub fn format_money(value: f64) -> String {
    format_thousands(value, 2)
}

/// Whole counts, grouped.
pub fn format_count(value: usize) -> String {
    format_thousands(value as f64, 0)
}
