// surtax-core/src/domain/format.rs
//
// Human-facing number formatting shared by concern details, compliance
// metrics and rendered reports.

/// Groups the integer part of a rounded amount with commas: `20000.4` -> `"20,000"`.
pub fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0" after rounding a tiny negative is just "0"
    if grouped == "0" {
        return grouped;
    }
    format!("{}{}", sign, grouped)
}

/// `$1,234,567`
pub fn currency_full(value: f64) -> String {
    format!("${}", group_thousands(value))
}

/// `$1.2M`, `$150K`, `$950`
pub fn currency_compact(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("${:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("${}K", group_thousands(value / 1_000.0))
    } else {
        currency_full(value)
    }
}

pub fn percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// First `max_chars` characters, never splitting a UTF-8 sequence.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(20_000.0), "20,000");
        assert_eq!(group_thousands(1_234_567.4), "1,234,567");
        assert_eq!(group_thousands(-45_000.0), "-45,000");
        assert_eq!(group_thousands(-0.2), "0");
    }

    #[test]
    fn test_currency_formats() {
        assert_eq!(currency_full(20_000.0), "$20,000");
        assert_eq!(currency_compact(2_460_000.0), "$2.5M");
        assert_eq!(currency_compact(150_000.0), "$150K");
        assert_eq!(currency_compact(950.0), "$950");
        assert_eq!(percentage(12.345), "12.3%");
    }

    #[test]
    fn test_truncate_chars_is_utf8_safe() {
        assert_eq!(truncate_chars("short", 40), "short");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("écoles élémentaires", 6), "écoles");
    }
}
