//! Engineering units and SI prefix handling.

/// Parse a SPICE-style value with optional SI suffix.
///
/// Supported suffixes (case-insensitive):
/// - T (tera, 1e12)
/// - G (giga, 1e9)
/// - MEG (mega, 1e6)
/// - K (kilo, 1e3)
/// - M (milli, 1e-3)
/// - U (micro, 1e-6)
/// - N (nano, 1e-9)
/// - P (pico, 1e-12)
/// - F (femto, 1e-15)
///
/// A trailing dimension letter after the suffix is ignored, so `10uF`,
/// `4.7KOhm`, and `100nH` all parse. Note SPICE semantics: `M` is milli,
/// `MEG` is mega, and a bare `F` is femto (not farads).
pub fn parse_value(s: &str) -> Option<f64> {
    let s = s.trim().to_uppercase();

    // Plain number first (also covers exponent forms like 1E-3).
    if let Ok(v) = s.parse::<f64>() {
        return Some(v);
    }

    // Find where the numeric part ends.
    let num_end = s
        .find(|c: char| !c.is_ascii_digit() && c != '.' && c != '-' && c != '+' && c != 'E')
        .unwrap_or(s.len());

    if num_end == 0 {
        return None;
    }

    let (num_str, suffix) = s.split_at(num_end);
    let value: f64 = num_str.parse().ok()?;

    if suffix.is_empty() {
        return Some(value);
    }
    if !suffix.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    // MEG must be checked before the single-letter M (milli).
    let multiplier = if suffix.starts_with("MEG") {
        1e6
    } else {
        match suffix.chars().next()? {
            'T' => 1e12,
            'G' => 1e9,
            'K' => 1e3,
            'M' => 1e-3,
            'U' => 1e-6,
            'N' => 1e-9,
            'P' => 1e-12,
            'F' => 1e-15,
            _ => return None,
        }
    };

    Some(value * multiplier)
}

/// Format a value with an engineering SI prefix.
pub fn format_value(value: f64) -> String {
    let abs_value = value.abs();

    let (scaled, suffix) = if abs_value >= 1e12 {
        (value / 1e12, "T")
    } else if abs_value >= 1e9 {
        (value / 1e9, "G")
    } else if abs_value >= 1e6 {
        (value / 1e6, "M")
    } else if abs_value >= 1e3 {
        (value / 1e3, "k")
    } else if abs_value >= 1.0 || abs_value == 0.0 {
        (value, "")
    } else if abs_value >= 1e-3 {
        (value * 1e3, "m")
    } else if abs_value >= 1e-6 {
        (value * 1e6, "u")
    } else if abs_value >= 1e-9 {
        (value * 1e9, "n")
    } else if abs_value >= 1e-12 {
        (value * 1e12, "p")
    } else if abs_value >= 1e-15 {
        (value * 1e15, "f")
    } else {
        (value, "")
    };

    format!("{:.4}{}", scaled, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|v| (v - b).abs() < b.abs() * 1e-10 + 1e-20)
    }

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(parse_value("1.5"), Some(1.5));
        assert_eq!(parse_value("-2.5"), Some(-2.5));
        assert_eq!(parse_value("1e-3"), Some(1e-3));
    }

    #[test]
    fn test_parse_with_suffix() {
        assert!(approx_eq(parse_value("1k"), 1e3));
        assert!(approx_eq(parse_value("4.7K"), 4.7e3));
        assert!(approx_eq(parse_value("10M"), 10e-3));
        assert!(approx_eq(parse_value("10MEG"), 10e6));
        assert!(approx_eq(parse_value("100n"), 100e-9));
        assert!(approx_eq(parse_value("1u"), 1e-6));
        assert!(approx_eq(parse_value("10p"), 10e-12));
        assert!(approx_eq(parse_value("2T"), 2e12));
        assert!(approx_eq(parse_value("3G"), 3e9));
        assert!(approx_eq(parse_value("5f"), 5e-15));
    }

    #[test]
    fn test_parse_trailing_dimension_letter() {
        assert!(approx_eq(parse_value("10uF"), 10e-6));
        assert!(approx_eq(parse_value("100nH"), 100e-9));
        assert!(approx_eq(parse_value("4.7KOhm"), 4.7e3));
        assert!(approx_eq(parse_value("1MEGOhm"), 1e6));
        // Bare F is femto, not farads.
        assert!(approx_eq(parse_value("10F"), 10e-15));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("1q"), None);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1000.0), "1.0000k");
        assert_eq!(format_value(0.001), "1.0000m");
        assert_eq!(format_value(1e-9), "1.0000n");
        assert_eq!(format_value(0.0), "0.0000");
    }
}
