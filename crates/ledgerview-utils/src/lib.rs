//! Utility functions and helpers

/// Group the digits of an unsigned integer string with `separator`
pub fn format_number(digits: &str, separator: &str) -> String {
    let mut result = String::new();
    let len = digits.chars().count();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push_str(separator);
        }
        result.push(c);
    }
    result
}

/// Format a plain decimal string (e.g. "-1234.50") with custom separators
pub fn format_amount(value: &str, thousands_separator: &str, decimal_separator: &str) -> String {
    let (sign, unsigned) = match value.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", value),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut result = String::from(sign);
    result.push_str(&format_number(int_part, thousands_separator));
    if let Some(frac) = frac_part {
        result.push_str(decimal_separator);
        result.push_str(frac);
    }
    result
}

/// Escape text for inclusion in HTML element content or a quoted attribute
pub fn escape_html(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number("0", ","), "0");
        assert_eq!(format_number("999", ","), "999");
        assert_eq!(format_number("1000", ","), "1,000");
        assert_eq!(format_number("1234567", " "), "1 234 567");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount("1234.50", " ", "."), "1 234.50");
        assert_eq!(format_amount("-1234567.5", ",", "."), "-1,234,567.5");
        assert_eq!(format_amount("12", " ", ","), "12");
        assert_eq!(format_amount("0.99", " ", ","), "0,99");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Coffee & cake"), "Coffee &amp; cake");
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape_html("Зарплата"), "Зарплата");
    }
}
