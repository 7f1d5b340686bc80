//! Lexical encodings shared by the byte serializer and the syntax writer

use std::fmt::Write;

/// Formats a real with at most six decimals and no trailing zeros.
pub(crate) fn format_real(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let text = format!("{value:.6}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn is_delimiter(byte: u8) -> bool {
    matches!(
        byte,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

/// Name token text, solidus included; anything outside the regular
/// printable range is written as `#xx`.
pub(crate) fn encode_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);
    out.push('/');
    for &byte in name.as_bytes() {
        if (b'!'..=b'~').contains(&byte) && byte != b'#' && !is_delimiter(byte) {
            out.push(byte as char);
        } else {
            let _ = write!(out, "#{byte:02X}");
        }
    }
    out
}

/// Literal string token text, parentheses included.
pub(crate) fn encode_literal_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('(');
    for &byte in bytes {
        match byte {
            b'(' => out.push_str("\\("),
            b')' => out.push_str("\\)"),
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7E => out.push(byte as char),
            _ => {
                let _ = write!(out, "\\{byte:03o}");
            }
        }
    }
    out.push(')');
    out
}

/// Hexadecimal string token text, angle brackets included.
pub(crate) fn encode_hex_string(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2 + 2);
    out.push('<');
    for byte in bytes {
        let _ = write!(out, "{byte:02X}");
    }
    out.push('>');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_real() {
        assert_eq!(format_real(1.5), "1.5");
        assert_eq!(format_real(10.0), "10");
        assert_eq!(format_real(0.0), "0");
        assert_eq!(format_real(-0.0), "0");
        assert_eq!(format_real(0.1234567), "0.123457");
        assert_eq!(format_real(-2.25), "-2.25");
        assert_eq!(format_real(f64::NAN), "0");
    }

    #[test]
    fn test_encode_name() {
        assert_eq!(encode_name("Type"), "/Type");
        assert_eq!(encode_name("A B"), "/A#20B");
        assert_eq!(encode_name("a/b#c"), "/a#2Fb#23c");
        assert_eq!(encode_name(""), "/");
        assert_eq!(encode_name("é"), "/#C3#A9");
    }

    #[test]
    fn test_encode_literal_string() {
        assert_eq!(encode_literal_string(b"Hello"), "(Hello)");
        assert_eq!(encode_literal_string(b"a(b)c\\"), "(a\\(b\\)c\\\\)");
        assert_eq!(encode_literal_string(b"line\n"), "(line\\n)");
        assert_eq!(encode_literal_string(&[0x00, 0xFF]), "(\\000\\377)");
    }

    #[test]
    fn test_encode_hex_string() {
        assert_eq!(encode_hex_string(&[0x0A, 0xBC]), "<0ABC>");
        assert_eq!(encode_hex_string(&[]), "<>");
    }
}
