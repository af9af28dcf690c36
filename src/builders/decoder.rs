//! Lenient conversion of raw spec tokens into typed values.
//!
//! Spec files are edited by hand, so decoding never fails: a token that
//! cannot be read as the requested type decodes to that type's zero value
//! (`0`, `0.0`, `false`). The free functions do the actual work and the
//! [`SpecValue`] trait lets the store pick one by type.

/// A scalar type that can be decoded from one raw spec token.
pub trait SpecValue: Sized {
    /// Decodes `token`. Never fails; unparsable input gives a default.
    fn decode(token: &str) -> Self;
}

impl SpecValue for i64 {
    fn decode(token: &str) -> Self {
        decode_int(token)
    }
}

impl SpecValue for i32 {
    fn decode(token: &str) -> Self {
        // Keep the low 32 bits, as a C `long` -> `int32_t` cast would.
        decode_int(token) as i32
    }
}

impl SpecValue for f64 {
    fn decode(token: &str) -> Self {
        decode_float(token)
    }
}

impl SpecValue for bool {
    fn decode(token: &str) -> Self {
        decode_bool(token)
    }
}

impl SpecValue for String {
    fn decode(token: &str) -> Self {
        token.to_string()
    }
}

/// A typed view of a whole value list.
///
/// Scalars take the first value. Tuples of up to nine [`SpecValue`] fields
/// take the values positionally, so `(String, i32, bool)` reads fields 0, 1
/// and 2. A field past the end of the list is decoded from an empty string.
pub trait FromValues: Sized {
    fn from_values(values: &[String]) -> Self;
}

fn field(values: &[String], index: usize) -> &str {
    values.get(index).map_or("", String::as_str)
}

macro_rules! scalar_from_values {
    ($($ty:ty),*) => {
        $(
            impl FromValues for $ty {
                fn from_values(values: &[String]) -> Self {
                    <$ty as SpecValue>::decode(field(values, 0))
                }
            }
        )*
    };
}

scalar_from_values!(i32, i64, f64, bool, String);

macro_rules! tuple_from_values {
    ($(($($name:ident : $index:tt),+)),* $(,)?) => {
        $(
            impl<$($name: SpecValue),+> FromValues for ($($name,)+) {
                fn from_values(values: &[String]) -> Self {
                    ($($name::decode(field(values, $index)),)+)
                }
            }
        )*
    };
}

tuple_from_values!(
    (A: 0),
    (A: 0, B: 1),
    (A: 0, B: 1, C: 2),
    (A: 0, B: 1, C: 2, D: 3),
    (A: 0, B: 1, C: 2, D: 3, E: 4),
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5),
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6),
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7),
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8),
);

/// Decodes an integer token.
///
/// Underscores are digit-group separators and are removed first, so
/// `"3_000"` is `3000`. The base follows the usual literal prefixes: `0x`
/// or `0X` is hexadecimal, a leading `0` is octal, anything else is
/// decimal. Only the longest valid prefix is read (`"12abc"` is `12`), and
/// a token with no digits at all is `0`. Values beyond the `i64` range
/// saturate.
pub fn decode_int(token: &str) -> i64 {
    let cleaned: String = token.chars().filter(|&c| c != '_').collect();
    let s = cleaned.trim_start_matches([' ', '\t', '\n', '\r']);

    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if hex.starts_with(|c: char| c.is_ascii_hexdigit()) {
            (16, hex)
        } else {
            // "0x" with nothing after it reads as the "0" alone.
            (10, &s[..1])
        }
    } else if s.starts_with('0') {
        (8, s)
    } else {
        (10, s)
    };

    let mut value: i64 = 0;
    for c in digits.chars() {
        let Some(digit) = c.to_digit(radix) else { break };
        let digit = i64::from(digit);
        value = if negative {
            value.saturating_mul(i64::from(radix)).saturating_sub(digit)
        } else {
            value.saturating_mul(i64::from(radix)).saturating_add(digit)
        };
    }
    value
}

/// Decodes a floating-point token.
///
/// Underscores are removed as for integers. The longest leading prefix of
/// the form `[sign]digits[.digits][e[sign]digits]` is parsed. A `0x` prefix
/// reads hexadecimal digits with an optional hexadecimal fraction, and
/// `inf`, `infinity` and `nan` are recognised in any case. Anything else
/// decodes to `0.0`.
pub fn decode_float(token: &str) -> f64 {
    let cleaned: String = token.chars().filter(|&c| c != '_').collect();
    let s = cleaned.trim_start_matches([' ', '\t', '\n', '\r']);
    let bytes = s.as_bytes();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let negative = bytes.first() == Some(&b'-');
    let unsigned = &s[end..];
    if let Some(hex) = unsigned.strip_prefix("0x").or_else(|| unsigned.strip_prefix("0X"))
        && hex.starts_with(|c: char| c.is_ascii_hexdigit() || c == '.')
        && let Some(value) = decode_hex_float(hex)
    {
        return if negative { -value } else { value };
    }

    // Named values come before the numeric scan.
    let unsigned = unsigned.to_ascii_lowercase();
    for name in ["infinity", "inf", "nan"] {
        if unsigned.starts_with(name) {
            return s[..end + name.len()].parse().unwrap_or(0.0);
        }
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return 0.0;
    }

    // An exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}

/// Reads `digits[.digits]` in base 16. `None` when there are no digits.
fn decode_hex_float(hex: &str) -> Option<f64> {
    let mut value = 0.0;
    let mut scale = 1.0;
    let mut seen_digit = false;
    let mut in_fraction = false;

    for c in hex.chars() {
        if c == '.' && !in_fraction {
            in_fraction = true;
            continue;
        }
        let Some(digit) = c.to_digit(16) else { break };
        seen_digit = true;
        if in_fraction {
            scale /= 16.0;
            value += f64::from(digit) * scale;
        } else {
            value = value * 16.0 + f64::from(digit);
        }
    }

    seen_digit.then_some(value)
}

/// Decodes a boolean token.
///
/// A token starting with a digit `1`-`9` is true. Otherwise the whole token
/// is compared, ignoring ASCII case, with `true` and `on`. Everything else,
/// including `"0"` and the empty string, is false.
pub fn decode_bool(token: &str) -> bool {
    if matches!(token.as_bytes().first(), Some(b'1'..=b'9')) {
        return true;
    }
    token.eq_ignore_ascii_case("true") || token.eq_ignore_ascii_case("on")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_int_group_separators() {
        assert_eq!(decode_int("3_000"), 3000);
        assert_eq!(decode_int("1_000_000"), 1_000_000);
    }

    #[test]
    fn test_int_base_prefixes() {
        assert_eq!(decode_int("0x1F"), 31);
        assert_eq!(decode_int("0XfF"), 255);
        assert_eq!(decode_int("017"), 15);
        assert_eq!(decode_int("0"), 0);
        assert_eq!(decode_int("42"), 42);
        assert_eq!(decode_int("-0x10"), -16);
        assert_eq!(decode_int("+7"), 7);
    }

    #[test]
    fn test_int_reads_longest_prefix() {
        assert_eq!(decode_int("12abc"), 12);
        assert_eq!(decode_int("08"), 0);
        assert_eq!(decode_int("0x"), 0);
        assert_eq!(decode_int("0xg"), 0);
        assert_eq!(decode_int("  25"), 25);
    }

    #[test]
    fn test_int_unparsable_is_zero() {
        assert_eq!(decode_int("abc"), 0);
        assert_eq!(decode_int(""), 0);
        assert_eq!(decode_int("-"), 0);
    }

    #[test]
    fn test_int_saturates() {
        assert_eq!(decode_int("99999999999999999999999"), i64::MAX);
        assert_eq!(decode_int("-99999999999999999999999"), i64::MIN);
    }

    #[test]
    fn test_i32_keeps_low_bits() {
        assert_eq!(i32::decode("0x1_0000_0001"), 1);
        assert_eq!(i32::decode("-5"), -5);
    }

    #[test]
    fn test_float_prefixes() {
        assert_eq!(decode_float("1.5"), 1.5);
        assert_eq!(decode_float("-2.5e3"), -2500.0);
        assert_eq!(decode_float(".5"), 0.5);
        assert_eq!(decode_float("5."), 5.0);
        assert_eq!(decode_float("3_0"), 30.0);
        assert_eq!(decode_float("2.5volts"), 2.5);
        assert_eq!(decode_float("1e"), 1.0);
        assert_eq!(decode_float("1e+"), 1.0);
    }

    #[test]
    fn test_float_hex() {
        assert_eq!(decode_float("0x20"), 32.0);
        assert_eq!(decode_float("-0x1.8"), -1.5);
        assert_eq!(decode_float("0xg"), 0.0);
    }

    #[test]
    fn test_float_unparsable_is_zero() {
        assert_eq!(decode_float("abc"), 0.0);
        assert_eq!(decode_float(""), 0.0);
        assert_eq!(decode_float("."), 0.0);
        assert_eq!(decode_float("-"), 0.0);
    }

    #[test]
    fn test_float_named_values() {
        assert_eq!(decode_float("inf"), f64::INFINITY);
        assert_eq!(decode_float("-Infinity"), f64::NEG_INFINITY);
        assert!(decode_float("NaN").is_nan());
    }

    #[test]
    fn test_bool_values() {
        assert!(decode_bool("On"));
        assert!(decode_bool("TRUE"));
        assert!(decode_bool("5"));
        assert!(decode_bool("10"));
        assert!(!decode_bool("0"));
        assert!(!decode_bool("01"));
        assert!(!decode_bool(""));
        assert!(!decode_bool("yes"));
        assert!(!decode_bool("truest"));
    }

    #[test]
    fn test_string_is_identity() {
        assert_eq!(String::decode("Some Value"), "Some Value");
    }

    #[test]
    fn test_tuple_fields_are_positional() {
        let values = vec!["eth0".to_string(), "0x10".to_string(), "on".to_string()];
        let (name, port, enabled): (String, i32, bool) = FromValues::from_values(&values);
        assert_eq!(name, "eth0");
        assert_eq!(port, 16);
        assert!(enabled);
    }

    #[test]
    fn test_missing_fields_decode_from_empty() {
        let values = vec!["7".to_string()];
        let (a, b, c, d): (i32, f64, bool, String) = FromValues::from_values(&values);
        assert_eq!((a, b, c, d.as_str()), (7, 0.0, false, ""));
        assert_eq!(i64::from_values(&[]), 0);
    }

    #[test]
    fn test_nine_fields() {
        let values: Vec<String> = (1..=9).map(|n| n.to_string()).collect();
        let all: (i32, i32, i32, i32, i32, i32, i32, i32, i32) = FromValues::from_values(&values);
        assert_eq!(all, (1, 2, 3, 4, 5, 6, 7, 8, 9));
    }

    proptest! {
        #[test]
        fn prop_decimal_ints_round_trip(n in 1i64..i64::MAX) {
            prop_assert_eq!(decode_int(&n.to_string()), n);
            prop_assert_eq!(decode_int(&format!("-{n}")), -n);
        }

        #[test]
        fn prop_decoders_never_panic(token in ".*") {
            let _ = decode_int(&token);
            let _ = decode_float(&token);
            let _ = decode_bool(&token);
        }
    }
}
