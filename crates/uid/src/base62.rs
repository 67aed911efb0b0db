//! Little-endian base-62 rendering of 64-bit resource identifiers.
//!
//! The alphabet assigns `A`–`Z` the values 0–25, `a`–`z` 26–51 and `0`–`9`
//! 52–61. Encoding is little-endian: the first character of the output is the
//! *least* significant digit, so `encode(62)` is `"AB"`, not `"BA"`. Decoding
//! therefore walks the input backwards.

use crate::error::{ErrorKind, Result};
use exn::OptionExt;

const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const BASE: u64 = 62;

/// Encode a 64-bit identifier as little-endian base-62 text.
///
/// Zero encodes as `"A"`; there is no sign and no padding.
///
/// # Examples
///
/// ```
/// assert_eq!(theke_uid::encode(0), "A");
/// assert_eq!(theke_uid::encode(61), "9");
/// assert_eq!(theke_uid::encode(62), "AB");
/// ```
pub fn encode(mut value: u64) -> String {
    let mut out = String::new();
    loop {
        out.push(ALPHABET[(value % BASE) as usize] as char);
        value /= BASE;
        if value == 0 {
            break;
        }
    }
    out
}

/// Decode little-endian base-62 text back into a 64-bit identifier.
///
/// Digits are read most-significant-first, i.e. from the end of the string
/// backwards, mirroring [`encode`]. The empty string decodes to `0`.
///
/// # Errors
///
/// [`ErrorKind::InvalidDigit`] for any character outside the alphabet,
/// [`ErrorKind::Overflow`] if the value wraps past 64 bits.
pub fn decode(text: &str) -> Result<u64> {
    let mut acc: u64 = 0;
    for ch in text.chars().rev() {
        let digit = digit_value(ch).ok_or_raise(|| ErrorKind::InvalidDigit(ch))?;
        acc = acc
            .checked_mul(BASE)
            .and_then(|acc| acc.checked_add(digit))
            .ok_or_raise(|| ErrorKind::Overflow)?;
    }
    Ok(acc)
}

fn digit_value(ch: char) -> Option<u64> {
    match ch {
        'A'..='Z' => Some(ch as u64 - 'A' as u64),
        'a'..='z' => Some(ch as u64 - 'a' as u64 + 26),
        '0'..='9' => Some(ch as u64 - '0' as u64 + 52),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "A")]
    #[case(25, "Z")]
    #[case(26, "a")]
    #[case(51, "z")]
    #[case(52, "0")]
    #[case(61, "9")]
    #[case(62, "AB")]
    #[case(63, "BB")]
    #[case(62 * 62, "AAB")]
    fn encode_known_values(#[case] value: u64, #[case] expected: &str) {
        assert_eq!(encode(value), expected);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(61)]
    #[case(62)]
    #[case(4_096)]
    #[case(123_456_789)]
    #[case(u64::MAX)]
    fn round_trip(#[case] value: u64) {
        assert_eq!(decode(&encode(value)).unwrap(), value);
    }

    #[test]
    fn empty_decodes_to_zero() {
        assert_eq!(decode("").unwrap(), 0);
    }

    #[rstest]
    #[case("12 ab", ' ')]
    #[case("-B", '-')]
    #[case("αβ", 'β')]
    fn invalid_digit(#[case] input: &str, #[case] offender: char) {
        let err = decode(input).unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidDigit(offender));
    }

    #[test]
    fn overflow_is_detected() {
        // u64::MAX is 11 base-62 digits; 12 digits always overflow.
        let err = decode("999999999999").unwrap_err();
        assert_eq!(*err, ErrorKind::Overflow);
    }

    #[test]
    fn leading_zero_digits_are_harmless() {
        // "BA" read backwards is A (msd, value 0) then B: same value as "B".
        assert_eq!(decode("BA").unwrap(), decode("B").unwrap());
    }
}
