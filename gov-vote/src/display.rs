//! Formatting of proposal values for display. Nothing here is used for
//! computation.

use chrono::{DateTime, Utc};

/// an f64 has at most 1074 fractional decimal digits
const EXACT_DIGITS: usize = 1074;

const UNITS: [(f64, &str); 7] = [
    (1e18, "E"),
    (1e15, "P"),
    (1e12, "T"),
    (1e9, "B"),
    (1e6, "M"),
    (1e3, "k"),
    (1.0, ""),
];

/// format a vote count with a metric suffix.
///
/// The value is scaled by the largest unit not greater than itself,
/// rounded to `precision` fractional digits, and trailing zero fractional
/// digits are dropped: `1500` with a precision of 1 is `1.5k`. Anything
/// below 1 is `0`.
///
/// Rounding works on the exact value of the scaled float, so `4350` is
/// `4.3k` (`4.35` is slightly below the half); exact ties round up.
pub fn format_count(value: f64, precision: usize) -> String {
    let (unit, symbol) = match UNITS.iter().find(|(unit, _)| value >= *unit) {
        Some(found) => *found,
        None => return "0".to_string(),
    };

    let mut digits = to_fixed(value / unit, precision);
    trim_fraction(&mut digits);
    digits.push_str(symbol);
    digits
}

/// quadratic tallies are fractional; shown with at most two decimals.
pub fn format_quadratic_score(score: f64) -> String {
    let mut digits = to_fixed(score, 2);
    trim_fraction(&mut digits);
    digits
}

/// `Oct 17, 2026 3:04 PM`, in UTC. `None` if the timestamp is out of the
/// representable range.
pub fn format_timestamp(unix_seconds: i64) -> Option<String> {
    let date = DateTime::<Utc>::from_timestamp(unix_seconds, 0)?;
    Some(date.format("%b %-d, %Y %-I:%M %p").to_string())
}

/// abbreviate an address for display: the first five characters, an
/// ellipsis, then the four characters that precede the last one.
///
/// Short values are returned as they are.
pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    let len = chars.len();
    if len <= 10 {
        return address.to_string();
    }
    let head: String = chars[..5].iter().collect();
    let tail: String = chars[len - 5..len - 1].iter().collect();
    format!("{}...{}", head, tail)
}

pub fn state_badge(state: &str) -> String {
    state.to_uppercase()
}

pub fn snapshot_link(explorer_block_url: &str, snapshot: &str) -> String {
    if explorer_block_url.ends_with('/') {
        format!("{}{}", explorer_block_url, snapshot)
    } else {
        format!("{}/{}", explorer_block_url, snapshot)
    }
}

/// `value` with `precision` fractional digits, nearest to its exact
/// decimal expansion. A tie goes away from zero.
fn to_fixed(value: f64, precision: usize) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    let exact = format!("{:.*}", EXACT_DIGITS, magnitude);
    let (integer, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    if fraction.len() != precision + 1 || !fraction.ends_with('5') {
        return format!("{}{:.*}", sign, precision, magnitude);
    }

    let mut digits = increment(&format!("{}{}", integer, &fraction[..precision]));
    if precision > 0 {
        digits.insert(digits.len() - precision, '.');
    }
    format!("{}{}", sign, digits)
}

/// add one to a string of decimal digits
fn increment(digits: &str) -> String {
    let mut bytes: Vec<u8> = digits.bytes().collect();
    let mut carry = true;
    for byte in bytes.iter_mut().rev() {
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            carry = false;
            break;
        }
    }

    let mut incremented = String::with_capacity(bytes.len() + 1);
    if carry {
        incremented.push('1');
    }
    incremented.extend(bytes.into_iter().map(char::from));
    incremented
}

fn trim_fraction(digits: &mut String) {
    if digits.contains('.') {
        let trimmed = digits.trim_end_matches('0').trim_end_matches('.').len();
        digits.truncate(trimmed);
    }
}
