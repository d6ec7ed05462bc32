//! Free functions over raw RUT text.
//!
//! All functions accept arbitrary user input. None of them fail on malformed text except
//! [`check_digit`], which requires an already-extracted body.

use crate::{RutError, RutResult};

/// Weights applied to the body digits, least significant first.
const WEIGHTS: [u64; 6] = [2, 3, 4, 5, 6, 7];

/// Strips every character that is not a decimal digit or `K`/`k`.
///
/// Case is preserved; callers that need the canonical form should use [`normalize`].
pub fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, 'K' | 'k'))
        .collect()
}

/// Computes the check character for a body of decimal digits.
///
/// # Errors
///
/// Returns [`RutError::InvalidBody`] if `body` is empty or contains anything other than ASCII
/// decimal digits.
pub fn check_digit(body: &str) -> RutResult<char> {
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RutError::InvalidBody(body.to_string()));
    }
    Ok(weighted_check(body))
}

/// Cleans and uppercases `raw`, rewriting a legacy trailing `0` to `K` where `K` is expected.
///
/// Input that cannot be split into a numeric body and a check character is returned cleaned
/// and uppercased but otherwise untouched.
pub fn normalize(raw: &str) -> String {
    let cleaned = clean(raw).to_ascii_uppercase();
    match split(&cleaned) {
        Some((body, check)) => {
            let check = tolerate_legacy_zero(check, weighted_check(body));
            format!("{body}{check}")
        }
        None => cleaned,
    }
}

/// Renders `raw` in display form, e.g. `12.345.678-5`.
///
/// Unsplittable input is returned in its normalised form.
pub fn format(raw: &str) -> String {
    let normalized = normalize(raw);
    match split(&normalized) {
        Some((body, check)) => format!("{}-{}", group_thousands(body), check),
        None => normalized,
    }
}

/// Returns true if the stored check character matches the computed one.
///
/// A stored `0` is accepted where `K` is expected; a stored `K` is not accepted where `0` is
/// expected.
pub fn is_valid(raw: &str) -> bool {
    let normalized = normalize(raw);
    match split(&normalized) {
        Some((body, check)) => {
            let expected = weighted_check(body);
            tolerate_legacy_zero(check, expected) == expected
        }
        None => false,
    }
}

/// Splits canonical text into body and check character.
///
/// Returns `None` unless there are at least two characters and everything before the last one
/// is a decimal digit.
pub(crate) fn split(canonical: &str) -> Option<(&str, char)> {
    let mut chars = canonical.chars();
    let check = chars.next_back()?;
    let body = chars.as_str();
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((body, check))
}

/// Weighted modulo-11 checksum. `body` must be ASCII digits.
pub(crate) fn weighted_check(body: &str) -> char {
    let remainder = body
        .bytes()
        .rev()
        .zip(WEIGHTS.iter().cycle())
        .fold(0u64, |acc, (digit, weight)| {
            (acc + u64::from(digit - b'0') * weight) % 11
        });

    match remainder {
        0 => '0',
        1 => 'K',
        r => char::from(b'0' + (11 - r) as u8),
    }
}

fn tolerate_legacy_zero(found: char, expected: char) -> char {
    if found == '0' && expected == 'K' {
        'K'
    } else {
        found
    }
}

fn group_thousands(body: &str) -> String {
    let len = body.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, digit) in body.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}
