//! Input masks for the simple free-text fields.
//!
//! These strip or normalise what the user typed; none of them reject input outright.

use chrono::NaiveDate;
use intake_types::EmailAddress;
use regex::Regex;
use std::sync::LazyLock;

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d{8,15}$").expect("phone pattern is valid"));

/// Date formats accepted for birth dates, tried in order.
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Keeps digits plus a single leading `+`.
pub fn normalize_phone(raw: &str) -> String {
    let trimmed = raw.trim_start();
    let mut normalized = String::with_capacity(trimmed.len());
    if trimmed.starts_with('+') {
        normalized.push('+');
    }
    normalized.extend(trimmed.chars().filter(char::is_ascii_digit));
    normalized
}

/// True if the normalised phone has 8 to 15 digits.
pub fn is_valid_phone(raw: &str) -> bool {
    PHONE_PATTERN.is_match(&normalize_phone(raw))
}

/// Trims and lower-cases an email address.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn is_valid_email(raw: &str) -> bool {
    EmailAddress::parse(raw).is_ok()
}

/// Parses an ISO `YYYY-MM-DD` date, also accepting `DD/MM/YYYY`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_keeps_digits_and_leading_plus() {
        assert_eq!(normalize_phone("+56 9 1234-5678"), "+56912345678");
        assert_eq!(normalize_phone("(2) 2345 6789"), "223456789");
        assert_eq!(normalize_phone("9+1"), "91");
        assert_eq!(normalize_phone(""), "");
    }

    #[test]
    fn phone_validity_checks_digit_count() {
        assert!(is_valid_phone("+56 9 1234 5678"));
        assert!(is_valid_phone("22345678"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("+"));
        assert!(!is_valid_phone("1234567890123456"));
    }

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Ana.Perez@Salud.CL "), "ana.perez@salud.cl");
        assert!(is_valid_email(" Ana.Perez@Salud.CL "));
        assert!(!is_valid_email("ana.perez"));
    }

    #[test]
    fn parse_date_accepts_iso_and_day_first() {
        let expected = NaiveDate::from_ymd_opt(1992, 3, 20);
        assert_eq!(parse_date("1992-03-20"), expected);
        assert_eq!(parse_date(" 20/03/1992 "), expected);
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("1992-02-30"), None);
        assert_eq!(parse_date("yesterday"), None);
    }
}
