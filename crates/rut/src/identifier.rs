//! The validated [`Rut`] type.

use crate::normalizer::{normalize, split, weighted_check};
use crate::{RutError, RutResult};
use std::{fmt, str::FromStr};

/// A RUT whose check character is known to match its body.
///
/// Once constructed, the body is one or more ASCII digits and the check character is the
/// computed one (`0`-`9` or `K`). A legacy `0` in place of an expected `K` is accepted on input
/// and stored as `K`.
///
/// # Display format
/// Displays in grouped form, e.g. `12.345.678-5`. Use [`Rut::canonical`] for storage.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rut {
    body: String,
    check: char,
}

impl Rut {
    /// Parses and validates free-form RUT text.
    ///
    /// Separators, whitespace and case are ignored.
    ///
    /// # Errors
    ///
    /// - [`RutError::Unsplittable`] if the text has no numeric body and check character.
    /// - [`RutError::CheckMismatch`] if the check character is wrong.
    pub fn parse(input: &str) -> RutResult<Self> {
        let normalized = normalize(input);
        let (body, check) =
            split(&normalized).ok_or_else(|| RutError::Unsplittable(input.to_string()))?;

        let expected = weighted_check(body);
        if check != expected {
            return Err(RutError::CheckMismatch {
                expected,
                found: check,
            });
        }

        Ok(Self {
            body: body.to_string(),
            check,
        })
    }

    /// Builds a RUT from a bare body, computing its check character.
    pub fn from_body(body: &str) -> RutResult<Self> {
        let check = crate::check_digit(body)?;
        Ok(Self {
            body: body.to_string(),
            check,
        })
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn check(&self) -> char {
        self.check
    }

    /// Returns body and check character with no separators, e.g. `123456785`.
    pub fn canonical(&self) -> String {
        format!("{}{}", self.body, self.check)
    }

    /// Rough issuance period for eight-digit bodies.
    ///
    /// Returns `None` for any other body length. Advisory only.
    pub fn issuance_band(&self) -> Option<IssuanceBand> {
        if self.body.len() != 8 {
            return None;
        }
        let value: u32 = self.body.parse().ok()?;
        Some(IssuanceBand::from_body_value(value))
    }
}

impl fmt::Display for Rut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format(&self.canonical()))
    }
}

impl FromStr for Rut {
    type Err = RutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rut::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Rut {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.canonical())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Rut {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Rut::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Approximate issuance period inferred from the numeric body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IssuanceBand {
    /// Body below 5,000,000.
    VeryOld,
    /// Body below 8,000,000.
    Older,
    /// Body below 12,000,000.
    Modern,
    /// Body below 18,000,000.
    Recent,
    /// Body below 25,000,000.
    VeryRecent,
    /// Anything higher; commonly test data.
    LikelyTest,
}

impl IssuanceBand {
    fn from_body_value(value: u32) -> Self {
        match value {
            0..=4_999_999 => IssuanceBand::VeryOld,
            5_000_000..=7_999_999 => IssuanceBand::Older,
            8_000_000..=11_999_999 => IssuanceBand::Modern,
            12_000_000..=17_999_999 => IssuanceBand::Recent,
            18_000_000..=24_999_999 => IssuanceBand::VeryRecent,
            _ => IssuanceBand::LikelyTest,
        }
    }

    /// True for bands that should be checked against official records.
    pub fn needs_review(self) -> bool {
        matches!(
            self,
            IssuanceBand::VeryOld | IssuanceBand::VeryRecent | IssuanceBand::LikelyTest
        )
    }
}

impl fmt::Display for IssuanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IssuanceBand::VeryOld => "RUT muy antiguo - verificar con registros oficiales",
            IssuanceBand::Older => "RUT de generación anterior - comúnmente válido",
            IssuanceBand::Modern => "RUT de generación moderna - muy probable válido",
            IssuanceBand::Recent => "RUT reciente - probablemente válido",
            IssuanceBand::VeryRecent => "RUT muy reciente - verificar vigencia",
            IssuanceBand::LikelyTest => "RUT probablemente de prueba o inválido",
        };
        f.write_str(text)
    }
}
