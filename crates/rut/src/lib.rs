//! RUT normalisation and validation.
//!
//! The RUT (Rol Único Tributario) is the Chilean national identifier: a decimal body followed
//! by a single check character that is either a digit or `K`.
//!
//! Intake forms accept the RUT as free text, so this crate works on arbitrary input strings and
//! never panics on malformed values. Anything that cannot be split into a body and a check
//! character is passed back cleaned but unvalidated.
//!
//! ## Forms
//! - **Canonical**: uppercase, digits and check character only, e.g. `123456785`
//! - **Display**: body grouped in threes from the right, e.g. `12.345.678-5`
//!
//! ## Check character
//! Digits of the body are weighted from least significant upwards with the cycle
//! `2, 3, 4, 5, 6, 7, 2, 3, ...`. The remainder of the weighted sum modulo 11 maps to
//! `0 -> '0'`, `1 -> 'K'`, `r -> 11 - r` otherwise.
//!
//! ## Legacy `0` for `K`
//! Older records sometimes stored `0` where the computed check character is `K`. Normalisation
//! rewrites that trailing `0` to `K`, and validation accepts it. The reverse (a stored `K` where
//! `0` is expected) is *not* forgiven.
//!
//! This module provides:
//! - Free functions ([`clean`], [`check_digit`], [`normalize`], [`format`], [`is_valid`]) that
//!   operate on raw text.
//! - A wrapper type ([`Rut`]) that *guarantees* a valid identifier once constructed.

mod identifier;
mod normalizer;

pub use identifier::{IssuanceBand, Rut};
pub use normalizer::{check_digit, clean, format, is_valid, normalize};

/// Error type for RUT operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RutError {
    /// The body handed to [`check_digit`] was empty or contained a non-digit.
    #[error("RUT body must be one or more decimal digits, got: '{0}'")]
    InvalidBody(String),

    /// The input could not be split into a numeric body and a check character.
    #[error("RUT cannot be split into body and check character: '{0}'")]
    Unsplittable(String),

    /// The stored check character does not match the computed one.
    #[error("RUT check character mismatch: expected '{expected}', found '{found}'")]
    CheckMismatch { expected: char, found: char },
}

/// Result type for RUT operations.
pub type RutResult<T> = Result<T, RutError>;
