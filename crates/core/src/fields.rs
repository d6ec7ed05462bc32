//! Bindings between text inputs and the RUT and age logic.
//!
//! The RUT input is cleaned on every keystroke but only reformatted when the user commits the
//! value (blur or change), so the cursor is not moved while typing.

use crate::constants::INVALID_RUT_MESSAGE;
use crate::masks::parse_date;
use crate::widgets::TextWidget;
use chrono::{Datelike, NaiveDate};

/// Event handlers for a RUT text input.
#[derive(Clone, Copy, Debug, Default)]
pub struct RutBinding;

impl RutBinding {
    /// Keystroke handler: strips characters that cannot be part of a RUT.
    pub fn on_input<W>(&self, widget: &mut W)
    where
        W: TextWidget + ?Sized,
    {
        let cleaned = intake_rut::clean(widget.value());
        if cleaned != widget.value() {
            widget.set_value(&cleaned);
        }
    }

    /// Blur/change handler: formats the value and flags it when invalid.
    ///
    /// A blank field is optional and counts as valid. Returns whether the value is valid.
    pub fn on_commit<W>(&self, widget: &mut W) -> bool
    where
        W: TextWidget + ?Sized,
    {
        let raw = widget.value().trim().to_string();
        if raw.is_empty() {
            widget.set_value("");
            widget.set_validity(None);
            return true;
        }

        widget.set_value(&intake_rut::format(&raw));

        let valid = intake_rut::is_valid(&raw);
        if valid {
            widget.set_validity(None);
        } else {
            tracing::debug!("RUT failed check character: {}", raw);
            widget.set_validity(Some(INVALID_RUT_MESSAGE));
        }
        valid
    }
}

/// Whole years between `birth_date` and `today`.
///
/// Returns `None` for blank or unparseable input, and for birth dates after `today`.
pub fn derive_age(birth_date: &str, today: NaiveDate) -> Option<u32> {
    let born = parse_date(birth_date)?;
    if born > today {
        return None;
    }

    let mut age = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

/// Keeps an age input in step with a birth-date input.
#[derive(Clone, Copy, Debug, Default)]
pub struct AgeBinding;

impl AgeBinding {
    /// Writes the derived age, or clears the age field when none can be derived.
    pub fn on_birth_date_change<D, A>(&self, date_widget: &D, age_widget: &mut A, today: NaiveDate)
    where
        D: TextWidget + ?Sized,
        A: TextWidget + ?Sized,
    {
        match derive_age(date_widget.value(), today) {
            Some(age) => age_widget.set_value(&age.to_string()),
            None => age_widget.set_value(""),
        }
    }
}
