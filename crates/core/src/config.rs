//! Form configuration.
//!
//! The host page used to expose the catalog, the preselected facilities and the existing
//! pathology selections as globals. Here they are resolved once at startup into a
//! [`FormConfig`] and passed explicitly into [`crate::IntakeForm::initialise`].

use crate::catalog::Catalog;
use crate::constants::{DEFAULT_MAX_PATHOLOGIES, DEFAULT_PATHOLOGY_OPTIONS};
use crate::{IntakeError, IntakeResult, NonEmptyText};
use std::path::Path;
use std::sync::Arc;

/// Form configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct FormConfig {
    catalog: Arc<Catalog>,
    origin_facility: Option<NonEmptyText>,
    referral_facility: Option<NonEmptyText>,
    pathology_values: Vec<String>,
    max_pathologies: usize,
    pathology_options: Vec<String>,
}

impl FormConfig {
    /// Create a new `FormConfig`.
    pub fn new(
        catalog: Catalog,
        origin_facility: Option<NonEmptyText>,
        referral_facility: Option<NonEmptyText>,
        pathology_values: Vec<String>,
        max_pathologies: usize,
        pathology_options: Vec<String>,
    ) -> IntakeResult<Self> {
        if max_pathologies == 0 {
            return Err(IntakeError::InvalidInput(
                "max_pathologies must be at least 1".into(),
            ));
        }

        Ok(Self {
            catalog: Arc::new(catalog),
            origin_facility,
            referral_facility,
            pathology_values,
            max_pathologies,
            pathology_options,
        })
    }

    /// Build a config from raw host-supplied text.
    ///
    /// Malformed catalog or selection JSON is treated as empty; a missing or unusable slot
    /// limit falls back to the default. This never fails.
    pub fn from_sources(
        catalog_json: &str,
        origin_facility: Option<String>,
        referral_facility: Option<String>,
        pathologies_json: &str,
        max_pathologies: Option<String>,
    ) -> Self {
        let max_pathologies = max_slots_from_attr(max_pathologies);
        let pathology_values = crate::slots::SlotList::from_json(max_pathologies, pathologies_json)
            .selections()
            .into_iter()
            .map(str::to_string)
            .collect();

        Self {
            catalog: Arc::new(Catalog::from_json_lenient(catalog_json)),
            origin_facility: NonEmptyText::optional(origin_facility),
            referral_facility: NonEmptyText::optional(referral_facility),
            pathology_values,
            max_pathologies,
            pathology_options: default_pathology_options(),
        }
    }

    /// Replace the pathology choices offered in each slot.
    pub fn with_pathology_options(mut self, options: Vec<String>) -> Self {
        self.pathology_options = options;
        self
    }

    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    pub fn origin_facility(&self) -> Option<&str> {
        self.origin_facility.as_ref().map(NonEmptyText::as_str)
    }

    pub fn referral_facility(&self) -> Option<&str> {
        self.referral_facility.as_ref().map(NonEmptyText::as_str)
    }

    pub fn pathology_values(&self) -> &[String] {
        &self.pathology_values
    }

    pub fn max_pathologies(&self) -> usize {
        self.max_pathologies
    }

    pub fn pathology_options(&self) -> &[String] {
        &self.pathology_options
    }
}

pub fn default_pathology_options() -> Vec<String> {
    DEFAULT_PATHOLOGY_OPTIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Parse the slot limit from an optional attribute value.
///
/// If `value` is `None`, blank, not a positive integer, or zero, returns the default limit.
pub fn max_slots_from_attr(value: Option<String>) -> usize {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value.map(|v| v.parse::<usize>()) {
        Some(Ok(max)) if max > 0 => max,
        Some(Ok(_)) => {
            tracing::warn!("slot limit of 0 ignored, using {}", DEFAULT_MAX_PATHOLOGIES);
            DEFAULT_MAX_PATHOLOGIES
        }
        Some(Err(e)) => {
            tracing::warn!("slot limit ignored ({}), using {}", e, DEFAULT_MAX_PATHOLOGIES);
            DEFAULT_MAX_PATHOLOGIES
        }
        None => DEFAULT_MAX_PATHOLOGIES,
    }
}

/// Read a JSON source file.
pub fn read_source(path: &Path) -> IntakeResult<String> {
    std::fs::read_to_string(path).map_err(IntakeError::FileRead)
}

/// Read an optional JSON source file, treating `None` as empty text.
pub fn read_optional_source(path: Option<&Path>) -> IntakeResult<String> {
    match path {
        Some(path) => read_source(path),
        None => Ok(String::new()),
    }
}
