//! Dependent district/facility selection.
//!
//! A [`DependentSelection`] models one district selector and the facility selector that
//! depends on it. The model is plain data; [`DependentSelection::render`] projects it onto a
//! pair of [`SelectWidget`]s.
//!
//! Invariant: the facility options are always the placeholder, followed by the catalog list of
//! the current district, followed by at most one extra option carrying a preselected facility
//! that the district list does not contain. That extra option keeps a stored value that no
//! longer matches the catalog visible and selected instead of dropping it.

use crate::catalog::Catalog;
use crate::constants::{DISTRICT_PLACEHOLDER_LABEL, FACILITY_PLACEHOLDER_LABEL};
use crate::widgets::{project_options, SelectOption, SelectWidget};
use crate::{IntakeError, IntakeResult};
use std::sync::Arc;

/// Whether the district of a pair is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionState {
    /// No district chosen: nothing was preselected, or the preselected facility is not in the
    /// catalog.
    Unresolved,
    /// A catalog district is chosen and its facilities are listed.
    Resolved,
}

/// District selector plus dependent facility selector.
#[derive(Clone, Debug)]
pub struct DependentSelection {
    catalog: Arc<Catalog>,
    district: Option<String>,
    options: Vec<SelectOption>,
    selected: String,
    facility_placeholder: String,
    district_placeholder: String,
}

impl DependentSelection {
    /// Creates an unresolved pair with only the placeholder facility option.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            district: None,
            options: vec![SelectOption::placeholder(FACILITY_PLACEHOLDER_LABEL)],
            selected: String::new(),
            facility_placeholder: FACILITY_PLACEHOLDER_LABEL.to_string(),
            district_placeholder: DISTRICT_PLACEHOLDER_LABEL.to_string(),
        }
    }

    /// Overrides the placeholder labels.
    pub fn with_placeholders(
        mut self,
        district: impl Into<String>,
        facility: impl Into<String>,
    ) -> Self {
        self.district_placeholder = district.into();
        self.facility_placeholder = facility.into();
        let district = self.district.clone();
        self.populate(district.as_deref(), None);
        self
    }

    /// Resolves the pair from an optional preselected facility.
    ///
    /// If the facility is listed in the catalog, its district is chosen and the facility is
    /// selected. If it is not listed, the district stays unset and the facility is appended as
    /// an out-of-catalog option, selected. Blank preselections are ignored.
    pub fn initialise(&mut self, preselect: Option<&str>) -> SelectionState {
        let preselect = preselect.map(str::trim).filter(|p| !p.is_empty());

        let Some(facility) = preselect else {
            let district = self.district.clone();
            self.populate(district.as_deref(), None);
            return self.state();
        };

        let catalog = Arc::clone(&self.catalog);
        match catalog.district_of(facility) {
            Some(district) => {
                tracing::debug!("preselected facility '{}' resolved to '{}'", facility, district);
                self.district = Some(district.to_string());
                self.populate(Some(district), Some(facility));
            }
            None => {
                tracing::debug!("preselected facility '{}' not in catalog", facility);
                self.district = None;
                self.populate(None, Some(facility));
            }
        }

        self.state()
    }

    /// Handles a change of the district selector.
    ///
    /// The facility list is repopulated for the new district with the placeholder selected,
    /// unless the previously selected facility is also listed there. A blank or unknown
    /// district leaves the pair unresolved with only the placeholder.
    pub fn change_district(&mut self, district: &str) -> SelectionState {
        let district = district.trim();
        if self.catalog.contains_district(district) {
            self.district = Some(district.to_string());
        } else {
            if !district.is_empty() {
                tracing::warn!("district '{}' not in catalog", district);
            }
            self.district = None;
        }

        let current = self.district.clone();
        self.populate(current.as_deref(), None);
        self.state()
    }

    /// Handles a change of the facility selector.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::UnknownOption`] if `facility` is not an enabled option.
    pub fn select_facility(&mut self, facility: &str) -> IntakeResult<()> {
        let known = self
            .options
            .iter()
            .any(|o| !o.disabled && o.value == facility);
        if !known {
            return Err(IntakeError::UnknownOption(facility.to_string()));
        }
        self.selected = facility.to_string();
        Ok(())
    }

    /// Rebuilds the facility options for `district`.
    ///
    /// With no `preselect`, a previously selected facility that is also listed for `district`
    /// stays selected.
    fn populate(&mut self, district: Option<&str>, preselect: Option<&str>) {
        let prior = std::mem::take(&mut self.selected);
        let preselect = preselect.filter(|p| !p.is_empty());
        let catalog = Arc::clone(&self.catalog);
        let listed: &[String] = district
            .and_then(|d| catalog.facilities(d))
            .unwrap_or_default();

        self.options.clear();
        self.options
            .push(SelectOption::placeholder(self.facility_placeholder.clone()));

        for facility in listed {
            self.options.push(SelectOption::new(facility.clone()));
            if preselect == Some(facility.as_str()) {
                self.selected = facility.clone();
            }
        }

        match preselect {
            Some(facility) if !listed.iter().any(|f| f == facility) => {
                self.options.push(SelectOption::new(facility));
                self.selected = facility.to_string();
            }
            Some(_) => {}
            None => {
                if !prior.is_empty() && listed.contains(&prior) {
                    self.selected = prior;
                }
            }
        }
    }

    pub fn state(&self) -> SelectionState {
        if self.district.is_some() {
            SelectionState::Resolved
        } else {
            SelectionState::Unresolved
        }
    }

    pub fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    /// Selected facility, or `None` while the placeholder is selected.
    pub fn facility(&self) -> Option<&str> {
        Some(self.selected.as_str()).filter(|s| !s.is_empty())
    }

    pub fn facility_options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn facility_values(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.value.as_str()).collect()
    }

    /// Options for the district selector: placeholder plus every catalog district.
    pub fn district_options(&self) -> Vec<SelectOption> {
        std::iter::once(SelectOption::placeholder(self.district_placeholder.clone()))
            .chain(self.catalog.districts().map(SelectOption::new))
            .collect()
    }

    /// Projects the model onto the two selectors.
    pub fn render<D, F>(&self, district_widget: &mut D, facility_widget: &mut F)
    where
        D: SelectWidget + ?Sized,
        F: SelectWidget + ?Sized,
    {
        project_options(
            district_widget,
            &self.district_options(),
            self.district().unwrap_or_default(),
        );
        project_options(facility_widget, &self.options, &self.selected);
    }
}
