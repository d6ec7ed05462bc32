//! The interactive parts of the intake form, wired together.

use crate::cascade::{DependentSelection, SelectionState};
use crate::config::FormConfig;
use crate::slots::SlotList;
use crate::widgets::{SelectView, TextView};

/// Interactive state of one intake form.
///
/// Two facility pairs share a catalog: the facility the patient is registered at and the
/// facility the patient is referred to.
#[derive(Clone, Debug)]
pub struct IntakeForm {
    pub origin: DependentSelection,
    pub referral: DependentSelection,
    pub pathologies: SlotList,
    pathology_options: Vec<String>,
}

/// Widgets the form renders into.
#[derive(Clone, Debug, Default)]
pub struct FormView {
    pub origin_district: SelectView,
    pub origin_facility: SelectView,
    pub referral_district: SelectView,
    pub referral_facility: SelectView,
    pub pathologies: Vec<SelectView>,
    pub rut: TextView,
    pub guardian_rut: TextView,
    pub physician_rut: TextView,
    pub birth_date: TextView,
    pub age: TextView,
}

impl IntakeForm {
    /// Builds the form state from `config`.
    pub fn initialise(config: &FormConfig) -> Self {
        let catalog = config.catalog();

        let mut origin = DependentSelection::new(catalog.clone());
        let origin_state = origin.initialise(config.origin_facility());

        let mut referral = DependentSelection::new(catalog);
        let referral_state = referral.initialise(config.referral_facility());

        if config.origin_facility().is_some() && origin_state == SelectionState::Unresolved {
            tracing::warn!("origin facility not found in catalog, kept as-is");
        }
        if config.referral_facility().is_some() && referral_state == SelectionState::Unresolved {
            tracing::warn!("referral facility not found in catalog, kept as-is");
        }

        let pathologies = SlotList::with_values(
            config.max_pathologies(),
            config.pathology_values().iter().cloned(),
        );

        Self {
            origin,
            referral,
            pathologies,
            pathology_options: config.pathology_options().to_vec(),
        }
    }

    pub fn pathology_options(&self) -> &[String] {
        &self.pathology_options
    }

    /// Projects the selection state onto `view`. Text inputs are left untouched.
    pub fn render(&self, view: &mut FormView) {
        self.origin
            .render(&mut view.origin_district, &mut view.origin_facility);
        self.referral
            .render(&mut view.referral_district, &mut view.referral_facility);
        self.pathologies
            .render(&mut view.pathologies, &self.pathology_options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{AgeBinding, RutBinding};
    use crate::widgets::{SelectWidget, TextWidget};
    use chrono::NaiveDate;

    fn config() -> FormConfig {
        FormConfig::from_sources(
            r#"{"A": ["x", "y"], "B": ["z"]}"#,
            Some("y".into()),
            Some("w".into()),
            r#"["Esquizofrenia", "Trastorno de ansiedad"]"#,
            None,
        )
    }

    #[test]
    fn initialise_resolves_both_pairs_independently() {
        let form = IntakeForm::initialise(&config());

        assert_eq!(form.origin.district(), Some("A"));
        assert_eq!(form.origin.facility(), Some("y"));
        assert_eq!(form.referral.state(), SelectionState::Unresolved);
        assert_eq!(form.referral.facility_values(), vec!["", "w"]);
        assert_eq!(
            form.pathologies.values(),
            vec!["Esquizofrenia", "Trastorno de ansiedad", ""]
        );
    }

    #[test]
    fn render_fills_every_select() {
        let form = IntakeForm::initialise(&config());
        let mut view = FormView::default();
        form.render(&mut view);

        assert_eq!(view.origin_district.value(), "A");
        assert_eq!(view.origin_facility.value(), "y");
        assert_eq!(view.referral_district.value(), "");
        assert_eq!(view.referral_facility.value(), "w");
        assert_eq!(view.pathologies.len(), 3);
        assert_eq!(view.pathologies[1].value(), "Trastorno de ansiedad");
    }

    #[test]
    fn events_update_model_and_view() {
        let mut form = IntakeForm::initialise(&config());
        let mut view = FormView::default();

        form.origin.change_district("B");
        form.pathologies.set(2, "Esquizofrenia").unwrap();
        form.render(&mut view);

        assert_eq!(view.origin_facility.option_values(), vec!["", "z"]);
        assert_eq!(view.origin_facility.value(), "");
        assert_eq!(view.pathologies.len(), 3);

        view.rut.set_value("12.345.678-9");
        assert!(!RutBinding.on_commit(&mut view.rut));
        assert!(view.rut.validity().is_some());

        view.birth_date.set_value("1992-03-20");
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        AgeBinding.on_birth_date_change(&view.birth_date, &mut view.age, today);
        assert_eq!(view.age.value(), "34");
    }
}
