//! Widget seam between the form models and whatever renders them.
//!
//! Models in this crate hold their state as plain data and project it onto widgets through
//! the [`SelectWidget`] and [`TextWidget`] traits. [`SelectView`] and [`TextView`] are
//! in-memory implementations used by tests and the command-line runner.

/// One entry in a select widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl SelectOption {
    /// An enabled option whose label is its value.
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            disabled: false,
        }
    }

    /// The disabled "no selection" entry with an empty value.
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            value: crate::constants::PLACEHOLDER_VALUE.to_string(),
            label: label.into(),
            disabled: true,
        }
    }
}

pub trait SelectWidget {
    fn clear_options(&mut self);
    fn append_option(&mut self, option: &SelectOption, selected: bool);
    fn value(&self) -> &str;
    /// Selects the option carrying `value`. Unknown values leave nothing selected.
    fn set_value(&mut self, value: &str);
}

pub trait TextWidget {
    fn value(&self) -> &str;
    fn set_value(&mut self, value: &str);
    /// Sets (`Some`) or clears (`None`) the validity message shown by the host.
    fn set_validity(&mut self, message: Option<&str>);
}

/// Replaces every option of `widget` and selects `selected`.
pub fn project_options<W>(widget: &mut W, options: &[SelectOption], selected: &str)
where
    W: SelectWidget + ?Sized,
{
    widget.clear_options();
    for option in options {
        widget.append_option(option, option.value == selected);
    }
    widget.set_value(selected);
}

/// In-memory select widget.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectView {
    options: Vec<SelectOption>,
    value: String,
}

impl SelectView {
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn option_values(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.value.as_str()).collect()
    }

    pub fn selected_option(&self) -> Option<&SelectOption> {
        self.options.iter().find(|o| o.value == self.value)
    }
}

impl SelectWidget for SelectView {
    fn clear_options(&mut self) {
        self.options.clear();
        self.value.clear();
    }

    fn append_option(&mut self, option: &SelectOption, selected: bool) {
        self.options.push(option.clone());
        if selected {
            self.value = option.value.clone();
        }
    }

    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: &str) {
        if self.options.iter().any(|o| o.value == value) {
            self.value = value.to_string();
        } else {
            self.value.clear();
        }
    }
}

/// In-memory text input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextView {
    value: String,
    validity: Option<String>,
}

impl TextView {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            validity: None,
        }
    }

    pub fn validity(&self) -> Option<&str> {
        self.validity.as_deref()
    }
}

impl TextWidget for TextView {
    fn value(&self) -> &str {
        &self.value
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }

    fn set_validity(&mut self, message: Option<&str>) {
        self.validity = message.map(str::to_string);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_options_replaces_and_selects() {
        let mut view = SelectView::default();
        view.append_option(&SelectOption::new("stale"), true);

        let options = vec![SelectOption::placeholder("--"), SelectOption::new("a")];
        project_options(&mut view, &options, "a");

        assert_eq!(view.option_values(), vec!["", "a"]);
        assert_eq!(view.value(), "a");
        assert_eq!(view.selected_option().map(|o| o.label.as_str()), Some("a"));
    }

    #[test]
    fn select_view_ignores_unknown_value() {
        let mut view = SelectView::default();
        view.append_option(&SelectOption::new("a"), true);
        view.set_value("missing");
        assert_eq!(view.value(), "");
    }

    #[test]
    fn placeholder_is_disabled_with_empty_value() {
        let option = SelectOption::placeholder("Seleccione");
        assert!(option.disabled);
        assert_eq!(option.value, "");
    }

    #[test]
    fn text_view_tracks_validity() {
        let mut view = TextView::new("x");
        view.set_validity(Some("bad"));
        assert_eq!(view.validity(), Some("bad"));
        view.set_validity(None);
        assert_eq!(view.validity(), None);
    }
}
