//! Bounded, self-adjusting list of repeatable selections.
//!
//! The list starts from a single template slot and grows by cloning it. After every change
//! two rules run, in order:
//!
//! 1. **Prune**: scanning in order, the first blank slot is kept and every further blank slot
//!    is removed. The template slot is never removed.
//! 2. **Ensure one blank**: if no slot is blank and the list is below its cap, one blank slot
//!    is appended.
//!
//! The result is a list of optional selects that gains an empty slot whenever the last one is
//! filled and loses empty slots as they appear, never exceeding the cap.

use crate::constants::{DEFAULT_MAX_PATHOLOGIES, PATHOLOGY_PLACEHOLDER_LABEL};
use crate::widgets::{project_options, SelectOption, SelectWidget};
use crate::{IntakeError, IntakeResult};

#[derive(Clone, Debug, PartialEq, Eq)]
struct Slot {
    value: String,
    template: bool,
}

impl Slot {
    fn template() -> Self {
        Self {
            value: String::new(),
            template: true,
        }
    }

    fn clone_of_template(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            template: false,
        }
    }

    fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// Ordered selection slots capped at `max`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotList {
    slots: Vec<Slot>,
    max: usize,
}

impl Default for SlotList {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PATHOLOGIES)
    }
}

impl SlotList {
    /// Creates a list holding one blank template slot. A `max` of zero is raised to one.
    pub fn new(max: usize) -> Self {
        Self {
            slots: vec![Slot::template()],
            max: max.max(1),
        }
    }

    /// Creates a list seeded with `values`.
    ///
    /// Blank values are discarded and the remainder truncated to `max`.
    pub fn with_values<I, S>(max: usize, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::new(max);
        let mut seeds = values
            .into_iter()
            .map(Into::into)
            .filter(|v: &String| !v.trim().is_empty())
            .take(list.max);

        if let Some(first) = seeds.next() {
            list.slots[0].value = first;
        }
        list.slots.extend(seeds.map(Slot::clone_of_template));
        list.enforce();
        list
    }

    /// Seeds the list from a JSON array.
    ///
    /// Non-string and blank entries are discarded. Anything other than a JSON array seeds
    /// nothing.
    pub fn from_json(max: usize, text: &str) -> Self {
        Self::with_values(max, parse_seed_values(text))
    }

    /// Handles a change of the slot at `index`, then re-applies the list rules.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::SlotOutOfRange`] if there is no slot at `index`.
    pub fn set(&mut self, index: usize, value: impl Into<String>) -> IntakeResult<()> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(IntakeError::SlotOutOfRange { index, len })?;
        slot.value = value.into();
        self.enforce();
        Ok(())
    }

    /// Clears the slot at `index`. Equivalent to setting it blank.
    pub fn clear(&mut self, index: usize) -> IntakeResult<()> {
        self.set(index, String::new())
    }

    fn enforce(&mut self) {
        self.prune();
        self.ensure_one_blank();
    }

    fn prune(&mut self) {
        let before = self.slots.len();
        let mut kept_blank = false;
        self.slots.retain(|slot| {
            if !slot.is_blank() || slot.template {
                kept_blank |= slot.is_blank();
                return true;
            }
            if kept_blank {
                return false;
            }
            kept_blank = true;
            true
        });

        let removed = before - self.slots.len();
        if removed > 0 {
            tracing::debug!("pruned {} blank slot(s)", removed);
        }
    }

    fn ensure_one_blank(&mut self) {
        if self.slots.len() < self.max && !self.slots.iter().any(Slot::is_blank) {
            self.slots.push(Slot::clone_of_template(String::new()));
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Every slot value in order, blanks included.
    pub fn values(&self) -> Vec<&str> {
        self.slots.iter().map(|s| s.value.as_str()).collect()
    }

    /// Non-blank slot values in order; what the form submits.
    pub fn selections(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|s| !s.is_blank())
            .map(|s| s.value.as_str())
            .collect()
    }

    pub fn is_blank(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(Slot::is_blank)
    }

    /// Projects the slots onto `widgets`, resizing it to one widget per slot.
    ///
    /// Each widget lists a placeholder then `choices`; a slot value missing from `choices` is
    /// appended so it stays visible.
    pub fn render<W>(&self, widgets: &mut Vec<W>, choices: &[String])
    where
        W: SelectWidget + Default,
    {
        widgets.truncate(self.slots.len());
        widgets.resize_with(self.slots.len(), W::default);

        for (slot, widget) in self.slots.iter().zip(widgets.iter_mut()) {
            let mut options = Vec::with_capacity(choices.len() + 2);
            options.push(SelectOption::placeholder(PATHOLOGY_PLACEHOLDER_LABEL));
            options.extend(choices.iter().cloned().map(SelectOption::new));
            if !slot.is_blank() && !choices.contains(&slot.value) {
                options.push(SelectOption::new(slot.value.clone()));
            }
            project_options(widget, &options, &slot.value);
        }
    }
}

fn parse_seed_values(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Ok(other) => {
            tracing::warn!("selection list is not a JSON array, ignoring: {}", other);
            Vec::new()
        }
        Err(e) => {
            tracing::warn!("selection list ignored: {}", IntakeError::SelectionParse(e));
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::SelectView;

    #[test]
    fn new_list_has_one_blank_template_slot() {
        let list = SlotList::new(3);
        assert_eq!(list.values(), vec![""]);
        assert!(list.is_blank(0));
    }

    #[test]
    fn zero_max_is_raised_to_one() {
        let list = SlotList::new(0);
        assert_eq!(list.max(), 1);
    }

    #[test]
    fn seeding_two_values_adds_one_blank() {
        let list = SlotList::with_values(3, ["A", "B"]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.values(), vec!["A", "B", ""]);
        assert!(list.is_blank(2));
    }

    #[test]
    fn filling_last_blank_at_cap_adds_nothing() {
        let mut list = SlotList::with_values(3, ["A", "B"]);
        list.set(2, "C").unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.values(), vec!["A", "B", "C"]);
        assert!((0..3).all(|i| !list.is_blank(i)));
    }

    #[test]
    fn filling_blank_below_cap_appends_new_blank() {
        let mut list = SlotList::with_values(3, ["A"]);
        assert_eq!(list.values(), vec!["A", ""]);
        list.set(1, "B").unwrap();
        assert_eq!(list.values(), vec!["A", "B", ""]);
    }

    #[test]
    fn clearing_a_slot_at_cap_leaves_single_blank() {
        let mut list = SlotList::with_values(3, ["A", "B", "C"]);
        list.clear(1).unwrap();
        assert_eq!(list.values(), vec!["A", "", "C"]);
    }

    #[test]
    fn clearing_middle_with_trailing_blank_prunes_extra_blank() {
        let mut list = SlotList::with_values(3, ["A", "B"]);
        assert_eq!(list.values(), vec!["A", "B", ""]);

        list.clear(1).unwrap();
        assert_eq!(list.values(), vec!["A", ""]);
        assert_eq!(list.selections(), vec!["A"]);
    }

    #[test]
    fn blank_template_is_kept_and_later_blanks_pruned() {
        let mut list = SlotList::with_values(3, ["A", "B"]);
        list.clear(0).unwrap();
        assert_eq!(list.values(), vec!["", "B"]);
    }

    #[test]
    fn template_slot_is_never_removed() {
        let mut list = SlotList::with_values(3, ["A", "B", "C"]);
        list.clear(1).unwrap();
        list.clear(0).unwrap();
        assert_eq!(list.values(), vec!["", "C"]);
        list.clear(1).unwrap();
        assert_eq!(list.values(), vec![""]);
    }

    #[test]
    fn whitespace_counts_as_blank() {
        let mut list = SlotList::with_values(3, ["A"]);
        list.set(1, "   ").unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.is_blank(1));
    }

    #[test]
    fn set_out_of_range_fails() {
        let mut list = SlotList::new(3);
        let err = list.set(5, "X").expect_err("no slot 5");
        assert!(matches!(err, IntakeError::SlotOutOfRange { index: 5, len: 1 }));
    }

    #[test]
    fn seeding_discards_blanks_and_truncates() {
        let list = SlotList::with_values(2, ["", "A", " ", "B", "C"]);
        assert_eq!(list.values(), vec!["A", "B"]);
    }

    #[test]
    fn from_json_discards_non_strings() {
        let list = SlotList::from_json(3, r#"["A", 7, null, "", {"x": 1}, "B", "C", "D"]"#);
        assert_eq!(list.values(), vec!["A", "B", "C"]);
    }

    #[test]
    fn from_json_malformed_seeds_nothing() {
        assert_eq!(SlotList::from_json(3, "[broken").values(), vec![""]);
        assert_eq!(SlotList::from_json(3, r#"{"a": "b"}"#).values(), vec![""]);
        assert_eq!(SlotList::from_json(3, "").values(), vec![""]);
    }

    #[test]
    fn never_more_than_one_blank_or_max_slots() {
        let mut list = SlotList::with_values(4, ["A", "B", "C"]);
        for (index, value) in [(0, ""), (1, ""), (0, "X"), (2, ""), (1, "Y"), (0, "")] {
            if index < list.len() {
                list.set(index, value).unwrap();
            }
            let blanks = (0..list.len()).filter(|i| list.is_blank(*i)).count();
            assert!(blanks <= 1, "values: {:?}", list.values());
            assert!(list.len() <= list.max());
        }
    }

    #[test]
    fn render_resizes_widgets_and_selects_values() {
        let list = SlotList::with_values(3, ["Esquizofrenia", "Legacy"]);
        let choices = vec!["Esquizofrenia".to_string(), "Trastorno de ansiedad".to_string()];

        let mut widgets: Vec<SelectView> = vec![SelectView::default(); 5];
        list.render(&mut widgets, &choices);

        assert_eq!(widgets.len(), 3);
        assert_eq!(widgets[0].value(), "Esquizofrenia");
        assert_eq!(
            widgets[1].option_values(),
            vec!["", "Esquizofrenia", "Trastorno de ansiedad", "Legacy"]
        );
        assert_eq!(widgets[1].value(), "Legacy");
        assert_eq!(widgets[2].value(), "");
        assert_eq!(widgets[2].option_values().len(), 3);
    }
}
