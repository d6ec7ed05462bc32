//! # Intake Core
//!
//! Interactive logic of the medical intake form, independent of any UI toolkit:
//! - District to facility catalog and dependent facility selection
//! - Bounded list of pathology selections
//! - RUT, phone, email and birth-date field handling
//!
//! Models hold plain data and render onto widgets through the traits in [`widgets`].
//! Everything runs synchronously inside a single UI event handler.
//!
//! **No page concerns**: templating, styling, routing and persistence belong to the host.

pub mod cascade;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod fields;
pub mod form;
pub mod masks;
pub mod slots;
pub mod widgets;

pub use cascade::{DependentSelection, SelectionState};
pub use catalog::Catalog;
pub use config::FormConfig;
pub use error::{IntakeError, IntakeResult};
pub use fields::{derive_age, AgeBinding, RutBinding};
pub use form::{FormView, IntakeForm};
pub use slots::SlotList;
pub use widgets::{SelectOption, SelectView, SelectWidget, TextView, TextWidget};

// Re-export the shared validated text types.
pub use intake_types::{EmailAddress, NonEmptyText, TextError};
