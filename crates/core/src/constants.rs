//! Constants used throughout the intake core crate.
//!
//! Field names, labels and defaults shared by the models and their widget bindings.

/// Default cap on the number of pathology slots.
pub const DEFAULT_MAX_PATHOLOGIES: usize = 3;

/// Value carried by the synthetic "no selection" option.
pub const PLACEHOLDER_VALUE: &str = "";

/// Label of the placeholder option in a facility selector.
pub const FACILITY_PLACEHOLDER_LABEL: &str = "Seleccione un establecimiento";

/// Label of the placeholder option in a district selector.
pub const DISTRICT_PLACEHOLDER_LABEL: &str = "Seleccione una comuna";

/// Label of the placeholder option in a pathology slot.
pub const PATHOLOGY_PLACEHOLDER_LABEL: &str = "Seleccione una patología";

/// Validity message attached to a RUT input that fails the check character.
pub const INVALID_RUT_MESSAGE: &str = "RUT inválido";

/// GES pathologies offered by the intake form.
pub const DEFAULT_PATHOLOGY_OPTIONS: [&str; 5] = [
    "Trastorno depresivo mayor",
    "Esquizofrenia",
    "Consumo perjudicial de alcohol y drogas",
    "Trastorno de ansiedad",
    "Trastorno del espectro autista",
];
