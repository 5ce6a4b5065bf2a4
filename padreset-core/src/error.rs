//! Error types for configuring the reset mod.

/// Errors that can occur while building a configuration or selecting a mode.
///
/// The per-tick path never fails; these only surface at start-up.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A mode index was outside the active mode set.
    #[error("Invalid mode {value} for a set of {count} modes")]
    InvalidMode {
        /// The invalid index provided.
        value: u8,
        /// Number of modes in the active set.
        count: u8,
    },

    /// A timing value was outside the range the tick counter can measure.
    #[error("Invalid {name} of {value} ms (expected {min}-{max})")]
    InvalidTiming {
        /// The setting name.
        name: &'static str,
        /// The invalid value provided.
        value: u16,
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
    },

    /// The build variant name was not recognized.
    #[error("Unknown variant '{0}' (expected language, frequency or region)")]
    UnknownVariant(String),
}
