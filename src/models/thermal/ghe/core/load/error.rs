use thiserror::Error;

/// Errors raised when load data is malformed.
///
/// Loads are validated when they are set, so a sizing call never sees
/// invalid load data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadError {
    /// A monthly array does not have one value per month.
    #[error("expected {expected} values, got {actual}")]
    Length { expected: usize, actual: usize },

    /// A load value is negative.
    #[error("load at index {index} is negative")]
    Negative { index: usize },

    /// A load value is NaN or infinite.
    #[error("load at index {index} is not finite")]
    NotFinite { index: usize },

    /// An hourly series does not cover a whole number of years.
    #[error("hourly series of {len} values is not a whole number of 8760-hour years")]
    YearMultiple { len: usize },

    /// Heating and cooling series differ in length.
    #[error("heating has {heating} values but cooling has {cooling}")]
    LengthMismatch { heating: usize, cooling: usize },
}
