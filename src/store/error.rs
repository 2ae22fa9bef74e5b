use thiserror::Error;

/// Reasons a record can be refused by the store. The messages double as the
/// text shown to the user, so blank, out-of-range and non-numeric input all
/// share one message per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Invalid age! Please enter a positive number.")]
    InvalidAge,

    #[error("Invalid stock! Please enter a non-negative number.")]
    InvalidStock,
}
