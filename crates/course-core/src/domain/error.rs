//! Domain error taxonomy.
//!
//! Every fallible domain operation returns a [`DomainError`].  Callers that
//! only need to branch on the *category* of failure use [`DomainError::kind`],
//! which maps onto the stable [`ErrorKind`] shared with the registry layer.

use thiserror::Error;

use crate::records::codec::DELIMITER;

/// Stable, inspectable category of a failure.
///
/// The human-readable message lives in the error's `Display` impl; the kind is
/// what an interface layer matches on to decide how to present the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed construction or mutation: empty field, bad email, numeric
    /// bound out of range, or a bound lowered illegally.
    Validation,
    /// A capacity limit would be violated.
    Capacity,
    /// A session-scoped operation was invoked with nobody logged in.
    Session,
    /// Reading or writing a record file failed.
    Io,
}

/// Errors raised by domain entity construction and mutation.
///
/// A failing call never partially applies: the entity is left exactly as it
/// was before the call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DomainError {
    /// A required text field was empty.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// A text field contains the record-file field separator.
    #[error("{field} must not contain ','")]
    ContainsDelimiter { field: &'static str },

    /// The email address does not have an `@` followed later by a `.`.
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),

    /// A numeric field is outside its legal range.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// A count that must be positive was zero.
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    /// A monotonic bound was set below its current value.
    #[error("{field} may only be raised: current {current}, requested {requested}")]
    BoundLowered {
        field: &'static str,
        current: u32,
        requested: u32,
    },

    /// A course capacity would drop below the number of enrolled students.
    #[error("capacity {requested} is below current enrollment of {enrolled}")]
    CapacityBelowEnrollment { requested: u32, enrolled: usize },

    /// Changing a course's credit weight would push an enrolled student past
    /// their credit ceiling.
    #[error("student {student} would exceed {max_credits} credits")]
    CreditLimitExceeded { student: String, max_credits: u32 },
}

impl DomainError {
    /// Returns the stable category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::CapacityBelowEnrollment { .. } => ErrorKind::Capacity,
            DomainError::EmptyField { .. }
            | DomainError::ContainsDelimiter { .. }
            | DomainError::InvalidEmail(_)
            | DomainError::OutOfRange { .. }
            | DomainError::NotPositive { .. }
            | DomainError::BoundLowered { .. }
            | DomainError::CreditLimitExceeded { .. } => ErrorKind::Validation,
        }
    }
}

/// Rejects an empty string for the named field.
pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        Err(DomainError::EmptyField { field })
    } else {
        Ok(())
    }
}

/// Rejects an empty string, or one that would split into two record fields.
pub(crate) fn require_text_field(field: &'static str, value: &str) -> Result<(), DomainError> {
    require_non_empty(field, value)?;
    if value.contains(DELIMITER) {
        return Err(DomainError::ContainsDelimiter { field });
    }
    Ok(())
}

/// Rejects `value` outside `min..=max` for the named field.
pub(crate) fn require_in_range(
    field: &'static str,
    value: u32,
    min: u32,
    max: u32,
) -> Result<(), DomainError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(DomainError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
