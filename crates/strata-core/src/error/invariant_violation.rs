use super::Error;

/// An analyzed schema broke one of its own guarantees.
///
/// This always indicates a bug in the analyzer rather than a problem with the
/// entity definitions.
#[derive(Debug)]
pub(super) struct InvariantViolation {
    message: Box<str>,
}

impl std::error::Error for InvariantViolation {}

impl core::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "internal invariant violated: {}", self.message)
    }
}

impl Error {
    /// Creates an invariant violation error.
    pub fn invariant_violation(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvariantViolation(InvariantViolation {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invariant violation.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvariantViolation(_))
    }
}
