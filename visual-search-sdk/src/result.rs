//! Success/failure container returned by every terminal action

use crate::error::DomainError;

/// Outcome of a single API call
///
/// Expected failures are delivered as `Failure` instead of being raised, so
/// callers branch on the variant.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum ResultEnvelope<T> {
    Success(T),
    Failure(DomainError),
}

impl<T> ResultEnvelope<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ResultEnvelope::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Borrow the success value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            ResultEnvelope::Success(value) => Some(value),
            ResultEnvelope::Failure(_) => None,
        }
    }

    /// Borrow the failure, if any
    pub fn error(&self) -> Option<&DomainError> {
        match self {
            ResultEnvelope::Success(_) => None,
            ResultEnvelope::Failure(error) => Some(error),
        }
    }

    /// Transform the success value, leaving failures untouched
    pub fn map<U, F>(self, f: F) -> ResultEnvelope<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            ResultEnvelope::Success(value) => ResultEnvelope::Success(f(value)),
            ResultEnvelope::Failure(error) => ResultEnvelope::Failure(error),
        }
    }

    /// Convert into a standard `Result` for `?`-style call sites
    pub fn into_result(self) -> Result<T, DomainError> {
        self.into()
    }
}

impl<T> From<Result<T, DomainError>> for ResultEnvelope<T> {
    fn from(result: Result<T, DomainError>) -> Self {
        match result {
            Ok(value) => ResultEnvelope::Success(value),
            Err(error) => ResultEnvelope::Failure(error),
        }
    }
}

impl<T> From<ResultEnvelope<T>> for Result<T, DomainError> {
    fn from(envelope: ResultEnvelope<T>) -> Self {
        match envelope {
            ResultEnvelope::Success(value) => Ok(value),
            ResultEnvelope::Failure(error) => Err(error),
        }
    }
}
