use std::fmt;
use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::models::MessageStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: &'static str,
    pub reason: String,
}

impl Violation {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Field violations collected by the validator. Never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields: Vec<_> = self.0.iter().map(|v| v.field).collect();
        fields.dedup();
        fields
    }

    pub fn into_result(self) -> Result<(), Violations> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, violation) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", violation.field, violation.reason)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),
    #[error("store backend failure: {0}")]
    Backend(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(Violations),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Message not found: {0}")]
    NotFound(Uuid),
    #[error("Message {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: Uuid,
        from: MessageStatus,
        to: MessageStatus,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Only infrastructure failures are worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Store(_))
    }
}

impl From<Violations> for DomainError {
    fn from(value: Violations) -> Self {
        DomainError::Validation(value)
    }
}
