use std::fmt::Display;

use error_stack::Context;

#[derive(Debug)]
pub enum KernelError {
    Validation,
    Capacity,
    NotFound,
    Concurrency,
    Timeout,
    Internal,
}

impl KernelError {
    /// Whether re-running the whole unit of work from a fresh read may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, KernelError::Concurrency)
    }
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Validation => write!(f, "Missing or invalid required fields"),
            KernelError::Capacity => write!(f, "Not enough space in one or more lessons"),
            KernelError::NotFound => write!(f, "Requested resource not found"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}

/// Attached to a [`KernelError::Validation`] report once per offending input field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField(String);

impl InvalidField {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for InvalidField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid field `{}`", self.0)
    }
}
