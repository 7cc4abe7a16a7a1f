use crate::error::ConvertError;
use error_stack::ResultExt;
use kernel::KernelError;

pub mod database;
pub mod error;

pub fn env(key: &str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key)
        .convert_error()
        .attach_printable_lazy(|| format!("Env {} not specified", key))
}

/// Like [`env`], but an unset variable yields `None` instead of an error.
pub fn env_opt(key: &str) -> error_stack::Result<Option<String>, KernelError> {
    match dotenvy::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
        Err(error) => Err(error_stack::Report::from(error)
            .change_context(KernelError::Internal)
            .attach_printable(format!("Env {} is unreadable", key))),
    }
}
