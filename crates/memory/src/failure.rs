use std::sync::RwLock;

use dropgate_coordinator::BackendError;

/// Switchable failure mode shared by the memory backends.
#[derive(Debug, Default)]
pub(crate) struct FailureSwitch {
    message: RwLock<Option<String>>,
}

impl FailureSwitch {
    pub(crate) fn set(&self, message: Option<String>) {
        let mut guard = self
            .message
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = message;
    }

    /// Returns the configured failure, if any.
    pub(crate) fn check(&self) -> Result<(), BackendError> {
        let guard = self
            .message
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match guard.as_ref() {
            Some(msg) => Err(BackendError::Service(msg.clone())),
            None => Ok(()),
        }
    }
}
