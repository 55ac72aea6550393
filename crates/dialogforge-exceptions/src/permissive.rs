//! Permissive exception handler

use crate::ExceptionHandler;
use dialogforge_common::{Error, FatalError};

/// Handler that logs every failure and lets generation continue
#[derive(Clone, Copy, Debug, Default)]
pub struct PermissiveHandler;

impl PermissiveHandler {
    /// Create a permissive handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ExceptionHandler for PermissiveHandler {
    fn handle(&self, message: &str, error: Error) -> Result<(), FatalError> {
        tracing::error!(kind = error.kind(), %error, "{message}");
        Ok(())
    }

    fn halts_on(&self, _kind: &str) -> bool {
        false
    }
}
