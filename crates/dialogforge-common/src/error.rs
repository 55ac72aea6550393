//! Error types for DialogForge
//!
//! Two tiers: recoverable per-member issues surface as [`Error`] values and
//! are decided by the exception policy; [`FatalError`] is the single
//! build-aborting wrapper that terminates the generation workflow.

use thiserror::Error;

/// Common result type for DialogForge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for DialogForge
#[derive(Debug, Error)]
pub enum Error {
    // Placement errors
    #[error("invalid container: {0}")]
    InvalidContainer(String),

    #[error("section not found: member {member} requests section '{section}'")]
    SectionNotFound { member: String, section: String },

    // Member handler errors
    #[error("handler failed for member {member}: {message}")]
    Handler { member: String, message: String },

    // Configuration errors
    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    // Internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid container error
    pub fn invalid_container(msg: impl Into<String>) -> Self {
        Self::InvalidContainer(msg.into())
    }

    /// Create a section-not-found error
    pub fn section_not_found(member: impl Into<String>, section: impl Into<String>) -> Self {
        Self::SectionNotFound {
            member: member.into(),
            section: section.into(),
        }
    }

    /// Create a handler error
    pub fn handler(member: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Handler {
            member: member.into(),
            message: message.into(),
        }
    }

    /// Create an invalid setting error
    pub fn invalid_setting(msg: impl Into<String>) -> Self {
        Self::InvalidSetting(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Qualified fault-kind name for this error, evaluated against the
    /// rule list of a selective exception handler
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidContainer(_) => kinds::INVALID_CONTAINER,
            Self::SectionNotFound { .. } => kinds::SECTION_NOT_FOUND,
            Self::Handler { .. } => kinds::HANDLER,
            Self::InvalidSetting(_) => kinds::INVALID_SETTING,
            Self::Internal(_) => kinds::INTERNAL,
        }
    }

    /// Check if this is a per-member error that leaves the rest of the
    /// generation unit intact
    #[must_use]
    pub fn is_member_scoped(&self) -> bool {
        matches!(self, Self::Handler { .. } | Self::SectionNotFound { .. })
    }
}

/// Qualified fault-kind names for [`Error`] variants
pub mod kinds {
    /// Root ancestor of every DialogForge fault kind
    pub const ROOT: &str = "dialogforge.Error";
    pub const INVALID_CONTAINER: &str = "dialogforge.placement.InvalidContainerError";
    pub const SECTION_NOT_FOUND: &str = "dialogforge.placement.SectionNotFoundError";
    pub const HANDLER: &str = "dialogforge.handlers.HandlerError";
    pub const INVALID_SETTING: &str = "dialogforge.config.InvalidSettingError";
    pub const INTERNAL: &str = "dialogforge.InternalError";
}

/// Build-aborting error wrapper
///
/// Raised when the selective exception policy decides a failure must halt
/// the overall generation workflow.
#[derive(Debug, Error)]
#[error("dialog generation terminated: {0}")]
pub struct FatalError(#[from] pub Error);

impl FatalError {
    /// The originating failure
    #[must_use]
    pub fn cause(&self) -> &Error {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        assert_eq!(
            Error::invalid_container("no node").kind(),
            "dialogforge.placement.InvalidContainerError"
        );
        assert_eq!(
            Error::handler("title", "boom").kind(),
            "dialogforge.handlers.HandlerError"
        );
    }

    #[test]
    fn test_member_scoped() {
        assert!(Error::handler("title", "boom").is_member_scoped());
        assert!(Error::section_not_found("title", "Main").is_member_scoped());
        assert!(!Error::internal("oops").is_member_scoped());
    }

    #[test]
    fn test_fatal_wraps_cause() {
        let fatal = FatalError::from(Error::internal("oops"));
        assert_eq!(fatal.cause().kind(), "dialogforge.InternalError");
        assert!(fatal.to_string().contains("terminated"));
    }
}
