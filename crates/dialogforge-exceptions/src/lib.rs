//! DialogForge Exceptions - build pipeline exception policy
//!
//! Decides whether a failure during dialog generation aborts the build or
//! is logged and skipped. Two handlers:
//!
//! - **Permissive**: logs every failure and continues
//! - **Selective**: evaluates an ordered rule list against the failure's
//!   fault kind; a halting match wraps the failure in a [`FatalError`],
//!   anything else falls back to permissive behavior
//!
//! # Example
//! ```
//! use dialogforge_common::FaultRegistry;
//! use dialogforge_exceptions::for_setting;
//!
//! let handler = for_setting("dialogforge.placement.*", FaultRegistry::default());
//! assert!(handler.halts_on("dialogforge.placement.InvalidContainerError"));
//! assert!(!handler.halts_on("dialogforge.handlers.HandlerError"));
//! ```

pub mod permissive;
pub mod selective;

pub use permissive::PermissiveHandler;
pub use selective::SelectiveHandler;

use dialogforge_common::{Error, FatalError, FaultRegistry};

/// Setting value selecting the permissive handler
const SETTING_NONE: &str = "none";

/// Decides the fate of failures raised while processing one generation unit
pub trait ExceptionHandler {
    /// Process a failure: either swallow it after logging, or escalate it
    /// as a build-aborting [`FatalError`]
    fn handle(&self, message: &str, error: Error) -> Result<(), FatalError>;

    /// Answer whether a failure of the given fault kind aborts the build
    fn halts_on(&self, kind: &str) -> bool;
}

/// Build the handler configured by the build descriptor's `terminate_on`
/// setting: a comma-separated rule list, or `none` for fully permissive
/// behavior
#[must_use]
pub fn for_setting(value: &str, registry: FaultRegistry) -> Box<dyn ExceptionHandler> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(SETTING_NONE) {
        return Box::new(PermissiveHandler::new());
    }
    let rules = value
        .split(',')
        .map(str::trim)
        .filter(|rule| !rule.is_empty())
        .map(ToString::to_string)
        .collect();
    Box::new(SelectiveHandler::new(rules, registry))
}
