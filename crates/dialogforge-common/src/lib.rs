//! DialogForge Common - Shared types and utilities
//!
//! This crate provides error definitions, plugin configuration, the
//! fault-kind registry, and the naming/ordering utilities used across all
//! DialogForge components.

pub mod config;
pub mod error;
pub mod faults;
pub mod naming;
pub mod ordering;

pub use config::PluginConfig;
pub use error::{Error, FatalError, Result};
pub use faults::FaultRegistry;
