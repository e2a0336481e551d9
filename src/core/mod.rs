//! Application services around the verification engine.
//!
//! This module contains:
//! - Store: JSON persistence of editorial projects
//! - Audit: Append-only activity log
//! - Safety: Input limits for files loaded from disk

pub mod audit;
pub mod safety;
pub mod store;

// Re-export commonly used types
pub use audit::{AuditEntry, AuditEvent, AuditLog};
pub use safety::{InputLimits, LimitViolation};
pub use store::{ProjectError, ProjectStore};
