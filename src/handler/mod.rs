//! Request handler module
//!
//! Routing plus the upload, listing, and static-file handlers. All
//! handlers are methods on `AppState` so their dependencies are
//! explicit and testable in isolation.

pub mod listing;
pub mod router;
pub mod static_files;
pub mod upload;
