//! HTTP protocol layer module
//!
//! Response builders and protocol helpers shared by every handler,
//! decoupled from the upload business logic.

pub mod cache;
pub mod mime;
pub mod page;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_404_response, build_405_response, build_413_response, build_message_response,
    build_options_response,
};
