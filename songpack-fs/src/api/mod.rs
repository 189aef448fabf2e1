//! HTTP handlers and middleware for songpack-fs

pub mod gatekeeper;
pub mod listing;

pub use gatekeeper::gatekeeper;
pub use listing::list_directory;
