//! Domain logic for the eventdesk back office.
//!
//! Everything here is free of I/O: identifier types, the shared error type,
//! the sparse partial-update builder and the catalog of updatable resources.

pub mod error;
pub mod patch;
pub mod resources;
pub mod types;
