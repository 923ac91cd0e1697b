//! Request extractors shared by handlers.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user and enterprise from a JWT Bearer token.

pub mod auth;
