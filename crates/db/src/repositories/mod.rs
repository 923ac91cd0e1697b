//! Repository layer.

pub mod resource_repo;

pub use resource_repo::ResourceRepo;
