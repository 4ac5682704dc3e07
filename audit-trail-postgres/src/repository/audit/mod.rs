pub mod entry_repository;
pub mod factory;
pub mod group_repository;

pub use factory::{AuditRepoFactory, AuditRepositories};
