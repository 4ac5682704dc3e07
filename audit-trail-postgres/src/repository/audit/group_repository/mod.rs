pub mod create_batch;
pub mod find_by_entity;
pub mod find_by_username;
pub mod load_batch;
pub mod repo_impl;

pub use repo_impl::GroupRepositoryImpl;
