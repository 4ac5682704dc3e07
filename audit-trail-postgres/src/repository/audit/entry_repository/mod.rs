pub mod create_batch;
pub mod find_by_group_id;
pub mod load_batch;
pub mod repo_impl;

pub use repo_impl::EntryRepositoryImpl;
