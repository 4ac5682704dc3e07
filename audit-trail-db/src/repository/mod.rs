pub mod create_batch;
pub mod find_entries_by_group;
pub mod find_groups_by_entity;
pub mod find_groups_by_username;
pub mod load;
pub mod load_batch;
pub mod pagination;

// Re-exports
pub use create_batch::*;
pub use find_entries_by_group::*;
pub use find_groups_by_entity::*;
pub use find_groups_by_username::*;
pub use load::*;
pub use load_batch::*;
pub use pagination::*;
