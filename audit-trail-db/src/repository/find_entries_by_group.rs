use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::entry::ChangeEntryModel;

/// Repository trait for reading the entries belonging to one change group
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
#[async_trait]
pub trait FindEntriesByGroup<DB: Database>: Send + Sync {
    /// Load all entries of a change group
    ///
    /// # Arguments
    /// * `group_id` - The UUID of the owning group
    async fn find_by_group_id(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<ChangeEntryModel>, Box<dyn std::error::Error + Send + Sync>>;
}
