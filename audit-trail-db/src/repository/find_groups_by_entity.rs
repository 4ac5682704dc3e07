use async_trait::async_trait;
use sqlx::Database;

use crate::models::group::ChangeGroupModel;
use crate::repository::pagination::{Page, PageRequest};

/// Repository trait for reading the change history of one entity instance
///
/// Groups are returned newest first, which is the natural reading order of a
/// change log.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
#[async_trait]
pub trait FindGroupsByEntity<DB: Database>: Send + Sync {
    /// Load paginated change groups for one audited entity instance
    ///
    /// # Arguments
    /// * `entity_class` - Fully-qualified class name of the audited entity
    /// * `entity_id` - String form of the entity's identifier
    /// * `page` - The pagination parameters (limit and offset)
    async fn find_by_entity(
        &self,
        entity_class: &str,
        entity_id: &str,
        page: PageRequest,
    ) -> Result<Page<ChangeGroupModel>, Box<dyn std::error::Error + Send + Sync>>;
}
