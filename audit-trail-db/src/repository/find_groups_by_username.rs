use async_trait::async_trait;
use sqlx::Database;

use crate::models::group::ChangeGroupModel;
use crate::repository::pagination::{Page, PageRequest};

/// Repository trait for reading all change groups recorded for one actor
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
#[async_trait]
pub trait FindGroupsByUsername<DB: Database>: Send + Sync {
    /// Load paginated change groups created by the given actor, newest first
    ///
    /// # Arguments
    /// * `username` - The actor identity recorded on the groups
    /// * `page` - The pagination parameters (limit and offset)
    async fn find_by_username(
        &self,
        username: &str,
        page: PageRequest,
    ) -> Result<Page<ChangeGroupModel>, Box<dyn std::error::Error + Send + Sync>>;
}
