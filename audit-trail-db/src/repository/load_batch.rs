use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for loading multiple audit records by their IDs
///
/// Returns items in the same order as the provided IDs; missing records are
/// represented as None in the result.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The record type that must implement Identifiable trait
#[async_trait]
pub trait LoadBatch<DB: Database, T: Identifiable>: Send + Sync {
    /// Load multiple records by their unique identifiers
    ///
    /// # Arguments
    /// * `ids` - A slice of UUIDs of the records to load
    ///
    /// # Returns
    /// * `Ok(Vec<Option<T>>)` - Optional records in the same order as the IDs
    /// * `Err` - An error if the query could not be executed
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<T>>, Box<dyn std::error::Error + Send + Sync>>;
}
