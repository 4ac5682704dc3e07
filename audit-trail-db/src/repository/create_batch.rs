use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for creating multiple audit records in a batch
///
/// All creates join the caller's in-flight transaction, so the audit trail
/// commits (or rolls back) atomically with the change that triggered it.
/// Audit records are append-only; no update or delete counterpart exists.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The record type that must implement Identifiable trait
///
/// # Example
/// ```ignore
/// impl CreateBatch<Postgres, ChangeGroupModel> for GroupRepositoryImpl {
///     async fn create_batch(&self, items: Vec<ChangeGroupModel>) -> Result<Vec<ChangeGroupModel>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait CreateBatch<DB: Database, T: Identifiable>: Send + Sync {
    /// Insert multiple records within the current transaction
    ///
    /// # Arguments
    /// * `items` - A vector of records to create
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The created records
    /// * `Err` - An error if the transaction could not be executed
    async fn create_batch(
        &self,
        items: Vec<T>,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
