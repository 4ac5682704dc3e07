use std::sync::Arc;

use sqlx::PgPool;

use crate::executor::Executor;
use crate::repository::audit::{AuditRepoFactory, AuditRepositories};

pub struct PostgresRepositories {
    pool: Arc<PgPool>,
    audit_factory: Arc<AuditRepoFactory>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            pool,
            audit_factory: AuditRepoFactory::new(),
        }
    }

    /// Create all audit repositories sharing a single new transaction
    ///
    /// The returned container carries the executor; callers commit or roll
    /// back through it once the flush cycle is over.
    pub async fn create_audit_repositories(
        &self,
    ) -> Result<AuditRepositories, Box<dyn std::error::Error + Send + Sync>> {
        let executor = Executor::begin(&self.pool).await?;
        Ok(self.audit_factory.build_all_repos(&executor))
    }
}
