use std::sync::Arc;

use crate::executor::Executor;

use super::{entry_repository::EntryRepositoryImpl, group_repository::GroupRepositoryImpl};

/// Factory for creating audit trail repositories
///
/// Provides methods to build repositories bound to an in-flight transaction.
/// This should be used as a singleton throughout the application.
#[derive(Default)]
pub struct AuditRepoFactory {
    // No caches needed for the audit trail module
}

impl AuditRepoFactory {
    /// Create a new AuditRepoFactory singleton
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    /// Build a change group repository with the given executor
    pub fn build_group_repo(&self, executor: &Executor) -> Arc<GroupRepositoryImpl> {
        Arc::new(GroupRepositoryImpl::new(executor.clone()))
    }

    /// Build a change entry repository with the given executor
    pub fn build_entry_repo(&self, executor: &Executor) -> Arc<EntryRepositoryImpl> {
        Arc::new(EntryRepositoryImpl::new(executor.clone()))
    }

    /// Build all audit trail repositories with the given executor
    pub fn build_all_repos(&self, executor: &Executor) -> AuditRepositories {
        AuditRepositories {
            group_repository: self.build_group_repo(executor),
            entry_repository: self.build_entry_repo(executor),
            executor: executor.clone(),
        }
    }
}

/// Container for all audit trail repositories sharing one transaction
pub struct AuditRepositories {
    pub group_repository: Arc<GroupRepositoryImpl>,
    pub entry_repository: Arc<EntryRepositoryImpl>,
    pub executor: Executor,
}
