use async_trait::async_trait;
use audit_trail_db::{
    models::entry::ChangeEntryModel,
    repository::{
        create_batch::CreateBatch, find_entries_by_group::FindEntriesByGroup, load::Load,
        load_batch::LoadBatch,
    },
};
use sqlx::Postgres;
use uuid::Uuid;

use crate::executor::Executor;

pub struct EntryRepositoryImpl {
    pub(crate) executor: Executor,
}

impl EntryRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl CreateBatch<Postgres, ChangeEntryModel> for EntryRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ChangeEntryModel>,
    ) -> Result<Vec<ChangeEntryModel>, Box<dyn std::error::Error + Send + Sync>> {
        super::create_batch::create_batch_impl(&self.executor, items).await
    }
}

#[async_trait]
impl Load<Postgres, ChangeEntryModel> for EntryRepositoryImpl {
    async fn load(
        &self,
        id: Uuid,
    ) -> Result<ChangeEntryModel, Box<dyn std::error::Error + Send + Sync>> {
        let results = self.load_batch(&[id]).await?;
        results
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| "Entity not found".into())
    }
}

#[async_trait]
impl LoadBatch<Postgres, ChangeEntryModel> for EntryRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<ChangeEntryModel>>, Box<dyn std::error::Error + Send + Sync>> {
        super::load_batch::load_batch_impl(&self.executor, ids).await
    }
}

#[async_trait]
impl FindEntriesByGroup<Postgres> for EntryRepositoryImpl {
    async fn find_by_group_id(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<ChangeEntryModel>, Box<dyn std::error::Error + Send + Sync>> {
        super::find_by_group_id::find_by_group_id_impl(&self.executor, group_id).await
    }
}
