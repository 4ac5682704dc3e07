use async_trait::async_trait;
use audit_trail_db::{
    models::group::ChangeGroupModel,
    repository::{
        create_batch::CreateBatch,
        find_groups_by_entity::FindGroupsByEntity,
        find_groups_by_username::FindGroupsByUsername,
        load::Load,
        load_batch::LoadBatch,
        pagination::{Page, PageRequest},
    },
};
use sqlx::Postgres;
use uuid::Uuid;

use crate::executor::Executor;

pub struct GroupRepositoryImpl {
    pub(crate) executor: Executor,
}

impl GroupRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl CreateBatch<Postgres, ChangeGroupModel> for GroupRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<ChangeGroupModel>,
    ) -> Result<Vec<ChangeGroupModel>, Box<dyn std::error::Error + Send + Sync>> {
        super::create_batch::create_batch_impl(&self.executor, items).await
    }
}

#[async_trait]
impl Load<Postgres, ChangeGroupModel> for GroupRepositoryImpl {
    async fn load(
        &self,
        id: Uuid,
    ) -> Result<ChangeGroupModel, Box<dyn std::error::Error + Send + Sync>> {
        let results = self.load_batch(&[id]).await?;
        results
            .into_iter()
            .next()
            .flatten()
            .ok_or_else(|| "Entity not found".into())
    }
}

#[async_trait]
impl LoadBatch<Postgres, ChangeGroupModel> for GroupRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<ChangeGroupModel>>, Box<dyn std::error::Error + Send + Sync>> {
        super::load_batch::load_batch_impl(&self.executor, ids).await
    }
}

#[async_trait]
impl FindGroupsByEntity<Postgres> for GroupRepositoryImpl {
    async fn find_by_entity(
        &self,
        entity_class: &str,
        entity_id: &str,
        page: PageRequest,
    ) -> Result<Page<ChangeGroupModel>, Box<dyn std::error::Error + Send + Sync>> {
        super::find_by_entity::find_by_entity_impl(&self.executor, entity_class, entity_id, page)
            .await
    }
}

#[async_trait]
impl FindGroupsByUsername<Postgres> for GroupRepositoryImpl {
    async fn find_by_username(
        &self,
        username: &str,
        page: PageRequest,
    ) -> Result<Page<ChangeGroupModel>, Box<dyn std::error::Error + Send + Sync>> {
        super::find_by_username::find_by_username_impl(&self.executor, username, page).await
    }
}
