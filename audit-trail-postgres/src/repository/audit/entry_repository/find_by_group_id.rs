use audit_trail_db::models::entry::ChangeEntryModel;
use uuid::Uuid;

use crate::executor::Executor;

pub(super) async fn find_by_group_id_impl(
    executor: &Executor,
    group_id: Uuid,
) -> Result<Vec<ChangeEntryModel>, Box<dyn std::error::Error + Send + Sync>> {
    let query = sqlx::query_as::<_, ChangeEntryModel>(
        r#"
        SELECT id, group_id, entity_column, is_association,
               value_before, value_after, related_string_before, related_string_after
        FROM audit_entry
        WHERE group_id = $1
        ORDER BY entity_column
        "#,
    )
    .bind(group_id);

    let mut tx = executor.tx.lock().await;
    let rows = if let Some(transaction) = tx.as_mut() {
        query.fetch_all(&mut **transaction).await?
    } else {
        return Err("Transaction has been consumed".into());
    };

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use audit_trail_db::models::{entry::ChangeEntryModel, group::ChangeGroupModel};
    use audit_trail_db::repository::{
        create_batch::CreateBatch, find_entries_by_group::FindEntriesByGroup,
    };
    use chrono::Utc;
    use uuid::Uuid;

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_entries_come_back_ordered_by_column(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let group_repo = &ctx.audit_repos.group_repository;
        let entry_repo = &ctx.audit_repos.entry_repository;

        let group = ChangeGroupModel::new(Utc::now(), None, "app::Order", "42", None);
        group_repo.create_batch(vec![group.clone()]).await?;

        entry_repo
            .create_batch(vec![
                ChangeEntryModel::scalar(group.id, "total_items", None, Some("1".to_string())),
                ChangeEntryModel::scalar(group.id, "delivered_at", None, None),
            ])
            .await?;

        let entries = entry_repo.find_by_group_id(group.id).await?;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entity_column, "delivered_at");
        assert_eq!(entries[1].entity_column, "total_items");

        let none = entry_repo.find_by_group_id(Uuid::new_v4()).await?;
        assert!(none.is_empty());

        Ok(())
    }
}
