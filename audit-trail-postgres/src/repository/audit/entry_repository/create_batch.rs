use audit_trail_db::models::entry::ChangeEntryModel;

use crate::executor::Executor;

pub(super) async fn create_batch_impl(
    executor: &Executor,
    items: Vec<ChangeEntryModel>,
) -> Result<Vec<ChangeEntryModel>, Box<dyn std::error::Error + Send + Sync>> {
    if items.is_empty() {
        return Ok(vec![]);
    }

    let mut tx = executor.tx.lock().await;
    let transaction = match tx.as_mut() {
        Some(transaction) => transaction,
        None => return Err("Transaction has been consumed".into()),
    };

    for entry in &items {
        sqlx::query(
            r#"
            INSERT INTO audit_entry (
                id, group_id, entity_column, is_association,
                value_before, value_after, related_string_before, related_string_after
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(entry.id)
        .bind(entry.group_id)
        .bind(&entry.entity_column)
        .bind(entry.is_association)
        .bind(&entry.value_before)
        .bind(&entry.value_after)
        .bind(&entry.related_string_before)
        .bind(&entry.related_string_after)
        .execute(&mut **transaction)
        .await?;
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use audit_trail_db::models::{entry::ChangeEntryModel, group::ChangeGroupModel};
    use audit_trail_db::repository::{create_batch::CreateBatch, load::Load};
    use chrono::Utc;

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_create_entries_under_group(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let group_repo = &ctx.audit_repos.group_repository;
        let entry_repo = &ctx.audit_repos.entry_repository;

        let group = ChangeGroupModel::new(Utc::now(), None, "app::Order", "42", None);
        group_repo.create_batch(vec![group.clone()]).await?;

        let scalar = ChangeEntryModel::scalar(
            group.id,
            "total_items",
            Some("25".to_string()),
            Some("43".to_string()),
        );
        let association = ChangeEntryModel::association(
            group.id,
            "company",
            Some("7".to_string()),
            Some("9".to_string()),
            Some("Acme Ltd".to_string()),
            Some("Globex Inc".to_string()),
        );
        entry_repo
            .create_batch(vec![scalar.clone(), association.clone()])
            .await?;

        let loaded = entry_repo.load(association.id).await?;
        assert!(loaded.is_association);
        assert_eq!(loaded.related_string_after.as_deref(), Some("Globex Inc"));

        let loaded = entry_repo.load(scalar.id).await?;
        assert!(!loaded.is_association);
        assert_eq!(loaded.related_string_before, None);

        Ok(())
    }
}
