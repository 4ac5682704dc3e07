use audit_trail_db::models::group::ChangeGroupModel;
use audit_trail_db::repository::pagination::{Page, PageRequest};
use sqlx::Row;

use crate::executor::Executor;

pub(super) async fn find_by_username_impl(
    executor: &Executor,
    username: &str,
    page: PageRequest,
) -> Result<Page<ChangeGroupModel>, Box<dyn std::error::Error + Send + Sync>> {
    let mut tx = executor.tx.lock().await;
    let transaction = match tx.as_mut() {
        Some(transaction) => transaction,
        None => return Err("Transaction has been consumed".into()),
    };

    let total: i64 = sqlx::query(
        r#"
        SELECT COUNT(*) FROM audit_group
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_one(&mut **transaction)
    .await?
    .get(0);

    let items = sqlx::query_as::<_, ChangeGroupModel>(
        r#"
        SELECT id, created_ts, username, entity_class, entity_id, comment
        FROM audit_group
        WHERE username = $1
        ORDER BY created_ts DESC, id
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(username)
    .bind(page.limit as i64)
    .bind(page.offset as i64)
    .fetch_all(&mut **transaction)
    .await?;

    Ok(Page::new(items, total as usize, page.limit, page.offset))
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use audit_trail_db::models::group::ChangeGroupModel;
    use audit_trail_db::repository::{
        create_batch::CreateBatch, find_groups_by_username::FindGroupsByUsername,
        pagination::PageRequest,
    };
    use chrono::Utc;

    #[tokio::test]
    #[ignore]
    #[serial_test::serial]
    async fn test_find_by_username_skips_other_actors(
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let group_repo = &ctx.audit_repos.group_repository;

        let now = Utc::now();
        group_repo
            .create_batch(vec![
                ChangeGroupModel::new(now, Some("alice".to_string()), "app::Order", "1", None),
                ChangeGroupModel::new(now, Some("bob".to_string()), "app::Order", "2", None),
                // Anonymous groups carry no username and never match
                ChangeGroupModel::new(now, None, "app::Order", "3", None),
            ])
            .await?;

        let page = group_repo
            .find_by_username("alice", PageRequest::default())
            .await?;

        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].entity_id, "1");

        Ok(())
    }
}
