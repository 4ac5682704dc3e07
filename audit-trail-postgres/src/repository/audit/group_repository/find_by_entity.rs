use audit_trail_db::models::group::ChangeGroupModel;
use audit_trail_db::repository::pagination::{Page, PageRequest};
use sqlx::Row;

use crate::executor::Executor;

pub(super) async fn find_by_entity_impl(
    executor: &Executor,
    entity_class: &str,
    entity_id: &str,
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
        WHERE entity_class = $1 AND entity_id = $2
        "#,
    )
    .bind(entity_class)
    .bind(entity_id)
    .fetch_one(&mut **transaction)
    .await?
    .get(0);

    let items = sqlx::query_as::<_, ChangeGroupModel>(
        r#"
        SELECT id, created_ts, username, entity_class, entity_id, comment
        FROM audit_group
        WHERE entity_class = $1 AND entity_id = $2
        ORDER BY created_ts DESC, id
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(entity_class)
    .bind(entity_id)
    .bind(page.limit as i64)
    .bind(page.offset as i64)
    .fetch_all(&mut **transaction)
    .await?;

    Ok(Page::new(items, total as usize, page.limit, page.offset))
}
