use audit_trail_db::models::group::ChangeGroupModel;

use crate::executor::Executor;

pub(super) async fn create_batch_impl(
    executor: &Executor,
    items: Vec<ChangeGroupModel>,
) -> Result<Vec<ChangeGroupModel>, Box<dyn std::error::Error + Send + Sync>> {
    if items.is_empty() {
        return Ok(vec![]);
    }

    let mut tx = executor.tx.lock().await;
    let transaction = match tx.as_mut() {
        Some(transaction) => transaction,
        None => return Err("Transaction has been consumed".into()),
    };

    for group in &items {
        sqlx::query(
            r#"
            INSERT INTO audit_group (id, created_ts, username, entity_class, entity_id, comment)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(group.id)
        .bind(group.created_at)
        .bind(&group.username)
        .bind(&group.entity_class)
        .bind(&group.entity_id)
        .bind(&group.comment)
        .execute(&mut **transaction)
        .await?;
    }

    Ok(items)
}
