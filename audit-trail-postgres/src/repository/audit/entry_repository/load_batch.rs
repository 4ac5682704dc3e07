use audit_trail_db::models::entry::ChangeEntryModel;
use uuid::Uuid;

use crate::executor::Executor;

pub(super) async fn load_batch_impl(
    executor: &Executor,
    ids: &[Uuid],
) -> Result<Vec<Option<ChangeEntryModel>>, Box<dyn std::error::Error + Send + Sync>> {
    if ids.is_empty() {
        return Ok(vec![]);
    }

    let query = sqlx::query_as::<_, ChangeEntryModel>(
        r#"
        SELECT id, group_id, entity_column, is_association,
               value_before, value_after, related_string_before, related_string_after
        FROM audit_entry
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids);

    let mut tx = executor.tx.lock().await;
    let rows = if let Some(transaction) = tx.as_mut() {
        query.fetch_all(&mut **transaction).await?
    } else {
        return Err("Transaction has been consumed".into());
    };

    let mut map: std::collections::HashMap<Uuid, ChangeEntryModel> =
        rows.into_iter().map(|model| (model.id, model)).collect();

    // Return results in the same order as input ids
    let result = ids.iter().map(|id| map.remove(id)).collect();

    Ok(result)
}
