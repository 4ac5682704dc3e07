use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// # Documentation
/// - One entry per changed auditable column or to-one association.
/// - Scalar entries carry the column's canonical textual value in
///   `value_before`/`value_after` and always null related strings.
/// - Association entries carry the related entity's identifier (string form,
///   null when the association side was null) in `value_before`/`value_after`
///   and an optional display string in `related_string_before`/`_after`.
/// - Entries cannot outlive their group; immutable once flushed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ChangeEntryModel {
    pub id: Uuid,
    pub group_id: Uuid,
    pub entity_column: String,
    pub is_association: bool,
    pub value_before: Option<String>,
    pub value_after: Option<String>,
    pub related_string_before: Option<String>,
    pub related_string_after: Option<String>,
}

impl ChangeEntryModel {
    /// Entry for a plain column change
    pub fn scalar(
        group_id: Uuid,
        entity_column: impl Into<String>,
        value_before: Option<String>,
        value_after: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            entity_column: entity_column.into(),
            is_association: false,
            value_before,
            value_after,
            related_string_before: None,
            related_string_after: None,
        }
    }

    /// Entry for a to-one association change
    pub fn association(
        group_id: Uuid,
        entity_column: impl Into<String>,
        value_before: Option<String>,
        value_after: Option<String>,
        related_string_before: Option<String>,
        related_string_after: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            entity_column: entity_column.into(),
            is_association: true,
            value_before,
            value_after,
            related_string_before,
            related_string_after,
        }
    }
}

impl Identifiable for ChangeEntryModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
