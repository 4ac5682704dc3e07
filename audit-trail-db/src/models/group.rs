use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// # Documentation
/// - One change group per audited entity instance per flush cycle.
/// - `created_at` is the detection time, not the commit time.
/// - `entity_class` + `entity_id` identify exactly the instance that changed;
///   composite identifiers are rejected during configuration resolution.
/// - Append-only: a group is never updated or deleted after it was flushed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ChangeGroupModel {
    pub id: Uuid,
    #[sqlx(rename = "created_ts")]
    pub created_at: DateTime<Utc>,
    pub username: Option<String>,
    pub entity_class: String,
    pub entity_id: String,
    pub comment: Option<String>,
}

impl ChangeGroupModel {
    pub fn new(
        created_at: DateTime<Utc>,
        username: Option<String>,
        entity_class: impl Into<String>,
        entity_id: impl Into<String>,
        comment: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at,
            username,
            entity_class: entity_class.into(),
            entity_id: entity_id.into(),
            comment,
        }
    }
}

impl Identifiable for ChangeGroupModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
