use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Reference to a related entity as seen in a to-one association diff.
///
/// `id` is the string form of the related entity's single-column identifier,
/// already extracted by the caller's identifier accessor; `None` means the
/// related instance has no persisted identifier yet. `display` is the entity's
/// human-readable representation when its type exposes one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    pub id: Option<String>,
    pub display: Option<String>,
}

impl EntityRef {
    pub fn new(id: Option<String>, display: Option<String>) -> Self {
        Self { id, display }
    }
}

/// Raw field value as handed over in a change set.
///
/// Closed variant set: the engine never inspects caller types at runtime, the
/// persistence integration maps its native values into this enum up front.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Uuid(Uuid),
    DateTimeTz(DateTime<FixedOffset>),
    DateTime(NaiveDateTime),
    Json(serde_json::Value),
    Entity(EntityRef),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The related entity reference, for association-valued changes.
    /// `Null` counts as "no related entity" and yields `None`.
    pub fn as_entity_ref(&self) -> Option<&EntityRef> {
        match self {
            Value::Entity(entity_ref) => Some(entity_ref),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}
