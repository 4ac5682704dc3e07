use audit_trail_db::models::Value;
use audit_trail_db::normalize::{canonical_database_value, DatabasePlatform};

/// PostgreSQL storage dialect.
///
/// Booleans are stored as `true`/`false` literals; everything else keeps the
/// canonical conversion.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresPlatform;

impl DatabasePlatform for PostgresPlatform {
    fn name(&self) -> &'static str {
        "postgresql"
    }

    fn convert_to_database_value(&self, value: &Value) -> Option<String> {
        match value {
            Value::Bool(value) => Some(if *value { "true" } else { "false" }.to_string()),
            other => canonical_database_value(other),
        }
    }
}
