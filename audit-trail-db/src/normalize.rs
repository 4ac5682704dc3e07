use crate::metadata::FieldType;
use crate::models::Value;

/// Datetime with timezone format (ISO 8601, second precision)
pub const DATETIME_WITH_TIMEZONE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Storage dialect context for value conversion.
///
/// Mirrors how the value would be written natively, so audit text stays
/// consistent with the column's stored representation. The defaults cover the
/// canonical conversions; dialects override only where they diverge.
pub trait DatabasePlatform: Send + Sync {
    fn name(&self) -> &'static str;

    /// Converts a raw value to its storable textual form, `None` for null
    fn convert_to_database_value(&self, value: &Value) -> Option<String> {
        canonical_database_value(value)
    }
}

/// Dialect-neutral storable form of a value; dialects fall back to this for
/// every conversion they do not override
pub fn canonical_database_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(value) => Some(if *value { "1" } else { "0" }.to_string()),
        Value::Int(value) => Some(value.to_string()),
        Value::Float(value) => Some(value.to_string()),
        Value::Decimal(value) => Some(value.normalize().to_string()),
        Value::Text(value) => Some(value.clone()),
        Value::Uuid(value) => Some(value.to_string()),
        Value::DateTimeTz(value) => Some(value.format(DATETIME_WITH_TIMEZONE_FORMAT).to_string()),
        Value::DateTime(value) => Some(value.format("%Y-%m-%d %H:%M:%S").to_string()),
        Value::Json(value) => Some(value.to_string()),
        Value::Entity(entity_ref) => entity_ref.id.clone(),
    }
}

/// Converts a raw field value into its canonical nullable string form.
///
/// Dispatch precedence: temporal types get the fixed ISO-8601-with-offset
/// profile, convertible types go through the platform, everything else is the
/// raw value's string. Null passes through as `None` in every branch, never
/// as the literal text "null".
pub fn normalize_value(
    ty: FieldType,
    value: &Value,
    platform: &dyn DatabasePlatform,
) -> Option<String> {
    if value.is_null() {
        return None;
    }

    match ty {
        FieldType::DateTimeTz | FieldType::DateTime => format_temporal(value),
        FieldType::Convertible => platform.convert_to_database_value(value),
        FieldType::Plain => raw_string(value),
    }
}

fn format_temporal(value: &Value) -> Option<String> {
    match value {
        Value::DateTimeTz(value) => Some(value.format(DATETIME_WITH_TIMEZONE_FORMAT).to_string()),
        // Naive values are rendered at UTC so the offset is always explicit
        Value::DateTime(value) => Some(
            value
                .and_utc()
                .format(DATETIME_WITH_TIMEZONE_FORMAT)
                .to_string(),
        ),
        other => raw_string(other),
    }
}

fn raw_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(value) => Some(value.to_string()),
        Value::Int(value) => Some(value.to_string()),
        Value::Float(value) => Some(value.to_string()),
        Value::Decimal(value) => Some(value.to_string()),
        Value::Text(value) => Some(value.clone()),
        Value::Uuid(value) => Some(value.to_string()),
        Value::DateTimeTz(value) => Some(value.format(DATETIME_WITH_TIMEZONE_FORMAT).to_string()),
        Value::DateTime(value) => Some(value.to_string()),
        Value::Json(value) => Some(value.to_string()),
        Value::Entity(entity_ref) => entity_ref.id.clone(),
    }
}
