use uuid::Uuid;

use audit_trail_api::AuditResult;

use crate::models::{ChangeEntryModel, ChangeGroupModel, Value};

/// Identity of one persistence session (unit of work)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable lightweight identity of one managed entity instance within a
/// session, issued when the instance is first observed.
///
/// Tokens stand in for reference identity: an instance keeps its token for
/// the whole session even before a primary key was assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityToken(u64);

/// Per-session token issuer
#[derive(Debug, Default)]
pub struct TokenArena {
    next: u64,
}

impl TokenArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> EntityToken {
        let token = EntityToken(self.next);
        self.next += 1;
        token
    }
}

/// Before/after pair for one field, as computed by the persistence engine.
/// Association fields carry `Value::Entity` (or `Value::Null`) on both sides.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub before: Value,
    pub after: Value,
}

impl FieldChange {
    pub fn new(before: Value, after: Value) -> Self {
        Self { before, after }
    }
}

/// One entity instance scheduled for update in the current flush, together
/// with its field-level diff. The diff order is the persistence engine's and
/// is preserved in the produced entries.
#[derive(Debug, Clone)]
pub struct PendingUpdate {
    pub entity: EntityToken,
    /// Fully-qualified name of the entity's runtime class
    pub entity_class: String,
    /// String form of the single-column identifier
    pub entity_id: String,
    pub changes: Vec<(String, FieldChange)>,
}

/// Audit record handed to the unit of work during a flush
#[derive(Debug, Clone, Copy)]
pub enum AuditRecord<'a> {
    Group(&'a ChangeGroupModel),
    Entry(&'a ChangeEntryModel),
}

/// The unit-of-work surface the engine drives during its pre-commit hook.
///
/// Records registered mid-flush are not picked up by the engine's own change
/// computation, so every `persist` must be followed by `compute_change_set`
/// before the hook returns; otherwise the record would miss the commit.
pub trait FlushSession {
    fn session_id(&self) -> SessionId;

    /// Register a freshly built audit record for insertion in this unit of work
    fn persist(&mut self, record: AuditRecord<'_>) -> AuditResult<()>;

    /// Recompute the change set for a record registered during the flush
    fn compute_change_set(&mut self, record: AuditRecord<'_>) -> AuditResult<()>;

    /// Deprecated comment path: read the named property's current value and
    /// reset it to null on the entity, before its change set is finalized
    fn take_comment_property(&mut self, entity: EntityToken, property: &str) -> Option<String>;
}
