use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use audit_trail_api::{AuditResult, IdentityProvider};

use crate::config::{AuditConfig, ConfigResolver};
use crate::metadata::{ClassKind, EffectiveMetadata, FieldType, MetadataRegistry};
use crate::models::{ChangeEntryModel, ChangeGroupModel, Value};
use crate::normalize::{normalize_value, DatabasePlatform};
use crate::session::{AuditRecord, EntityToken, FieldChange, FlushSession, PendingUpdate};
use crate::store::CommentStore;

/// Builds the audit trail for one flush cycle.
///
/// Runs synchronously inside the persistence engine's pre-commit hook: it
/// consumes the field-level diffs the caller already computed, filters them
/// down to the audited columns, and registers one change group plus its
/// entries into the same unit of work, so the trail commits atomically with
/// the triggering change.
///
/// Deliberately not idempotent: every invocation creates fresh groups, the
/// caller must invoke it exactly once per flush.
pub struct AuditEngine {
    registry: Arc<MetadataRegistry>,
    resolver: Arc<dyn ConfigResolver>,
    store: Arc<CommentStore>,
    identity: Arc<dyn IdentityProvider>,
    platform: Arc<dyn DatabasePlatform>,
}

impl AuditEngine {
    pub fn new(
        registry: Arc<MetadataRegistry>,
        resolver: Arc<dyn ConfigResolver>,
        store: Arc<CommentStore>,
        identity: Arc<dyn IdentityProvider>,
        platform: Arc<dyn DatabasePlatform>,
    ) -> Self {
        Self {
            registry,
            resolver,
            store,
            identity,
            platform,
        }
    }

    /// Processes every entity scheduled for update in the current flush, in
    /// the order given. Newly created and deleted entities are out of scope.
    ///
    /// Mapping errors from configuration resolution propagate uncaught and
    /// are expected to fail the whole commit.
    pub fn process_pending_changes(
        &self,
        session: &mut dyn FlushSession,
        updates: &[PendingUpdate],
    ) -> AuditResult<()> {
        let mut comments = self.store.pop(session.session_id());

        for update in updates {
            self.create_log_entry(session, update, &mut comments)?;
        }

        Ok(())
    }

    fn create_log_entry(
        &self,
        session: &mut dyn FlushSession,
        update: &PendingUpdate,
        comments: &mut HashMap<EntityToken, String>,
    ) -> AuditResult<()> {
        // Embedded value objects are flushed through their owner
        if let Some(meta) = self.registry.get(&update.entity_class) {
            if meta.kind == ClassKind::Embeddable {
                return Ok(());
            }
        }

        let config = self.resolver.resolve(&update.entity_class)?;
        if !config.is_audited() {
            return Ok(());
        }

        let effective = self.registry.effective(&update.entity_class)?;

        let mut affected_columns = Vec::new();
        let mut affected_associations = Vec::new();
        for (name, change) in &update.changes {
            if !config.columns.contains(name) {
                continue;
            }
            if effective.is_scalar_column(name) {
                affected_columns.push((name.as_str(), change));
            } else if effective.is_audited_association(name) {
                affected_associations.push((name.as_str(), change));
            }
            // Anything else (collections, inverse sides, unmapped fields) is
            // never audited
        }

        if affected_columns.is_empty() && affected_associations.is_empty() {
            return Ok(());
        }

        let comment = self.resolve_comment(session, update, &config, comments);

        let group = ChangeGroupModel::new(
            Utc::now(),
            self.identity.current_username(),
            update.entity_class.clone(),
            update.entity_id.clone(),
            comment,
        );
        // A record registered mid-flush misses the commit unless its change
        // set is computed explicitly, before the hook returns
        session.persist(AuditRecord::Group(&group))?;
        session.compute_change_set(AuditRecord::Group(&group))?;

        tracing::debug!(
            entity_class = %group.entity_class,
            entity_id = %group.entity_id,
            columns = affected_columns.len(),
            associations = affected_associations.len(),
            "registered change group"
        );

        for (column, change) in affected_columns {
            let entry = self.scalar_entry(&group, &effective, column, change);
            session.persist(AuditRecord::Entry(&entry))?;
            session.compute_change_set(AuditRecord::Entry(&entry))?;
        }

        for (association, change) in affected_associations {
            let entry = Self::association_entry(&group, association, change);
            session.persist(AuditRecord::Entry(&entry))?;
            session.compute_change_set(AuditRecord::Entry(&entry))?;
        }

        Ok(())
    }

    /// The session-scoped store wins; the deprecated comment-property read
    /// (clearing the property on the entity) is kept as a fallback only
    fn resolve_comment(
        &self,
        session: &mut dyn FlushSession,
        update: &PendingUpdate,
        config: &AuditConfig,
        comments: &mut HashMap<EntityToken, String>,
    ) -> Option<String> {
        if let Some(comment) = comments.remove(&update.entity) {
            return Some(comment);
        }

        config
            .comment_property
            .as_deref()
            .and_then(|property| session.take_comment_property(update.entity, property))
    }

    fn scalar_entry(
        &self,
        group: &ChangeGroupModel,
        effective: &EffectiveMetadata,
        column: &str,
        change: &FieldChange,
    ) -> ChangeEntryModel {
        let ty = effective.field_type(column).unwrap_or(FieldType::Plain);
        let value_before = normalize_value(ty, &change.before, self.platform.as_ref());
        let value_after = normalize_value(ty, &change.after, self.platform.as_ref());

        ChangeEntryModel::scalar(group.id, column, value_before, value_after)
    }

    fn association_entry(
        group: &ChangeGroupModel,
        association: &str,
        change: &FieldChange,
    ) -> ChangeEntryModel {
        let (value_before, related_before) = association_side(&change.before);
        let (value_after, related_after) = association_side(&change.after);

        ChangeEntryModel::association(
            group.id,
            association,
            value_before,
            value_after,
            related_before,
            related_after,
        )
    }
}

/// Identifier and display string of one association side; a null side yields
/// null for both, never an error
fn association_side(value: &Value) -> (Option<String>, Option<String>) {
    match value.as_entity_ref() {
        Some(entity_ref) => (entity_ref.id.clone(), entity_ref.display.clone()),
        None => (None, None),
    }
}
