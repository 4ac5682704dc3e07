use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use audit_trail_api::{AuditError, AuditResult};

use crate::metadata::{ClassKind, MetadataRegistry};

/// Resolved audit configuration of one class.
///
/// An empty `columns` set means "not audited" and is never an error. Also the
/// shape of the warmed cache artifact, hence the serde derives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditConfig {
    pub columns: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment_property: Option<String>,
}

impl AuditConfig {
    pub fn is_audited(&self) -> bool {
        !self.columns.is_empty()
    }
}

/// Maps a class name to its effective audit configuration.
///
/// Implementations own their caching strategy; the first resolution for a
/// class is authoritative for the life of the process, since class metadata
/// never changes after startup.
pub trait ConfigResolver: Send + Sync {
    fn resolve(&self, class: &str) -> AuditResult<Arc<AuditConfig>>;
}

/// Resolver deriving configuration from the metadata registry.
///
/// Applies the inheritance merge rule: the effective column set is the union
/// of the columns declared at every level of the mapped-superclass chain,
/// root to leaf. Results are memoized per class behind a read-mostly lock;
/// population races are first-writer-wins, all racers compute the same value.
pub struct MetadataConfigResolver {
    registry: Arc<MetadataRegistry>,
    cache: RwLock<HashMap<String, Arc<AuditConfig>>>,
}

impl MetadataConfigResolver {
    pub fn new(registry: Arc<MetadataRegistry>) -> Self {
        Self {
            registry,
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn resolve_uncached(&self, class: &str) -> AuditResult<AuditConfig> {
        let chain = self.registry.ancestor_chain(class)?;
        if chain.iter().all(|level| level.audit.is_none()) {
            return Ok(AuditConfig::default());
        }

        let effective = self.registry.effective(class)?;
        let mut config = AuditConfig::default();

        for (position, level) in chain.iter().enumerate() {
            let Some(audit) = &level.audit else {
                continue;
            };

            if audit.comment_property.is_some() {
                if position > 0 {
                    return Err(AuditError::InvalidMapping(format!(
                        "Comment property may only be declared at the root of the \
                         inheritance chain, found in class \"{}\"",
                        level.name
                    )));
                }
                config.comment_property = audit.comment_property.clone();
            }

            for column in &audit.columns {
                if effective.embedded_fields.contains(column) {
                    return Err(AuditError::InvalidMapping(format!(
                        "Embedded classes are not supported, {}::{column}",
                        level.name
                    )));
                }
                if effective
                    .associations
                    .get(column)
                    .is_some_and(|assoc| assoc.to_many)
                {
                    return Err(AuditError::InvalidMapping(format!(
                        "Collections are not supported, {}::{column}",
                        level.name
                    )));
                }
                config.columns.insert(column.clone());
            }
        }

        if let Some(leaf) = chain.last() {
            if leaf.kind != ClassKind::MappedSuperclass && leaf.identifier.len() > 1 {
                return Err(AuditError::InvalidMapping(format!(
                    "Composite identifiers are not supported, found in class \"{}\"",
                    leaf.name
                )));
            }
        }

        Ok(config)
    }
}

impl ConfigResolver for MetadataConfigResolver {
    fn resolve(&self, class: &str) -> AuditResult<Arc<AuditConfig>> {
        if let Some(config) = self.cache.read().get(class) {
            return Ok(Arc::clone(config));
        }

        let config = Arc::new(self.resolve_uncached(class)?);
        let mut cache = self.cache.write();
        let entry = cache
            .entry(class.to_string())
            .or_insert_with(|| Arc::clone(&config));

        Ok(Arc::clone(entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{AssociationMetadata, AuditAttributes, ClassMetadata, FieldType};

    fn resolver_for(registry: MetadataRegistry) -> MetadataConfigResolver {
        MetadataConfigResolver::new(Arc::new(registry))
    }

    #[test]
    fn columns_are_merged_across_the_inheritance_chain() {
        let mut registry = MetadataRegistry::new();
        registry.register(
            ClassMetadata::new("app::Base", ClassKind::MappedSuperclass)
                .field("a", FieldType::Plain)
                .audit(AuditAttributes::columns(["a"])),
        );
        registry.register(
            ClassMetadata::new("app::Concrete", ClassKind::Entity)
                .parent("app::Base")
                .identifier(&["id"])
                .field("id", FieldType::Plain)
                .field("b", FieldType::Plain)
                .audit(AuditAttributes::columns(["b"])),
        );

        let config = resolver_for(registry).resolve("app::Concrete").unwrap();
        let columns: Vec<_> = config.columns.iter().map(String::as_str).collect();
        assert_eq!(columns, ["a", "b"]);
    }

    #[test]
    fn unknown_class_resolves_to_not_audited() {
        let config = resolver_for(MetadataRegistry::new())
            .resolve("app::Nowhere")
            .unwrap();
        assert!(!config.is_audited());
    }

    #[test]
    fn class_without_audit_attributes_resolves_to_not_audited() {
        let mut registry = MetadataRegistry::new();
        registry.register(
            ClassMetadata::new("app::Plain", ClassKind::Entity)
                .identifier(&["id"])
                .field("id", FieldType::Plain),
        );

        let config = resolver_for(registry).resolve("app::Plain").unwrap();
        assert!(!config.is_audited());
    }

    #[test]
    fn comment_property_below_the_root_is_rejected() {
        let mut registry = MetadataRegistry::new();
        registry.register(
            ClassMetadata::new("app::Base", ClassKind::MappedSuperclass)
                .field("a", FieldType::Plain),
        );
        registry.register(
            ClassMetadata::new("app::Concrete", ClassKind::Entity)
                .parent("app::Base")
                .identifier(&["id"])
                .field("id", FieldType::Plain)
                .field("note", FieldType::Plain)
                .audit(AuditAttributes::columns(["a"]).with_comment_property("note")),
        );

        let err = resolver_for(registry).resolve("app::Concrete").unwrap_err();
        assert!(matches!(err, AuditError::InvalidMapping(_)));
    }

    #[test]
    fn comment_property_at_the_root_is_kept() {
        let mut registry = MetadataRegistry::new();
        registry.register(
            ClassMetadata::new("app::Order", ClassKind::Entity)
                .identifier(&["id"])
                .field("id", FieldType::Plain)
                .field("total_items", FieldType::Plain)
                .field("note", FieldType::Plain)
                .audit(AuditAttributes::columns(["total_items"]).with_comment_property("note")),
        );

        let config = resolver_for(registry).resolve("app::Order").unwrap();
        assert_eq!(config.comment_property.as_deref(), Some("note"));
    }

    #[test]
    fn composite_identifiers_are_rejected() {
        let mut registry = MetadataRegistry::new();
        registry.register(
            ClassMetadata::new("app::Pair", ClassKind::Entity)
                .identifier(&["left_id", "right_id"])
                .field("left_id", FieldType::Plain)
                .field("right_id", FieldType::Plain)
                .field("state", FieldType::Plain)
                .audit(AuditAttributes::columns(["state"])),
        );

        let err = resolver_for(registry).resolve("app::Pair").unwrap_err();
        assert!(matches!(err, AuditError::InvalidMapping(_)));
    }

    #[test]
    fn audited_embedded_field_is_rejected() {
        let mut registry = MetadataRegistry::new();
        registry.register(
            ClassMetadata::new("app::Order", ClassKind::Entity)
                .identifier(&["id"])
                .field("id", FieldType::Plain)
                .embedded("address")
                .audit(AuditAttributes::columns(["address"])),
        );

        let err = resolver_for(registry).resolve("app::Order").unwrap_err();
        assert!(matches!(err, AuditError::InvalidMapping(_)));
    }

    #[test]
    fn audited_collection_association_is_rejected() {
        let mut registry = MetadataRegistry::new();
        registry.register(
            ClassMetadata::new("app::Order", ClassKind::Entity)
                .identifier(&["id"])
                .field("id", FieldType::Plain)
                .association("items", AssociationMetadata::to_many("app::Item"))
                .audit(AuditAttributes::columns(["items"])),
        );

        let err = resolver_for(registry).resolve("app::Order").unwrap_err();
        assert!(matches!(err, AuditError::InvalidMapping(_)));
    }

    #[test]
    fn resolution_is_memoized_per_class() {
        let mut registry = MetadataRegistry::new();
        registry.register(
            ClassMetadata::new("app::Order", ClassKind::Entity)
                .identifier(&["id"])
                .field("id", FieldType::Plain)
                .field("total_items", FieldType::Plain)
                .audit(AuditAttributes::columns(["total_items"])),
        );

        let resolver = resolver_for(registry);
        let first = resolver.resolve("app::Order").unwrap();
        let second = resolver.resolve("app::Order").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
