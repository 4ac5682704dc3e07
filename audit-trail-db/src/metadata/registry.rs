use std::collections::{BTreeMap, BTreeSet};

use audit_trail_api::{AuditError, AuditResult};

use crate::metadata::class_metadata::{AssociationMetadata, ClassMetadata, FieldType};

/// Flattened view of a class with every inherited mapping pulled in.
///
/// Leaf declarations win over ancestor declarations of the same field name,
/// mirroring how a persistence engine overrides inherited mappings.
#[derive(Debug, Clone, Default)]
pub struct EffectiveMetadata {
    pub fields: BTreeMap<String, FieldType>,
    pub associations: BTreeMap<String, AssociationMetadata>,
    pub embedded_fields: BTreeSet<String>,
}

impl EffectiveMetadata {
    pub fn is_scalar_column(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// True for owning-side to-one associations only
    pub fn is_audited_association(&self, name: &str) -> bool {
        self.associations
            .get(name)
            .is_some_and(|assoc| assoc.owning && !assoc.to_many)
    }

    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.fields.get(name).copied()
    }
}

/// Process-wide registry of class mappings, populated once at startup by the
/// persistence integration. Immutable afterwards, hence freely shared.
#[derive(Debug, Default)]
pub struct MetadataRegistry {
    classes: BTreeMap<String, ClassMetadata>,
}

impl MetadataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, metadata: ClassMetadata) {
        self.classes.insert(metadata.name.clone(), metadata);
    }

    pub fn get(&self, class: &str) -> Option<&ClassMetadata> {
        self.classes.get(class)
    }

    /// All registered class names, for cache warming
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Explicit inheritance chain for `class`, root first, `class` last.
    ///
    /// Errors on a dangling or cyclic `parent` link, both of which are
    /// registration defects.
    pub fn ancestor_chain(&self, class: &str) -> AuditResult<Vec<&ClassMetadata>> {
        let mut chain = Vec::new();
        let mut current = self.classes.get(class);

        while let Some(meta) = current {
            if chain.iter().any(|seen: &&ClassMetadata| seen.name == meta.name) {
                return Err(AuditError::InvalidMapping(format!(
                    "Inheritance cycle detected at class \"{}\"",
                    meta.name
                )));
            }
            chain.push(meta);
            current = match &meta.parent {
                Some(parent) => Some(self.classes.get(parent).ok_or_else(|| {
                    AuditError::InvalidMapping(format!(
                        "Unknown parent class \"{parent}\" declared by \"{}\"",
                        meta.name
                    ))
                })?),
                None => None,
            };
        }

        chain.reverse();
        Ok(chain)
    }

    /// Merged field/association view of `class` including inherited mappings
    pub fn effective(&self, class: &str) -> AuditResult<EffectiveMetadata> {
        let mut effective = EffectiveMetadata::default();

        for level in self.ancestor_chain(class)? {
            for (name, ty) in &level.fields {
                effective.fields.insert(name.clone(), *ty);
            }
            for (name, assoc) in &level.associations {
                effective.associations.insert(name.clone(), assoc.clone());
            }
            for name in &level.embedded_fields {
                effective.embedded_fields.insert(name.clone());
            }
        }

        Ok(effective)
    }
}
