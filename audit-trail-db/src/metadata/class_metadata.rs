use std::collections::{BTreeMap, BTreeSet};

/// Role of a mapped class within the persistence model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    /// Concrete persisted entity
    Entity,
    /// Non-instantiable ancestor contributing mappings to subclasses
    MappedSuperclass,
    /// Embedded value object; never audited on its own
    Embeddable,
}

/// Declared type of a scalar column, resolved once per field.
///
/// Closed variant set driving value normalization: temporal types get a fixed
/// human-readable rendering, `Convertible` delegates to the storage dialect,
/// `Plain` stores the raw value's canonical string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Temporal value carrying an explicit UTC offset
    DateTimeTz,
    /// Naive temporal value, rendered at UTC
    DateTime,
    /// Converted through the active database platform before storage
    Convertible,
    /// Stored as-is
    Plain,
}

/// Mapping of a single association field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationMetadata {
    pub target_class: String,
    /// Collection-valued associations never produce audit entries
    pub to_many: bool,
    /// Only the owning side of an association is audited
    pub owning: bool,
}

impl AssociationMetadata {
    pub fn to_one(target_class: impl Into<String>) -> Self {
        Self {
            target_class: target_class.into(),
            to_many: false,
            owning: true,
        }
    }

    pub fn to_many(target_class: impl Into<String>) -> Self {
        Self {
            target_class: target_class.into(),
            to_many: true,
            owning: true,
        }
    }

    pub fn inverse(mut self) -> Self {
        self.owning = false;
        self
    }
}

/// Audit settings declared at one level of an inheritance chain
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditAttributes {
    /// Field names eligible for auditing; scalar columns and to-one
    /// associations share this set
    pub columns: Vec<String>,
    /// Deprecated: name of an entity property holding a one-shot comment.
    /// Only the root class of a chain may declare it.
    pub comment_property: Option<String>,
}

impl AuditAttributes {
    pub fn columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            comment_property: None,
        }
    }

    pub fn with_comment_property(mut self, property: impl Into<String>) -> Self {
        self.comment_property = Some(property.into());
        self
    }
}

/// Persistence mapping of one class, declared explicitly.
///
/// This is the resolver's and engine's whole view of a type: no live
/// reflection is consulted anywhere, inheritance is an explicit `parent` link.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMetadata {
    pub name: String,
    pub kind: ClassKind,
    /// Identifying field names; more than one means a composite identifier
    pub identifier: Vec<String>,
    /// Scalar columns declared at this level
    pub fields: BTreeMap<String, FieldType>,
    /// Associations declared at this level
    pub associations: BTreeMap<String, AssociationMetadata>,
    /// Names of embedded value fields declared at this level
    pub embedded_fields: BTreeSet<String>,
    /// Audit settings declared at this level, if any
    pub audit: Option<AuditAttributes>,
    /// Direct ancestor in the mapped-superclass chain
    pub parent: Option<String>,
}

impl ClassMetadata {
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind,
            identifier: Vec::new(),
            fields: BTreeMap::new(),
            associations: BTreeMap::new(),
            embedded_fields: BTreeSet::new(),
            audit: None,
            parent: None,
        }
    }

    pub fn identifier(mut self, fields: &[&str]) -> Self {
        self.identifier = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.insert(name.into(), ty);
        self
    }

    pub fn association(mut self, name: impl Into<String>, meta: AssociationMetadata) -> Self {
        self.associations.insert(name.into(), meta);
        self
    }

    pub fn embedded(mut self, name: impl Into<String>) -> Self {
        self.embedded_fields.insert(name.into());
        self
    }

    pub fn audit(mut self, attributes: AuditAttributes) -> Self {
        self.audit = Some(attributes);
        self
    }

    pub fn parent(mut self, name: impl Into<String>) -> Self {
        self.parent = Some(name.into());
        self
    }
}
