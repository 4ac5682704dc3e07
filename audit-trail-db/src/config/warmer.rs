use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use audit_trail_api::{AuditError, AuditResult};

use crate::config::resolver::{AuditConfig, ConfigResolver};
use crate::metadata::MetadataRegistry;

/// Cache file for a class, under `base`: namespace separators become path
/// separators, e.g. `app::billing::Order` -> `app/billing/Order.json`.
pub fn cache_file_path(base: &Path, class: &str) -> PathBuf {
    let relative = class.trim_start_matches("::").replace("::", "/");
    base.join(format!("{relative}.json"))
}

/// Build-time producer of the configuration cache artifact.
///
/// Writes one JSON file per audited class so runtime lookups can skip the
/// metadata walk entirely. Classes that resolve to an empty column set get no
/// file.
pub struct MetadataWarmer {
    registry: Arc<MetadataRegistry>,
    resolver: Arc<dyn ConfigResolver>,
}

impl MetadataWarmer {
    pub fn new(registry: Arc<MetadataRegistry>, resolver: Arc<dyn ConfigResolver>) -> Self {
        Self { registry, resolver }
    }

    pub fn warm(&self, cache_dir: &Path) -> AuditResult<()> {
        for class in self.registry.class_names() {
            let config = self.resolver.resolve(class)?;
            if !config.is_audited() {
                continue;
            }

            let path = cache_file_path(cache_dir, class);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|err| {
                    AuditError::Cache(format!(
                        "Can not create metadata cache directory {}: {err}",
                        parent.display()
                    ))
                })?;
            }

            let data = serde_json::to_vec_pretty(config.as_ref())
                .map_err(|err| AuditError::Cache(err.to_string()))?;
            fs::write(&path, data).map_err(|err| {
                AuditError::Cache(format!(
                    "Failed to write metadata cache for class \"{class}\": {err}"
                ))
            })?;

            tracing::debug!(class, path = %path.display(), "warmed auditable metadata");
        }

        Ok(())
    }
}

/// Resolver that prefers the warmed artifact over recomputation.
///
/// A present cache file is read back verbatim; a missing one falls through to
/// the inner resolver. Either outcome is memoized for the process lifetime.
pub struct CachedConfigResolver {
    cache_dir: PathBuf,
    inner: Arc<dyn ConfigResolver>,
    cache: RwLock<HashMap<String, Arc<AuditConfig>>>,
}

impl CachedConfigResolver {
    pub fn new(cache_dir: impl Into<PathBuf>, inner: Arc<dyn ConfigResolver>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn read_artifact(&self, class: &str) -> AuditResult<Option<AuditConfig>> {
        let path = cache_file_path(&self.cache_dir, class);
        if !path.is_file() {
            return Ok(None);
        }

        let data = fs::read_to_string(&path).map_err(|err| {
            AuditError::Cache(format!(
                "Failed to read metadata cache {}: {err}",
                path.display()
            ))
        })?;
        let config = serde_json::from_str(&data).map_err(|err| {
            AuditError::Cache(format!(
                "Corrupt metadata cache {}: {err}",
                path.display()
            ))
        })?;

        Ok(Some(config))
    }
}

impl ConfigResolver for CachedConfigResolver {
    fn resolve(&self, class: &str) -> AuditResult<Arc<AuditConfig>> {
        if let Some(config) = self.cache.read().get(class) {
            return Ok(Arc::clone(config));
        }

        let config = match self.read_artifact(class)? {
            Some(config) => Arc::new(config),
            None => self.inner.resolve(class)?,
        };

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
    use crate::config::resolver::MetadataConfigResolver;
    use crate::metadata::{AuditAttributes, ClassKind, ClassMetadata, FieldType};

    fn audited_registry() -> Arc<MetadataRegistry> {
        let mut registry = MetadataRegistry::new();
        registry.register(
            ClassMetadata::new("app::billing::Order", ClassKind::Entity)
                .identifier(&["id"])
                .field("id", FieldType::Plain)
                .field("total_items", FieldType::Plain)
                .audit(AuditAttributes::columns(["total_items"])),
        );
        registry.register(
            ClassMetadata::new("app::billing::Draft", ClassKind::Entity)
                .identifier(&["id"])
                .field("id", FieldType::Plain),
        );
        Arc::new(registry)
    }

    #[test]
    fn cache_path_substitutes_namespace_separators() {
        let path = cache_file_path(Path::new("/tmp/cache"), "app::billing::Order");
        assert_eq!(path, Path::new("/tmp/cache/app/billing/Order.json"));
    }

    #[test]
    fn warm_writes_one_file_per_audited_class() {
        let registry = audited_registry();
        let resolver = Arc::new(MetadataConfigResolver::new(Arc::clone(&registry)));
        let dir = tempfile::tempdir().unwrap();

        MetadataWarmer::new(registry, resolver)
            .warm(dir.path())
            .unwrap();

        assert!(cache_file_path(dir.path(), "app::billing::Order").is_file());
        assert!(!cache_file_path(dir.path(), "app::billing::Draft").exists());
    }

    #[test]
    fn cached_resolver_reads_the_warmed_artifact_verbatim() {
        let registry = audited_registry();
        let resolver = Arc::new(MetadataConfigResolver::new(Arc::clone(&registry)));
        let dir = tempfile::tempdir().unwrap();

        MetadataWarmer::new(registry, Arc::clone(&resolver) as Arc<dyn ConfigResolver>)
            .warm(dir.path())
            .unwrap();

        // Inner resolver knows nothing; only the artifact can answer
        let empty = Arc::new(MetadataConfigResolver::new(Arc::new(
            MetadataRegistry::new(),
        )));
        let cached = CachedConfigResolver::new(dir.path(), empty);

        let config = cached.resolve("app::billing::Order").unwrap();
        assert!(config.columns.contains("total_items"));
    }

    #[test]
    fn cached_resolver_falls_back_to_inner_without_artifact() {
        let registry = audited_registry();
        let inner = Arc::new(MetadataConfigResolver::new(registry));
        let dir = tempfile::tempdir().unwrap();
        let cached = CachedConfigResolver::new(dir.path(), inner);

        let config = cached.resolve("app::billing::Order").unwrap();
        assert!(config.is_audited());
    }
}
