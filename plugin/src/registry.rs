use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use sugar_path::SugarPath;

use crate::id::ModuleId;
use crate::package::PackageCache;

/// Manifest field names accepted for bundle declarations, tried in order.
const BUNDLE_FIELDS: [&str; 2] = ["bundles", "bundle"];

/// A single asset reference: either a literal path applying to every build
/// variant, or a map keyed by build-variant name.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RefSpec {
    Literal(String),
    Variants(IndexMap<String, String>),
}

impl From<&str> for RefSpec {
    fn from(path: &str) -> Self {
        RefSpec::Literal(path.to_string())
    }
}

impl From<String> for RefSpec {
    fn from(path: String) -> Self {
        RefSpec::Literal(path)
    }
}

/// A bundle declaration extracted from a package manifest's non-standard
/// `bundles`/`bundle` field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BundleDeclaration {
    /// Asset references, in declared order.
    pub refs: Vec<RefSpec>,
    /// Side-effect imports emitted by the shim, in order.
    #[serde(default)]
    pub imports: Vec<String>,
    /// Named exports re-exported from the placeholder module.
    #[serde(default)]
    pub exports: Vec<String>,
    /// Global variable name the prebuilt asset binds to, if any.
    #[serde(default)]
    pub global: Option<String>,
    /// Package root relative to the project tree, forward slashes. Attached
    /// at registration time.
    #[serde(skip)]
    pub package_root: String,
}

/// Per-build set of modules recognized as virtual bundles, keyed by
/// normalized module id in first-registration order.
pub struct BundleRegistry {
    bundles: RwLock<IndexMap<String, Arc<BundleDeclaration>>>,
}

impl BundleRegistry {
    pub fn new() -> Self {
        Self {
            bundles: RwLock::new(IndexMap::new()),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.bundles.read().contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<Arc<BundleDeclaration>> {
        self.bundles.read().get(id).cloned()
    }

    /// Registers `specifier` as a bundle if its package manifest declares
    /// one, returning the synthetic module id. Registration is idempotent:
    /// the first write wins and a later call with the same id is a hit, not
    /// an overwrite, so racing resolutions of one specifier are safe.
    pub async fn maybe_register(
        &self,
        packages: &PackageCache,
        specifier: &str,
        context: Option<&Path>,
    ) -> Option<ModuleId> {
        let package = packages.lookup(specifier, context).await?;

        let mut decl = extract_declaration(&package.manifest)?;
        if decl.refs.is_empty() {
            return None;
        }

        let id = normalize_id(specifier, context);
        decl.package_root = package.root.to_slash_lossy().into_owned();

        self.bundles
            .write()
            .entry(id.clone())
            .or_insert_with(|| Arc::new(decl));

        Some(ModuleId::Bundle(id))
    }
}

impl Default for BundleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Pulls a bundle declaration out of a package manifest, accepting either
/// aliased field name. A value that is absent, not an object, an array, or
/// missing its `refs` array makes the specifier resolve through normal
/// means.
fn extract_declaration(manifest: &serde_json::Value) -> Option<BundleDeclaration> {
    for field in BUNDLE_FIELDS {
        let Some(value) = manifest.get(field) else {
            continue;
        };
        if value.is_null() {
            continue;
        }
        if !value.is_object() {
            return None;
        }
        return serde_json::from_value(value.clone()).ok();
    }

    None
}

/// Normalized module id: relative specifiers resolve against the context,
/// anything else is taken verbatim.
fn normalize_id(specifier: &str, context: Option<&Path>) -> String {
    match context {
        Some(ctx) if specifier.starts_with('.') => ctx
            .join(specifier)
            .normalize()
            .to_slash_lossy()
            .into_owned(),
        _ => specifier.to_string(),
    }
}
