use log::warn;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use sugar_path::SugarPath;

/// A package's resolved root directory and its parsed manifest.
#[derive(Debug)]
pub struct PackageDescriptor {
    pub root: PathBuf,
    pub manifest: serde_json::Value,
}

/// Process-wide cache of package manifests, keyed by resolved package root.
///
/// Entries live for the duration of one build session and are never
/// invalidated; a manifest changing on disk mid-session goes unnoticed.
pub struct PackageCache {
    node_modules_path: PathBuf,
    entries: RwLock<HashMap<PathBuf, Arc<PackageDescriptor>>>,
}

impl PackageCache {
    pub fn new(node_modules_path: PathBuf) -> Self {
        Self {
            node_modules_path,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Looks up the package manifest governing `specifier`.
    ///
    /// A relative specifier with a resolution context is resolved against
    /// that context; anything else is resolved against the module-root
    /// directory. A missing manifest file is a definitive "not found", not
    /// an error. A manifest that exists but fails to parse is logged and
    /// treated as not found.
    pub async fn lookup(
        &self,
        specifier: &str,
        context: Option<&Path>,
    ) -> Option<Arc<PackageDescriptor>> {
        for root in self.candidate_roots(specifier, context) {
            if let Some(entry) = self.entries.read().get(&root) {
                return Some(entry.clone());
            }

            let manifest_path = root.join("package.json");
            let Ok(data) = tokio::fs::read(&manifest_path).await else {
                continue;
            };

            match serde_json::from_slice(&data) {
                Ok(manifest) => {
                    let entry = Arc::new(PackageDescriptor {
                        root: root.clone(),
                        manifest,
                    });
                    // Racing lookups converge on identical values, so the
                    // last writer winning is harmless.
                    self.entries.write().insert(root, entry.clone());
                    return Some(entry);
                }
                Err(_) => {
                    warn!("Failed to parse JSON in '{}'", manifest_path.display());
                }
            }
        }

        None
    }

    /// Candidate package roots for a specifier, tried in order: the
    /// context-relative root for relative specifiers, the module-root
    /// directory otherwise.
    fn candidate_roots(&self, specifier: &str, context: Option<&Path>) -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        match context {
            Some(ctx) if specifier.starts_with('.') => {
                candidates.push(ctx.join(specifier).normalize());
            }
            _ => {
                candidates.push(self.node_modules_path.join(specifier));
            }
        }

        candidates
    }
}
