use std::path::Path;
use sugar_path::SugarPath;

use crate::registry::RefSpec;

/// Ordered list of asset references assembled over one build cycle.
///
/// Multi-variant refs are filtered against the active build type: an entry
/// keyed by another variant contributes nothing, since assets may
/// legitimately not exist for every variant.
#[derive(Debug)]
pub struct ReferenceList {
    build_type: String,
    refs: Vec<String>,
}

impl ReferenceList {
    pub fn new(build_type: impl Into<String>) -> Self {
        Self {
            build_type: build_type.into(),
            refs: Vec::new(),
        }
    }

    /// Appends `spec` if it applies to the active build variant.
    pub fn append(&mut self, spec: &RefSpec, root: Option<&str>) {
        if let Some(path) = self.resolve(spec, root) {
            self.refs.push(path);
        }
    }

    /// Inserts at the front. Each subsequent prepend lands before the
    /// previous one.
    pub fn prepend(&mut self, spec: &RefSpec, root: Option<&str>) {
        if let Some(path) = self.resolve(spec, root) {
            self.refs.insert(0, path);
        }
    }

    pub fn list(&self) -> &[String] {
        &self.refs
    }

    /// Empties the list. Called exactly once per build cycle, after the
    /// manifest has been produced.
    pub fn reset(&mut self) {
        self.refs.clear();
    }

    /// Literal paths pass through untouched; variant maps keep only the
    /// entry for the active build type, joined under `root` when one is
    /// supplied.
    fn resolve(&self, spec: &RefSpec, root: Option<&str>) -> Option<String> {
        match spec {
            RefSpec::Literal(path) => Some(path.clone()),
            RefSpec::Variants(variants) => {
                let path = variants.get(self.build_type.as_str())?;
                Some(match root {
                    Some(root) => join_slash(root, path),
                    None => path.clone(),
                })
            }
        }
    }
}

/// Posix-style join with forward slashes regardless of platform.
pub(crate) fn join_slash(root: &str, path: &str) -> String {
    Path::new(root)
        .join(path)
        .normalize()
        .to_slash_lossy()
        .into_owned()
}
