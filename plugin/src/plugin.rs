use indexmap::{IndexMap, IndexSet};
use log::debug;
use parking_lot::{Mutex, RwLock};
use std::path::{Path, PathBuf};

use bindle_shared::BindleResult;

use crate::id::ModuleId;
use crate::manifest::create_manifest;
use crate::options::{ManifestKind, ManifestOptions, PluginOptions};
use crate::package::PackageCache;
use crate::refs::{ReferenceList, join_slash};
use crate::registry::{BundleRegistry, RefSpec};
use crate::synth::synthesize;

/// Resolution result handed back to the host bundler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedId {
    pub id: String,
    /// External modules are never resolved further by the host.
    pub external: bool,
}

/// Output-phase options reported by the host.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Output directory output-file references are joined under.
    pub dir: Option<String>,
}

/// One file of the final build output, with the module ids it imports.
#[derive(Debug, Clone)]
pub struct OutputFile {
    pub file_name: String,
    pub imports: Vec<String>,
}

impl OutputFile {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            imports: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_imports(mut self, imports: Vec<String>) -> Self {
        self.imports = imports;
        self
    }
}

/// An asset the host is asked to emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedAsset {
    pub file_name: String,
    pub source: String,
}

/// The plugin core. Exposes the four lifecycle operations the host bundler
/// drives: resolve a specifier, load a module body, configure output
/// globals, and observe the final chunk graph to emit the manifest.
///
/// All per-build state sits behind interior mutability so the host can call
/// resolve/load hooks in any interleaving; registration is idempotent, so
/// racing resolutions of the same specifier converge.
pub struct BundlePlugin {
    build_type: String,
    manifest_options: ManifestOptions,
    prepend_refs: Vec<RefSpec>,
    append_refs: Vec<RefSpec>,
    disable_output_refs: bool,

    packages: PackageCache,
    bundles: BundleRegistry,
    import_order: Mutex<IndexSet<String>>,
    globals: RwLock<IndexMap<String, String>>,
    refs: Mutex<ReferenceList>,
}

impl BundlePlugin {
    /// Creates the plugin, validating manifest configuration up front so
    /// configuration errors surface before any build work happens.
    pub fn new(options: PluginOptions) -> BindleResult<Self> {
        let manifest_options = options
            .manifest
            .unwrap_or_else(|| ManifestOptions::new(ManifestKind::Json));
        manifest_options.validate()?;

        Ok(Self {
            packages: PackageCache::new(options.node_modules_path),
            bundles: BundleRegistry::new(),
            import_order: Mutex::new(IndexSet::new()),
            globals: RwLock::new(IndexMap::new()),
            refs: Mutex::new(ReferenceList::new(options.build_type.clone())),
            build_type: options.build_type,
            manifest_options,
            prepend_refs: options.prepend_refs,
            append_refs: options.append_refs,
            disable_output_refs: options.disable_output_refs,
        })
    }

    /// Host resolve hook. Extern placeholders resolve to themselves, marked
    /// external; known bundle ids short-circuit; anything else goes through
    /// the package metadata cache and, if its manifest declares a bundle,
    /// registers it and returns the synthetic id.
    pub async fn resolve_id(&self, specifier: &str, importer: Option<&str>) -> Option<ResolvedId> {
        if let ModuleId::Extern(_) = ModuleId::parse(specifier) {
            return Some(ResolvedId {
                id: specifier.to_string(),
                external: true,
            });
        }

        if self.bundles.contains(specifier) {
            return Some(ResolvedId {
                id: ModuleId::Bundle(specifier.to_string()).to_string(),
                external: false,
            });
        }

        let context = importer.map(importer_dir);
        let id = self
            .bundles
            .maybe_register(&self.packages, specifier, context.as_deref())
            .await?;

        debug!("registered bundle '{}'", id.name());

        Some(ResolvedId {
            id: id.to_string(),
            external: false,
        })
    }

    /// Host load hook: shim source for synthetic bundle ids. Registers the
    /// bundle's global-name binding as a side effect.
    pub fn load(&self, id: &str) -> Option<String> {
        let ModuleId::Bundle(bundle_id) = ModuleId::parse(id) else {
            return None;
        };

        let decl = self.bundles.get(&bundle_id)?;
        if decl.refs.is_empty() {
            return None;
        }

        if let Some(global) = &decl.global {
            let extern_id = ModuleId::Extern(bundle_id.clone()).to_string();
            self.globals.write().insert(extern_id, global.clone());
        }

        synthesize(&bundle_id, &decl)
    }

    /// Extern-placeholder-id to global-name bindings, for the host's
    /// output-globals configuration.
    pub fn output_globals(&self) -> IndexMap<String, String> {
        self.globals.read().clone()
    }

    /// Host generate hook: captures which bundles the output chunks import,
    /// assembles the reference list, and renders the manifest. Returns the
    /// asset the host should emit, or `None` when every section is empty.
    ///
    /// Reference state is cleared exactly once per cycle, emitted file or
    /// not, so consecutive builds with identical inputs produce identical
    /// manifests.
    pub fn generate_bundle(
        &self,
        output: &OutputOptions,
        files: &[OutputFile],
    ) -> BindleResult<Option<EmittedAsset>> {
        self.capture_imports(files);

        self.add_bundle_refs();
        self.add_additional_refs();
        self.add_output_refs(output, files);

        let result = self.create_manifest_file();

        self.refs.lock().reset();
        self.import_order.lock().clear();

        result
    }

    /// Records extern imports per output file in report order. First
    /// occurrence wins; re-capturing an id is a no-op.
    fn capture_imports(&self, files: &[OutputFile]) {
        let mut order = self.import_order.lock();
        for file in files {
            for import in &file.imports {
                if let ModuleId::Extern(id) = ModuleId::parse(import) {
                    order.insert(id);
                }
            }
        }
    }

    /// Bundle references, in import order. Local builds reference assets in
    /// place under the package root so files under the module-root directory
    /// stay reachable.
    fn add_bundle_refs(&self) {
        let order = self.import_order.lock();
        let mut refs = self.refs.lock();

        for id in order.iter() {
            let Some(decl) = self.bundles.get(id) else {
                continue;
            };

            let root = (self.build_type == "local").then_some(decl.package_root.as_str());
            for spec in &decl.refs {
                refs.append(spec, root);
            }
        }
    }

    fn add_additional_refs(&self) {
        let mut refs = self.refs.lock();

        // prepend() inserts at the front, so feeding the configured list in
        // reverse keeps its order front to back.
        for spec in self.prepend_refs.iter().rev() {
            refs.prepend(spec, None);
        }

        for spec in &self.append_refs {
            refs.append(spec, None);
        }
    }

    fn add_output_refs(&self, output: &OutputOptions, files: &[OutputFile]) {
        if self.disable_output_refs {
            return;
        }

        let mut refs = self.refs.lock();
        for file in files {
            let path = match &output.dir {
                Some(dir) => join_slash(dir, &file.file_name),
                None => file.file_name.clone(),
            };
            refs.append(&RefSpec::Literal(path), None);
        }
    }

    fn create_manifest_file(&self) -> BindleResult<Option<EmittedAsset>> {
        let refs = self.refs.lock();

        let manifest = create_manifest(refs.list(), &self.manifest_options)?;
        if manifest.is_empty() {
            return Ok(None);
        }

        let source = manifest
            .render()
            .map_err(|err| err.for_manifest(self.manifest_options.kind.as_str()))?;

        debug!(
            "manifest '{}' generated from {} refs",
            self.manifest_options.file_name,
            refs.list().len()
        );

        Ok(Some(EmittedAsset {
            file_name: self.manifest_options.file_name.clone(),
            source,
        }))
    }
}

/// Resolution context for a specifier: the importer's directory.
fn importer_dir(importer: &str) -> PathBuf {
    Path::new(importer)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}
