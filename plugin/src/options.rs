use bindle_shared::{BindleError, BindleResult};
use indexmap::IndexMap;
use std::path::PathBuf;

use crate::registry::RefSpec;

/// Output manifest format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
    Json,
    Php,
    Html,
}

impl ManifestKind {
    /// Parses a declared format kind. Unknown kinds are a configuration
    /// error naming the invalid kind.
    pub fn parse(kind: &str) -> BindleResult<Self> {
        match kind {
            "json" => Ok(ManifestKind::Json),
            "php" => Ok(ManifestKind::Php),
            "html" => Ok(ManifestKind::Html),
            other => Err(BindleError::InvalidManifestType(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ManifestKind::Json => "json",
            ManifestKind::Php => "php",
            ManifestKind::Html => "html",
        }
    }

    fn default_file_name(self) -> &'static str {
        match self {
            ManifestKind::Json => "manifest.json",
            ManifestKind::Php => "manifest.php",
            ManifestKind::Html => "manifest.html",
        }
    }
}

fn default_sections() -> IndexMap<String, String> {
    IndexMap::from([
        ("scripts".to_string(), r"\.js$".to_string()),
        ("styles".to_string(), r"\.css$".to_string()),
    ])
}

/// Configuration for the emitted manifest file.
#[derive(Debug, Clone)]
pub struct ManifestOptions {
    /// Output format.
    pub kind: ManifestKind,
    /// File name the host is asked to emit the manifest under.
    pub file_name: String,
    /// Section name to match pattern, in output order.
    pub sections: IndexMap<String, String>,
    /// Template file path; required for the HTML format.
    pub template: Option<PathBuf>,
}

impl ManifestOptions {
    /// Built-in defaults for a format kind: `manifest.<ext>` with `scripts`
    /// and `styles` sections.
    pub fn new(kind: ManifestKind) -> Self {
        Self {
            kind,
            file_name: kind.default_file_name().to_string(),
            sections: default_sections(),
            template: None,
        }
    }

    /// Defaults for a kind declared by name.
    pub fn of_type(kind: &str) -> BindleResult<Self> {
        Ok(Self::new(ManifestKind::parse(kind)?))
    }

    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    #[must_use]
    pub fn with_sections(mut self, sections: IndexMap<String, String>) -> Self {
        self.sections = sections;
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<PathBuf>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub(crate) fn validate(&self) -> BindleResult {
        if self.file_name.is_empty() {
            return Err(BindleError::MissingOption("fileName").for_manifest(self.kind.as_str()));
        }
        if self.kind == ManifestKind::Html && self.template.is_none() {
            return Err(BindleError::MissingOption("template").for_manifest(self.kind.as_str()));
        }
        Ok(())
    }
}

/// Build-time configuration handed over by the host.
#[derive(Debug, Clone)]
pub struct PluginOptions {
    /// Active build variant; selects which entries of multi-variant refs
    /// apply.
    pub build_type: String,
    /// Module-root directory for non-relative specifier lookups.
    pub node_modules_path: PathBuf,
    /// Manifest configuration; absent means the built-in JSON default.
    pub manifest: Option<ManifestOptions>,
    /// References inserted at the front of the final list, in order.
    pub prepend_refs: Vec<RefSpec>,
    /// References added after the bundle references, in order.
    pub append_refs: Vec<RefSpec>,
    /// Skip recording the build's real output files in the manifest.
    pub disable_output_refs: bool,
}

impl PluginOptions {
    /// Creates options with default values:
    /// build type `local`, module root `node_modules`.
    pub fn new() -> Self {
        Self {
            build_type: "local".to_string(),
            node_modules_path: PathBuf::from("node_modules"),
            manifest: None,
            prepend_refs: Vec::new(),
            append_refs: Vec::new(),
            disable_output_refs: false,
        }
    }

    #[must_use]
    pub fn with_build_type(mut self, build_type: impl Into<String>) -> Self {
        self.build_type = build_type.into();
        self
    }

    #[must_use]
    pub fn with_node_modules_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.node_modules_path = path.into();
        self
    }

    #[must_use]
    pub fn with_manifest(mut self, manifest: ManifestOptions) -> Self {
        self.manifest = Some(manifest);
        self
    }

    #[must_use]
    pub fn with_prepend_refs(mut self, refs: Vec<RefSpec>) -> Self {
        self.prepend_refs = refs;
        self
    }

    #[must_use]
    pub fn with_append_refs(mut self, refs: Vec<RefSpec>) -> Self {
        self.append_refs = refs;
        self
    }

    #[must_use]
    pub fn with_disable_output_refs(mut self, disable: bool) -> Self {
        self.disable_output_refs = disable;
        self
    }
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self::new()
    }
}
