pub mod id;
pub mod manifest;
pub mod options;
pub mod package;
pub mod plugin;
pub mod refs;
pub mod registry;
pub mod synth;

pub use id::ModuleId;
pub use options::{ManifestKind, ManifestOptions, PluginOptions};
pub use plugin::{BundlePlugin, EmittedAsset, OutputFile, OutputOptions, ResolvedId};
pub use registry::{BundleDeclaration, BundleRegistry, RefSpec};
