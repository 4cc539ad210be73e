mod base;
mod html;
mod json;
mod php;

pub use base::SectionBuckets;
pub use html::HtmlManifest;
pub use json::JsonManifest;
pub use php::PhpManifest;

use bindle_shared::BindleResult;

use crate::options::{ManifestKind, ManifestOptions};

/// A constructed manifest. Sections are partitioned when the manifest is
/// built; `render` is the single per-format extension point.
pub trait Manifest: std::fmt::Debug {
    fn is_empty(&self) -> bool;
    fn render(&self) -> BindleResult<String>;
}

/// Builds the manifest for the configured format. Construction errors are
/// wrapped with the declared kind so the user sees which configuration
/// block is at fault.
pub fn create_manifest(
    refs: &[String],
    options: &ManifestOptions,
) -> BindleResult<Box<dyn Manifest>> {
    let manifest = match options.kind {
        ManifestKind::Json => {
            JsonManifest::new(refs, options).map(|m| Box::new(m) as Box<dyn Manifest>)
        }
        ManifestKind::Php => {
            PhpManifest::new(refs, options).map(|m| Box::new(m) as Box<dyn Manifest>)
        }
        ManifestKind::Html => {
            HtmlManifest::new(refs, options).map(|m| Box::new(m) as Box<dyn Manifest>)
        }
    };

    manifest.map_err(|err| err.for_manifest(options.kind.as_str()))
}
