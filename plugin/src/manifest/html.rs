use bindle_shared::{BindleError, BindleResult};
use regex::{Captures, Regex};
use std::path::PathBuf;
use std::sync::LazyLock;

use super::Manifest;
use super::base::SectionBuckets;
use crate::options::ManifestOptions;

/// `{{ manifest.<section> }}` placeholders in the template text.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*manifest\.([A-Za-z0-9_-]+)\s*\}\}").unwrap()
});

/// HTML manifest: the section mapping substituted into a user-supplied
/// template file.
#[derive(Debug)]
pub struct HtmlManifest {
    buckets: SectionBuckets,
    template: PathBuf,
}

impl HtmlManifest {
    pub fn new(refs: &[String], options: &ManifestOptions) -> BindleResult<Self> {
        let template = options
            .template
            .clone()
            .ok_or(BindleError::MissingOption("template"))?;

        Ok(Self {
            buckets: SectionBuckets::partition(refs, &options.sections)?,
            template,
        })
    }
}

impl Manifest for HtmlManifest {
    fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn render(&self) -> BindleResult<String> {
        let template = fs_err::read_to_string(&self.template)?;

        let rendered = PLACEHOLDER.replace_all(&template, |caps: &Captures| {
            match self.buckets.sections().get(&caps[1]) {
                Some(bucket) => bucket.join("\n"),
                None => String::new(),
            }
        });

        Ok(rendered.into_owned())
    }
}
