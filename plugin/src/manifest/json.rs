use bindle_shared::BindleResult;

use super::Manifest;
use super::base::SectionBuckets;
use crate::options::ManifestOptions;

/// JSON manifest: the section mapping serialized directly.
#[derive(Debug)]
pub struct JsonManifest {
    buckets: SectionBuckets,
}

impl JsonManifest {
    pub fn new(refs: &[String], options: &ManifestOptions) -> BindleResult<Self> {
        Ok(Self {
            buckets: SectionBuckets::partition(refs, &options.sections)?,
        })
    }
}

impl Manifest for JsonManifest {
    fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn render(&self) -> BindleResult<String> {
        Ok(serde_json::to_string(self.buckets.sections())?)
    }
}
