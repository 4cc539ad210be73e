use bindle_shared::BindleResult;

use super::Manifest;
use super::base::SectionBuckets;
use crate::options::ManifestOptions;

/// PHP manifest: the section mapping rendered as a returned array literal.
#[derive(Debug)]
pub struct PhpManifest {
    buckets: SectionBuckets,
}

impl PhpManifest {
    pub fn new(refs: &[String], options: &ManifestOptions) -> BindleResult<Self> {
        Ok(Self {
            buckets: SectionBuckets::partition(refs, &options.sections)?,
        })
    }
}

impl Manifest for PhpManifest {
    fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn render(&self) -> BindleResult<String> {
        let mut out = String::from("<?php\nreturn array(\n");

        for (name, bucket) in self.buckets.sections() {
            out.push_str(&format!("  {} => array(\n", quote(name)));
            for r in bucket {
                out.push_str(&format!("    {},\n", quote(r)));
            }
            out.push_str("  ),\n");
        }

        out.push_str(");\n");
        Ok(out)
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
