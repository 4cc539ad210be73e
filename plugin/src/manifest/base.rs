use bindle_shared::{BindleError, BindleResult, anyhow};
use indexmap::IndexMap;
use regex::Regex;

/// References partitioned into named buckets by per-section pattern.
///
/// Partitioning happens once, up front: each reference is tested against
/// every section's pattern, so a reference may land in several buckets, or
/// in none.
#[derive(Debug)]
pub struct SectionBuckets {
    sections: IndexMap<String, Vec<String>>,
}

impl SectionBuckets {
    pub fn partition(refs: &[String], patterns: &IndexMap<String, String>) -> BindleResult<Self> {
        let mut sections = IndexMap::new();

        for (name, pattern) in patterns {
            let regex = Regex::new(pattern).map_err(|err| {
                BindleError::Build(anyhow!("invalid pattern '{}' for section '{}': {}", pattern, name, err))
            })?;

            let bucket: Vec<String> = refs
                .iter()
                .filter(|r| regex.is_match(r))
                .cloned()
                .collect();

            sections.insert(name.clone(), bucket);
        }

        Ok(Self { sections })
    }

    /// True iff every section bucket is empty; used to skip emitting a
    /// manifest file when a build produced no matched references.
    pub fn is_empty(&self) -> bool {
        self.sections.values().all(|bucket| bucket.is_empty())
    }

    pub fn sections(&self) -> &IndexMap<String, Vec<String>> {
        &self.sections
    }
}
