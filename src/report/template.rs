//! Template loading with optional in-memory caching.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use moka::sync::Cache;

use super::RenderError;

/// Reads report templates from the configured directory.
///
/// When caching is enabled the template source is kept in memory keyed by
/// filename, so repeated renders skip the disk read.
pub struct TemplateStore {
    directory: PathBuf,
    cache: Option<Cache<String, Arc<String>>>,
}

impl TemplateStore {
    pub fn new(directory: PathBuf, cache_templates: bool) -> Self {
        let cache = cache_templates.then(|| Cache::builder().max_capacity(16).build());
        Self { directory, cache }
    }

    pub fn load(&self, name: &str) -> Result<Arc<String>, RenderError> {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(name) {
                return Ok(hit);
            }
        }

        let path = self.directory.join(name);
        if !path.is_file() {
            return Err(RenderError::TemplateNotFound(name.to_string()));
        }
        let source = Arc::new(fs::read_to_string(&path).map_err(RenderError::TemplateIo)?);

        if let Some(cache) = &self.cache {
            cache.insert(name.to_string(), Arc::clone(&source));
        }
        Ok(source)
    }
}
