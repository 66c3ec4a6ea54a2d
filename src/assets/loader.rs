use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::foundation::error::{CardError, CardResult};
use crate::raster::canvas::Raster;

/// Source of decoded images for backgrounds, element images and grid thumbnails.
///
/// Failures are reported as [`CardError::AssetLoad`]; renderers skip the element and carry on.
pub trait AssetLoader {
    /// Load and decode the image identified by `reference`.
    fn load(&mut self, reference: &str) -> CardResult<Raster>;
}

/// Loads images from disk, relative to a root directory, decoding each reference once.
pub struct FsAssetLoader {
    root: PathBuf,
    cache: HashMap<String, Raster>,
    decodes: HashMap<String, usize>,
}

impl FsAssetLoader {
    /// Create a loader resolving relative references under `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            cache: HashMap::new(),
            decodes: HashMap::new(),
        }
    }

    /// How many times `reference` has been decoded from disk.
    pub fn decode_count(&self, reference: &str) -> usize {
        self.decodes.get(reference).copied().unwrap_or(0)
    }

    fn path_for(&self, reference: &str) -> CardResult<PathBuf> {
        if reference.starts_with("http://") || reference.starts_with("https://") {
            return Err(CardError::asset_load(format!(
                "remote asset \"{reference}\" is not supported"
            )));
        }
        let path = Path::new(reference);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        Ok(self.root.join(normalize_rel_path(reference)?))
    }
}

impl AssetLoader for FsAssetLoader {
    fn load(&mut self, reference: &str) -> CardResult<Raster> {
        if let Some(hit) = self.cache.get(reference) {
            return Ok(hit.clone());
        }
        let path = self.path_for(reference)?;
        let bytes = std::fs::read(&path).map_err(|e| {
            CardError::asset_load(format!("read '{}': {e}", path.display()))
        })?;
        let raster = Raster::decode(&bytes)?;
        tracing::debug!(reference, size = ?raster.size(), "decoded asset");
        *self.decodes.entry(reference.to_owned()).or_default() += 1;
        self.cache.insert(reference.to_owned(), raster.clone());
        Ok(raster)
    }
}

/// Serves images registered up front; useful for embedding and for tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssetLoader {
    images: HashMap<String, Raster>,
    loads: usize,
}

impl MemoryAssetLoader {
    /// Empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `image` under `reference`.
    pub fn with(mut self, reference: impl Into<String>, image: Raster) -> Self {
        self.insert(reference, image);
        self
    }

    /// Register `image` under `reference`, replacing any previous entry.
    pub fn insert(&mut self, reference: impl Into<String>, image: Raster) {
        self.images.insert(reference.into(), image);
    }

    /// Number of successful loads served so far.
    pub fn loads(&self) -> usize {
        self.loads
    }
}

impl AssetLoader for MemoryAssetLoader {
    fn load(&mut self, reference: &str) -> CardResult<Raster> {
        let image = self
            .images
            .get(reference)
            .cloned()
            .ok_or_else(|| CardError::asset_load(format!("unknown asset \"{reference}\"")))?;
        self.loads += 1;
        Ok(image)
    }
}

/// Normalize a relative asset reference.
///
/// The result uses `/` separators and drops `.` segments; parent traversals (`..`) and empty
/// references are rejected.
pub(crate) fn normalize_rel_path(source: &str) -> CardResult<String> {
    let s = source.replace('\\', "/");
    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(CardError::asset_load(format!(
                "asset \"{source}\" must not contain '..'"
            )));
        }
        out.push(part);
    }
    if out.is_empty() {
        return Err(CardError::asset_load("asset reference must name a file"));
    }
    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
