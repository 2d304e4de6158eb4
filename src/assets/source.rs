use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::foundation::{
    core::Category,
    error::{EmojiError, EmojiResult},
};

/// Encoding family of a variant source, decided from its file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// SVG document. Rasterized for compositing and merged for vector export.
    Svg,
    /// Bitmap image (PNG, JPEG, WebP). Composited only.
    Raster,
}

impl AssetKind {
    /// Classify a file name by extension; `None` for unsupported files.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "svg" => Some(AssetKind::Svg),
            "png" | "jpg" | "jpeg" | "webp" => Some(AssetKind::Raster),
            _ => None,
        }
    }
}

/// Opaque locator of one variant source.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssetRef {
    /// Category the source belongs to.
    pub category: Category,
    /// Normalized relative locator, e.g. `eyes/wink.svg`.
    pub locator: String,
    /// Encoding family.
    pub kind: AssetKind,
}

impl AssetRef {
    /// Build a reference for `file_name` inside `category`'s directory.
    pub fn new(category: Category, file_name: &str) -> EmojiResult<Self> {
        let kind = AssetKind::from_file_name(file_name).ok_or_else(|| {
            EmojiError::asset(format!("unsupported asset file '{file_name}'"))
        })?;
        let locator = normalize_rel_path(&format!("{}/{file_name}", category.dir_name()))?;
        Ok(Self {
            category,
            locator,
            kind,
        })
    }

    /// File name component of the locator.
    pub fn file_name(&self) -> &str {
        self.locator
            .rsplit_once('/')
            .map_or(self.locator.as_str(), |(_, name)| name)
    }
}

/// Collaborator that enumerates and reads variant sources.
///
/// `list` must return references in a stable order; the library keeps that order.
pub trait AssetSource: Send + Sync {
    /// Enumerate sources for `category`. A missing category yields an empty list.
    fn list(&self, category: Category) -> EmojiResult<Vec<AssetRef>>;
    /// Read the raw bytes of one source.
    fn read(&self, asset: &AssetRef) -> EmojiResult<Vec<u8>>;
}

/// Filesystem source: `<root>/<category dir>/<file>`.
#[derive(Clone, Debug)]
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Asset root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirAssetSource {
    fn list(&self, category: Category) -> EmojiResult<Vec<AssetRef>> {
        let dir = self.root.join(category.dir_name());
        let Ok(rd) = std::fs::read_dir(&dir) else {
            tracing::debug!(dir = %dir.display(), "category directory missing");
            return Ok(Vec::new());
        };

        let mut names = Vec::new();
        for entry in rd.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            if AssetKind::from_file_name(name).is_some() {
                names.push(name.to_string());
            }
        }
        names.sort();

        names
            .iter()
            .map(|name| AssetRef::new(category, name))
            .collect()
    }

    fn read(&self, asset: &AssetRef) -> EmojiResult<Vec<u8>> {
        let path = self.root.join(Path::new(&asset.locator));
        std::fs::read(&path)
            .with_context(|| format!("read asset bytes from '{}'", path.display()))
            .map_err(EmojiError::from)
    }
}

/// In-memory source keyed by category and file name. Listing is lexicographic by name.
#[derive(Clone, Debug, Default)]
pub struct MemoryAssetSource {
    files: BTreeMap<(Category, String), Vec<u8>>,
}

impl MemoryAssetSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file.
    pub fn insert(&mut self, category: Category, file_name: impl Into<String>, bytes: Vec<u8>) {
        self.files.insert((category, file_name.into()), bytes);
    }

    /// Builder-style [`MemoryAssetSource::insert`].
    pub fn with(mut self, category: Category, file_name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(category, file_name, bytes.into());
        self
    }
}

impl AssetSource for MemoryAssetSource {
    fn list(&self, category: Category) -> EmojiResult<Vec<AssetRef>> {
        self.files
            .keys()
            .filter(|(c, _)| *c == category)
            .filter(|(_, name)| AssetKind::from_file_name(name).is_some())
            .map(|(c, name)| AssetRef::new(*c, name))
            .collect()
    }

    fn read(&self, asset: &AssetRef) -> EmojiResult<Vec<u8>> {
        self.files
            .get(&(asset.category, asset.file_name().to_string()))
            .cloned()
            .ok_or_else(|| EmojiError::asset(format!("unknown asset '{}'", asset.locator)))
    }
}

/// Normalize and validate root-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> EmojiResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(EmojiError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(EmojiError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(EmojiError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(EmojiError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
