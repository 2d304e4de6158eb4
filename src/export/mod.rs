//! Raster and vector export through the save-dialog and file-write collaborators.

/// Save-dialog and file-write collaborators.
pub mod dialog;
/// Merged SVG document construction.
pub mod vector;

use std::path::PathBuf;

use crate::{
    assets::{library::AssetLibrary, source::AssetKind, source::AssetSource},
    export::dialog::{FileWriter, SaveDialog, SaveRequest},
    foundation::{
        config::StudioConfig,
        core::{Category, PerCategory},
        error::{EmojiError, EmojiResult},
    },
    render::surface::Surface,
};

/// Export target format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Flattened composite encoded as PNG.
    Png,
    /// Merged SVG document.
    Svg,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
        }
    }
}

/// What an export attempt did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Bytes were written to `path`.
    Saved {
        /// Destination chosen in the dialog.
        path: PathBuf,
        /// Number of bytes written.
        bytes: usize,
    },
    /// The dialog was cancelled; nothing was written.
    Cancelled,
    /// There was nothing to export (no composite drawn yet); the dialog was not shown.
    Skipped,
}

/// Runs exports against a pair of injected collaborators.
pub struct Exporter {
    dialog: Box<dyn SaveDialog>,
    writer: Box<dyn FileWriter>,
}

impl Exporter {
    /// Create an exporter.
    pub fn new(dialog: Box<dyn SaveDialog>, writer: Box<dyn FileWriter>) -> Self {
        Self { dialog, writer }
    }

    /// Encode `surface` as PNG and save it. `None` (nothing drawn yet) is a silent no-op.
    #[tracing::instrument(skip_all)]
    pub fn export_png(
        &mut self,
        surface: Option<&Surface>,
        config: &StudioConfig,
    ) -> EmojiResult<ExportOutcome> {
        let Some(surface) = surface else {
            tracing::debug!("no composite drawn yet, skipping png export");
            return Ok(ExportOutcome::Skipped);
        };
        let bytes = surface.encode_png()?;
        self.save(ExportFormat::Png, &bytes, config)
    }

    /// Merge the selected SVG variants in z-order and save the result.
    ///
    /// None slots, empty categories and raster variants contribute nothing.
    #[tracing::instrument(skip_all)]
    pub fn export_svg(
        &mut self,
        library: &AssetLibrary,
        source: &dyn AssetSource,
        selection: &PerCategory<usize>,
        config: &StudioConfig,
    ) -> EmojiResult<ExportOutcome> {
        let docs = selected_svg_documents(library, source, selection)?;
        let merged = vector::merge_svg_documents(&docs, config.vector_size)?;
        self.save(ExportFormat::Svg, merged.as_bytes(), config)
    }

    fn save(
        &mut self,
        format: ExportFormat,
        bytes: &[u8],
        config: &StudioConfig,
    ) -> EmojiResult<ExportOutcome> {
        let request = SaveRequest {
            title: config.save_title.clone(),
            default_file_name: config.suggested_file_name(format.extension()),
        };
        let Some(path) = self.dialog.prompt(&request) else {
            tracing::debug!(format = format.extension(), "save dialog cancelled");
            return Ok(ExportOutcome::Cancelled);
        };

        self.writer
            .write(&path, bytes)
            .map_err(|e| EmojiError::export(format!("write '{}': {e}", path.display())))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "export written");
        Ok(ExportOutcome::Saved {
            path,
            bytes: bytes.len(),
        })
    }
}

/// Raw text of every selected SVG variant, in category order.
pub fn selected_svg_documents(
    library: &AssetLibrary,
    source: &dyn AssetSource,
    selection: &PerCategory<usize>,
) -> EmojiResult<Vec<String>> {
    let mut docs = Vec::with_capacity(Category::COUNT);
    for (category, &index) in selection.iter() {
        let Some(asset) = library
            .variant(category, index)
            .and_then(|v| v.asset.as_ref())
        else {
            continue;
        };
        if asset.kind != AssetKind::Svg {
            tracing::debug!(locator = %asset.locator, "raster variant has no vector form");
            continue;
        }
        let bytes = source.read(asset)?;
        let text = String::from_utf8(bytes).map_err(|e| {
            EmojiError::export(format!("'{}' is not utf-8: {e}", asset.locator))
        })?;
        docs.push(text);
    }
    Ok(docs)
}

#[cfg(test)]
#[path = "../../tests/unit/export/mod.rs"]
mod tests;
