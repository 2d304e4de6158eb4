//! Emoji Maker composes an emoji from one variant per facial feature category.
//!
//! # Pipeline overview
//!
//! 1. **Load**: an [`AssetSource`] is enumerated per [`Category`] into an [`AssetLibrary`]
//!    (variants decoded once, broken files dropped, a none slot prepended where allowed).
//! 2. **Select**: [`SelectionState`] holds one index per category and publishes a
//!    [`CompositeRequest`] tagged with a [`BatchToken`] on every change.
//! 3. **Resolve**: the [`Resolver`] rasterizes all five layers of a request in the background and
//!    joins them into a [`ResolvedBatch`].
//! 4. **Composite**: the [`Compositor`] clears the surface and paints the layers head to detail,
//!    ignoring batches superseded by a newer request.
//! 5. **Export** (on demand): PNG of the surface, or one merged SVG document of the selected
//!    vector sources, saved through the [`SaveDialog`] / [`FileWriter`] collaborators.
//!
//! [`Studio`] wires these together for a single event loop.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Variant discovery and decoding.
pub mod assets;
/// Raster and vector export.
pub mod export;
/// Configuration, core types and errors.
pub mod foundation;
/// Category picker view model.
pub mod picker;
/// Layer resolution and compositing.
pub mod render;
/// Selection state.
pub mod selection;
mod studio;

pub use assets::decode::{PreparedImage, PreparedLayer, PreparedSvg, decode_image, decode_layer, parse_svg};
pub use assets::library::{AssetLibrary, DroppedAsset, Variant, VariantList};
pub use assets::source::{
    AssetKind, AssetRef, AssetSource, DirAssetSource, MemoryAssetSource, normalize_rel_path,
};
pub use export::dialog::{FileWriter, FixedDialog, FsWriter, LinePromptDialog, SaveDialog, SaveRequest};
pub use export::vector::merge_svg_documents;
pub use export::{ExportFormat, ExportOutcome, Exporter};
pub use foundation::config::{ColorScheme, StudioConfig};
pub use foundation::core::{Category, PerCategory};
pub use foundation::error::{EmojiError, EmojiResult};
pub use picker::view::{GalleryEntry, Picker, PickerAction, PickerView, TabView, render_thumbnail};
pub use render::compositor::{Compositor, DrawOutcome, TransitionCue};
pub use render::rasterize::{RasterLayer, rasterize_layer};
pub use render::resolve::{Resolution, ResolvedBatch, Resolver, resolve_batch};
pub use render::surface::Surface;
pub use selection::state::{BatchToken, CompositeRequest, SelectionState};
pub use studio::{Notice, Studio};
