use std::sync::Arc;

use anyhow::Context;

use crate::{assets::source::AssetKind, foundation::error::EmojiResult};

#[derive(Clone, Debug)]
/// Decoded raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

#[derive(Clone, Debug)]
/// SVG variant represented as a parsed `usvg` tree.
pub struct PreparedSvg {
    /// Parsed SVG tree.
    pub tree: Arc<usvg::Tree>,
}

#[derive(Clone, Debug)]
/// Decoded handle of one variant, ready to be rasterized at any size.
pub enum PreparedLayer {
    /// Vector variant.
    Svg(PreparedSvg),
    /// Bitmap variant.
    Image(PreparedImage),
}

/// Decode raw variant bytes according to their kind.
pub fn decode_layer(kind: AssetKind, bytes: &[u8]) -> EmojiResult<PreparedLayer> {
    match kind {
        AssetKind::Svg => parse_svg(bytes).map(PreparedLayer::Svg),
        AssetKind::Raster => decode_image(bytes).map(PreparedLayer::Image),
    }
}

/// Decode PNG/JPEG/WebP bytes into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> EmojiResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Parse SVG bytes into a `usvg` tree.
pub fn parse_svg(bytes: &[u8]) -> EmojiResult<PreparedSvg> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(PreparedSvg {
        tree: Arc::new(tree),
    })
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

/// Inverse of [`premultiply_rgba8_in_place`], used before encoding to formats with straight alpha.
pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = (((*c as u16) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
