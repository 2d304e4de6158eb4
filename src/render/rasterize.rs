use crate::{
    assets::decode::{PreparedImage, PreparedLayer},
    foundation::error::{EmojiError, EmojiResult},
};

/// A layer rasterized to a square of `size` pixels, premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterLayer {
    /// Side length in pixels.
    pub size: u32,
    /// Row-major premultiplied RGBA8, `size * size * 4` bytes.
    pub rgba8_premul: Vec<u8>,
}

impl RasterLayer {
    /// Build a layer from raw premultiplied pixels, checking the buffer length.
    pub fn from_premul(size: u32, rgba8_premul: Vec<u8>) -> EmojiResult<Self> {
        let expected = (size as usize) * (size as usize) * 4;
        if rgba8_premul.len() != expected {
            return Err(EmojiError::render(format!(
                "layer buffer has {} bytes, expected {expected}",
                rgba8_premul.len()
            )));
        }
        Ok(Self { size, rgba8_premul })
    }
}

/// Rasterize a decoded variant stretched to fill `(0,0)-(size,size)`, ignoring its aspect ratio.
pub fn rasterize_layer(layer: &PreparedLayer, size: u32) -> EmojiResult<RasterLayer> {
    if size == 0 {
        return Err(EmojiError::render("raster size must be > 0"));
    }
    let data = match layer {
        PreparedLayer::Svg(svg) => rasterize_svg_to_premul_rgba8(&svg.tree, size, size)?,
        PreparedLayer::Image(img) => resize_premul_image(img, size)?,
    };
    RasterLayer::from_premul(size, data)
}

/// Render `tree` scaled non-uniformly to `width`×`height`, returning premultiplied RGBA8.
pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> EmojiResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| EmojiError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    if !sx.is_finite() || !sy.is_finite() {
        return Err(EmojiError::render("svg has invalid width/height"));
    }
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.take())
}

fn resize_premul_image(img: &PreparedImage, size: u32) -> EmojiResult<Vec<u8>> {
    if img.width == size && img.height == size {
        return Ok(img.rgba8_premul.as_ref().clone());
    }
    let src = image::RgbaImage::from_raw(img.width, img.height, img.rgba8_premul.to_vec())
        .ok_or_else(|| EmojiError::render("image buffer does not match its dimensions"))?;
    // Channels stay premultiplied through the filter.
    let resized = image::imageops::resize(&src, size, size, image::imageops::FilterType::Triangle);
    Ok(resized.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/render/rasterize.rs"]
mod tests;
