use std::io::Cursor;

use anyhow::Context as _;

use crate::{
    assets::decode::unpremultiply_rgba8_in_place,
    foundation::error::{EmojiError, EmojiResult},
    render::{composite::over_in_place, rasterize::RasterLayer},
};

/// Square premultiplied RGBA8 drawing target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    size: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Allocate a transparent surface of `size`×`size` pixels.
    pub fn new(size: u32) -> EmojiResult<Self> {
        if size == 0 {
            return Err(EmojiError::validation("surface size must be > 0"));
        }
        Ok(Self {
            size,
            data: vec![0u8; (size as usize) * (size as usize) * 4],
        })
    }

    /// Side length in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Premultiplied pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Paint `layer` over the current contents at the origin.
    pub fn draw(&mut self, layer: &RasterLayer) -> EmojiResult<()> {
        if layer.size != self.size {
            return Err(EmojiError::render(format!(
                "layer size {} does not match surface size {}",
                layer.size, self.size
            )));
        }
        over_in_place(&mut self.data, &layer.rgba8_premul)
    }

    /// Clear, then draw `layers` bottom to top.
    pub fn composite<'a>(
        &mut self,
        layers: impl IntoIterator<Item = &'a RasterLayer>,
    ) -> EmojiResult<()> {
        self.clear();
        for layer in layers {
            self.draw(layer)?;
        }
        Ok(())
    }

    /// Encode the surface as PNG (straight alpha).
    pub fn encode_png(&self) -> EmojiResult<Vec<u8>> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        let img = image::RgbaImage::from_raw(self.size, self.size, straight)
            .ok_or_else(|| EmojiError::render("surface buffer does not match its size"))?;

        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(buf)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
