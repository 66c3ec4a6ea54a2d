use std::io::Cursor;

use image::{RgbaImage, imageops};

use crate::assets::color::Color;
use crate::foundation::core::{Position, Size};
use crate::foundation::error::{CardError, CardResult};
use crate::raster::{blur, composite};

/// Encoded output formats a card can be written as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Lossless PNG with alpha.
    Png,
    /// JPEG; alpha is flattened away.
    Jpeg,
}

impl OutputFormat {
    /// Parse a format token (`png`, `jpg`, `jpeg`), case-insensitively.
    pub fn parse(token: &str) -> CardResult<Self> {
        match token.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            other => Err(CardError::configuration(format!(
                "invalid format \"{other}\", use \"png\" or \"jpg\""
            ))),
        }
    }

    /// File extension used for persisted cards.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }
}

/// In-memory straight-alpha RGBA8 surface every card, area and thumbnail is drawn on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pixels: RgbaImage,
}

impl Raster {
    /// Create a surface filled with `fill`.
    pub fn new(size: Size, fill: Color) -> Self {
        let px = image::Rgba(fill.to_rgba8());
        Self {
            pixels: RgbaImage::from_pixel(size.width, size.height, px),
        }
    }

    /// Create a fully transparent surface.
    pub fn transparent(size: Size) -> Self {
        Self::new(size, Color::transparent())
    }

    /// Wrap an already decoded image.
    pub fn from_image(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Build a surface from premultiplied RGBA8 bytes.
    pub(crate) fn from_premul_rgba8(size: Size, bytes: &[u8]) -> CardResult<Self> {
        if bytes.len() != size.width as usize * size.height as usize * 4 {
            return Err(CardError::render("premultiplied buffer length mismatch"));
        }
        let straight: Vec<u8> = bytes
            .chunks_exact(4)
            .flat_map(|px| composite::unpremultiply([px[0], px[1], px[2], px[3]]))
            .collect();
        let pixels = RgbaImage::from_raw(size.width, size.height, straight)
            .ok_or_else(|| CardError::render("premultiplied buffer length mismatch"))?;
        Ok(Self { pixels })
    }

    /// Decode encoded image bytes (PNG, JPEG, GIF, ...).
    pub fn decode(bytes: &[u8]) -> CardResult<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| CardError::asset_load(format!("decode image: {e}")))?;
        Ok(Self {
            pixels: img.to_rgba8(),
        })
    }

    /// Encode into `format`.
    pub fn encode(&self, format: OutputFormat) -> CardResult<Vec<u8>> {
        let mut buf = Vec::new();
        let result = match format {
            OutputFormat::Png => image::DynamicImage::ImageRgba8(self.pixels.clone())
                .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png),
            OutputFormat::Jpeg => image::DynamicImage::ImageRgba8(self.pixels.clone())
                .to_rgb8()
                .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg),
        };
        result.map_err(|e| CardError::encode(format!("{format:?}: {e}")))?;
        Ok(buf)
    }

    /// Surface dimensions.
    pub fn size(&self) -> Size {
        Size::new(self.pixels.width(), self.pixels.height())
    }

    /// Borrow the underlying pixels.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Unwrap into the underlying pixels.
    pub fn into_image(self) -> RgbaImage {
        self.pixels
    }

    /// Pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Resampled copy at `size`. Zero extents are bumped to one pixel.
    pub fn resized(&self, size: Size) -> Self {
        let w = size.width.max(1);
        let h = size.height.max(1);
        if self.size() == Size::new(w, h) {
            return self.clone();
        }
        Self {
            pixels: imageops::resize(&self.pixels, w, h, imageops::FilterType::Triangle),
        }
    }

    /// Resize to `height`, deriving the width from the aspect ratio.
    pub fn resized_to_height(&self, height: u32) -> Self {
        let width = (f64::from(height) * self.size().aspect()) as u32;
        self.resized(Size::new(width, height))
    }

    /// Copy of the `size` rectangle at `origin`, clamped to the surface bounds.
    pub fn cropped(&self, origin: Position, size: Size) -> Self {
        let own = self.size();
        let x = origin.x.clamp(0, own.w()) as u32;
        let y = origin.y.clamp(0, own.h()) as u32;
        let w = size.width.min(own.width - x);
        let h = size.height.min(own.height - y);
        Self {
            pixels: imageops::crop_imm(&self.pixels, x, y, w, h).to_image(),
        }
    }

    /// Composite `src` over this surface with its top-left corner at `at`. Out-of-bounds
    /// parts of `src` are clipped.
    pub fn paste(&mut self, src: &Raster, at: Position) {
        let dst_size = self.size();
        let src_size = src.size();
        let x0 = at.x.max(0);
        let y0 = at.y.max(0);
        let x1 = (at.x + src_size.w()).min(dst_size.w());
        let y1 = (at.y + src_size.h()).min(dst_size.h());
        for y in y0..y1 {
            for x in x0..x1 {
                let s = src.pixels.get_pixel((x - at.x) as u32, (y - at.y) as u32).0;
                let d = self.pixels.get_pixel_mut(x as u32, y as u32);
                d.0 = composite::blend(d.0, s);
            }
        }
    }

    /// Blend a solid rectangle. Rectangles are clipped to the surface.
    pub fn fill_rect(&mut self, at: Position, size: Size, color: Color) {
        let src = color.to_rgba8();
        if src[3] == 0 {
            return;
        }
        let own = self.size();
        let x0 = at.x.max(0);
        let y0 = at.y.max(0);
        let x1 = (at.x + size.w()).min(own.w());
        let y1 = (at.y + size.h()).min(own.h());
        for y in y0..y1 {
            for x in x0..x1 {
                let d = self.pixels.get_pixel_mut(x as u32, y as u32);
                d.0 = composite::blend(d.0, src);
            }
        }
    }

    /// Blend `color` over the whole surface.
    pub fn tint(&mut self, color: Color) {
        let size = self.size();
        self.fill_rect(Position::origin(), size, color);
    }

    /// Vertical linear gradient from `start` (top row) to `end` (bottom row).
    pub fn vertical_gradient(size: Size, start: Color, end: Color) -> Self {
        let a = start.to_rgba8();
        let b = end.to_rgba8();
        let span = size.height.saturating_sub(1).max(1) as f64;
        let mut pixels = RgbaImage::new(size.width, size.height);
        for y in 0..size.height {
            let t = f64::from(y) / span;
            let mut px = [0u8; 4];
            for c in 0..4 {
                let v = f64::from(a[c]) + (f64::from(b[c]) - f64::from(a[c])) * t;
                px[c] = v.round().clamp(0.0, 255.0) as u8;
            }
            for x in 0..size.width {
                pixels.put_pixel(x, y, image::Rgba(px));
            }
        }
        Self { pixels }
    }

    /// Mirror the surface top-to-bottom.
    pub fn flip_vertical(&mut self) {
        imageops::flip_vertical_in_place(&mut self.pixels);
    }

    /// Gamma-correct the color channels: `v' = 255 * (v / 255) ^ (1 / correction)`.
    ///
    /// Corrections above `1.0` brighten, below darken. Alpha is untouched.
    pub fn gamma(&mut self, correction: f64) {
        if !correction.is_finite() || correction <= 0.0 {
            return;
        }
        let exp = 1.0 / correction;
        let lut: Vec<u8> = (0..=255u16)
            .map(|v| (255.0 * (f64::from(v) / 255.0).powf(exp)).round() as u8)
            .collect();
        for px in self.pixels.pixels_mut() {
            for c in 0..3 {
                px.0[c] = lut[px.0[c] as usize];
            }
        }
    }

    /// Soften the surface with a small gaussian kernel (radius 1, sigma 1).
    pub fn blur(&mut self) -> CardResult<()> {
        let kernel = blur::Kernel::gaussian(1, 1.0)?;
        for px in self.pixels.pixels_mut() {
            px.0 = composite::premultiply(px.0);
        }
        kernel.apply(&mut self.pixels);
        for px in self.pixels.pixels_mut() {
            px.0 = composite::unpremultiply(px.0);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/canvas.rs"]
mod tests;
