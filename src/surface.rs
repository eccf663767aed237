use std::io::Cursor;

use egui::{Color32, ColorImage, Pos2};
use image::ImageFormat;

use crate::error::{EditorError, EditorResult};

/// An owned rectangular RGBA8 pixel buffer with the drawing primitives the
/// editor needs: polyline strokes with round caps, rectangle fills, clears
/// and blits, plus PNG encode/decode for snapshots.
///
/// The buffer stores straight (non-premultiplied) alpha; `Color32` values are
/// taken channel-for-channel. Blending only happens in `blit` and
/// `composite_over`.
#[derive(Clone, PartialEq)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>, // RGBA, row-major
}

impl RasterSurface {
    /// A fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// A surface pre-filled with a single color.
    pub fn filled(width: u32, height: u32, color: Color32) -> Self {
        let mut surface = Self::new(width, height);
        surface.clear(color);
        surface
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }

    /// The pixel at (x, y). Panics if out of bounds, like slice indexing.
    pub fn pixel(&self, x: u32, y: u32) -> Color32 {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside a {}x{} surface",
            self.width,
            self.height
        );
        let i = self.offset(x, y);
        let p: [u8; 4] = self.pixels[i..i + 4].try_into().unwrap_or([0; 4]);
        Color32::from_rgba_premultiplied(p[0], p[1], p[2], p[3])
    }

    /// Writes a pixel, ignoring coordinates outside the surface.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Color32) {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return;
        }
        let i = self.offset(x as u32, y as u32);
        self.pixels[i..i + 4].copy_from_slice(&[color.r(), color.g(), color.b(), color.a()]);
    }

    /// Fills the whole surface with one color.
    pub fn clear(&mut self, color: Color32) {
        let rgba = [color.r(), color.g(), color.b(), color.a()];
        for pixel in self.pixels.chunks_exact_mut(4) {
            pixel.copy_from_slice(&rgba);
        }
    }

    /// Fills an axis-aligned rectangle, clamped to the surface bounds.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Color32) {
        for py in y.max(0)..(y + i64::from(h)).min(i64::from(self.height)) {
            for px in x.max(0)..(x + i64::from(w)).min(i64::from(self.width)) {
                self.set_pixel(px, py, color);
            }
        }
    }

    /// Strokes a line segment with round caps by stamping discs of
    /// `width / 2` radius at roughly one-pixel intervals along it. Chaining
    /// segments through shared endpoints yields round joins for free.
    pub fn stroke_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        let radius = (width * 0.5).max(0.5);
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let steps = (dx * dx + dy * dy).sqrt().ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.fill_disc(from.x + dx * t, from.y + dy * t, radius, color);
        }
    }

    fn fill_disc(&mut self, cx: f32, cy: f32, radius: f32, color: Color32) {
        let r2 = radius * radius;
        let min_x = (cx - radius).floor() as i64;
        let max_x = (cx + radius).ceil() as i64;
        let min_y = (cy - radius).floor() as i64;
        let max_y = (cy + radius).ceil() as i64;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                // sample at the pixel center
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Source-over blends `src` onto this surface with its top-left corner at
    /// (x, y). Pixels falling outside the surface are dropped.
    pub fn blit(&mut self, src: &RasterSurface, x: i64, y: i64) {
        for sy in 0..src.height {
            let ty = y + i64::from(sy);
            if ty < 0 || ty >= i64::from(self.height) {
                continue;
            }
            for sx in 0..src.width {
                let tx = x + i64::from(sx);
                if tx < 0 || tx >= i64::from(self.width) {
                    continue;
                }
                let si = src.offset(sx, sy);
                let ti = self.offset(tx as u32, ty as u32);
                let pixel: [u8; 4] = src.pixels[si..si + 4].try_into().unwrap_or([0; 4]);
                blend_source_over(&mut self.pixels[ti..ti + 4], pixel, 1.0);
            }
        }
    }

    /// Source-over blends an equally-sized surface onto this one, with
    /// `opacity` as a uniform multiplier over the source's own per-pixel
    /// alpha.
    pub fn composite_over(&mut self, src: &RasterSurface, opacity: f32) {
        debug_assert_eq!((self.width, self.height), (src.width, src.height));
        for (dst, src) in self
            .pixels
            .chunks_exact_mut(4)
            .zip(src.pixels.chunks_exact(4))
        {
            let pixel: [u8; 4] = src.try_into().unwrap_or([0; 4]);
            blend_source_over(dst, pixel, opacity);
        }
    }

    /// Encodes the surface as a lossless PNG.
    pub fn encode_png(&self) -> EditorResult<Vec<u8>> {
        let mut bytes = Vec::new();
        image::write_buffer_with_format(
            &mut Cursor::new(&mut bytes),
            &self.pixels,
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
            ImageFormat::Png,
        )
        .map_err(EditorError::EncodeFailure)?;
        Ok(bytes)
    }

    /// Decodes a PNG (or any format the `image` crate recognizes) into a
    /// surface.
    pub fn decode_png(bytes: &[u8]) -> EditorResult<Self> {
        let decoded = image::load_from_memory(bytes)
            .map_err(EditorError::DecodeFailure)?
            .into_rgba8();
        Ok(Self {
            width: decoded.width(),
            height: decoded.height(),
            pixels: decoded.into_raw(),
        })
    }

    /// The surface as an egui texture image.
    pub fn to_color_image(&self) -> ColorImage {
        ColorImage::from_rgba_unmultiplied(
            [self.width as usize, self.height as usize],
            &self.pixels,
        )
    }
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

fn blend_source_over(dst: &mut [u8], src: [u8; 4], opacity: f32) {
    let sa = (f32::from(src[3]) / 255.0) * opacity.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for c in 0..3 {
        let blended = (f32::from(src[c]) * sa + f32::from(dst[c]) * da * (1.0 - sa)) / out_a;
        dst[c] = blended.round() as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}
