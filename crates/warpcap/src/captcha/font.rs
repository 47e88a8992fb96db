//! TrueType glyph measurement and hard-edged text rendering.
//!
//! Text is rasterized without antialiasing: a pixel is either left alone
//! or painted with the exact requested color. The compositor keys on that
//! color, so blended edge pixels would simply be lost.

use ab_glyph::{Font, FontArc, Glyph, PxScale, ScaleFont, point};
use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::distance_transform::Norm;
use imageproc::morphology::dilate;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use warpcap_common::{Result, WarpcapError};

/// DejaVu Sans Mono Bold, bundled so the generator works without a font on disk
pub const EMBEDDED_FONT: &[u8] =
    include_bytes!("../../../../assets/fonts/DejaVuSansMono-Bold.ttf");

/// Where a loaded font came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    Embedded,
    File(PathBuf),
}

/// A loaded font face, cheap to clone and safe to share across threads
#[derive(Clone)]
pub struct GlyphFont {
    font: FontArc,
    source: Arc<FontSource>,
}

impl fmt::Debug for GlyphFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphFont")
            .field("source", &self.source)
            .finish()
    }
}

/// Extent of a string at a given scale, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Advance width plus stroke
    pub width: f32,
    /// Ink extent above the baseline plus stroke
    pub height: f32,
    /// Ink extent below the baseline
    pub baseline: f32,
}

impl GlyphFont {
    /// The bundled face
    pub fn embedded() -> Result<Self> {
        let font = FontArc::try_from_slice(EMBEDDED_FONT)
            .map_err(|e| WarpcapError::Font(format!("embedded font: {}", e)))?;
        Ok(Self {
            font,
            source: Arc::new(FontSource::Embedded),
        })
    }

    /// Load a TrueType/OpenType face from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| WarpcapError::Font(format!("{}: {}", path.display(), e)))?;
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| WarpcapError::Font(format!("{}: {}", path.display(), e)))?;
        Ok(Self {
            font,
            source: Arc::new(FontSource::File(path.to_path_buf())),
        })
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    /// Position glyphs along a baseline starting at `origin`
    fn layout(&self, text: &str, scale: f32, origin: (f32, f32)) -> (Vec<Glyph>, f32) {
        let px = PxScale::from(scale);
        let scaled = self.font.as_scaled(px);
        let mut caret = origin.0;
        let mut previous = None;
        let mut glyphs = Vec::with_capacity(text.len());

        for c in text.chars() {
            let id = scaled.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(px, point(caret, origin.1)));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        (glyphs, caret - origin.0)
    }

    /// Measure `text` without rendering it
    pub fn measure(&self, text: &str, scale: f32, thickness: u32) -> TextMetrics {
        let (glyphs, advance) = self.layout(text, scale, (0.0, 0.0));
        let mut top = 0.0f32;
        let mut bottom = 0.0f32;

        for glyph in glyphs {
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                top = top.min(bounds.min.y);
                bottom = bottom.max(bounds.max.y);
            }
        }

        let stroke = thickness as f32;
        TextMetrics {
            width: advance + stroke,
            height: -top + stroke,
            baseline: bottom,
        }
    }

    /// Render `text` with its baseline starting at `origin`. Strokes are
    /// thickened by `thickness / 2` pixels on each side.
    pub fn draw_text(
        &self,
        canvas: &mut RgbImage,
        text: &str,
        origin: (i32, i32),
        scale: f32,
        thickness: u32,
        color: Rgb<u8>,
    ) {
        let (width, height) = canvas.dimensions();
        let mut mask = GrayImage::new(width, height);
        let (glyphs, _) = self.layout(text, scale, (origin.0 as f32, origin.1 as f32));

        for glyph in glyphs {
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
            outlined.draw(|gx, gy, coverage| {
                let x = left + gx as i32;
                let y = top + gy as i32;
                if coverage >= 0.5 && x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height
                {
                    mask.put_pixel(x as u32, y as u32, Luma([255]));
                }
            });
        }

        let radius = (thickness / 2).min(u8::MAX as u32) as u8;
        if radius > 0 {
            mask = dilate(&mask, Norm::LInf, radius);
        }

        for (x, y, m) in mask.enumerate_pixels() {
            if m[0] > 0 {
                canvas.put_pixel(x, y, color);
            }
        }
    }
}
