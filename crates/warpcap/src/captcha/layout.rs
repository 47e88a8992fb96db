//! Challenge text: random string selection and fit-to-rectangle layout.

use image::{Rgb, RgbImage};
use warpcap_common::constants::{REFERENCE_GLYPH, VERTICAL_REFERENCE_SCALE};
use warpcap_common::{ChallengeLength, TextRect};

use super::font::GlyphFont;
use super::random::RandomSource;

/// Everything needed to put a string on a canvas
#[derive(Debug, Clone)]
pub struct TextStyle {
    pub font: GlyphFont,
    /// Em height in pixels
    pub scale: f32,
    /// Stroke thickness in pixels
    pub thickness: u32,
    pub color: Rgb<u8>,
}

impl TextStyle {
    /// Draw `text` with its baseline starting at `origin`
    pub fn render(&self, canvas: &mut RgbImage, text: &str, origin: (i32, i32)) {
        self.font
            .draw_text(canvas, text, origin, self.scale, self.thickness, self.color);
    }
}

/// Where and how large a fitted string is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPlacement {
    /// Left end of the baseline
    pub origin: (i32, i32),
    pub scale: f32,
}

/// Challenge alphabet: lowercase, uppercase, then digits
pub const ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

/// Draw `len` characters uniformly from the challenge alphabet
pub fn random_challenge(rng: &mut RandomSource, len: ChallengeLength) -> String {
    (0..len.get())
        .map(|_| ALPHABET[rng.index(ALPHABET.len())] as char)
        .collect()
}

/// Lays challenge text out to fill a target rectangle
#[derive(Debug, Clone)]
pub struct TextLayout {
    font: GlyphFont,
    thickness: u32,
}

impl TextLayout {
    pub fn new(font: GlyphFont, thickness: u32) -> Self {
        Self { font, thickness }
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }

    /// Per-pixel-of-scale width and height of the reference glyph
    fn unit_glyph_size(&self, reference_scale: f32) -> (f32, f32) {
        let reference_scale = reference_scale.max(1.0);
        let metrics =
            self.font
                .measure(&REFERENCE_GLYPH.to_string(), reference_scale, self.thickness);
        (
            metrics.width / reference_scale,
            metrics.height / reference_scale,
        )
    }

    /// Scale so the string spans the rect's width, vertically centered.
    ///
    /// Assumes every glyph is about as wide as the reference glyph, so the
    /// fit is approximate for proportional faces.
    pub fn fit_horizontal(&self, text: &str, rect: &TextRect) -> TextPlacement {
        let chars = text.chars().count().max(1) as f32;
        let (unit_width, unit_height) = self.unit_glyph_size(rect.width as f32);

        let scale = rect.width as f32 / unit_width / chars;
        let est_height = unit_height * scale;
        let baseline = (rect.height as f32 - est_height) * 0.5 + est_height + rect.y as f32;

        TextPlacement {
            origin: (rect.x, baseline as i32),
            scale,
        }
    }

    /// Scale so the glyph height spans the rect's height, anchored bottom-left.
    pub fn fit_vertical(&self, rect: &TextRect) -> TextPlacement {
        let (_, unit_height) = self.unit_glyph_size(VERTICAL_REFERENCE_SCALE);

        TextPlacement {
            origin: (rect.x, rect.bottom()),
            scale: rect.height as f32 / unit_height,
        }
    }

    fn style(&self, placement: &TextPlacement, color: Rgb<u8>) -> TextStyle {
        TextStyle {
            font: self.font.clone(),
            scale: placement.scale,
            thickness: self.thickness,
            color,
        }
    }

    /// Pick a challenge string, fit it across `rect` and render it. Returns the string.
    pub fn add_text_fitted(
        &self,
        canvas: &mut RgbImage,
        rect: &TextRect,
        len: ChallengeLength,
        color: Rgb<u8>,
        rng: &mut RandomSource,
    ) -> String {
        let text = random_challenge(rng, len);
        let placement = self.fit_horizontal(&text, rect);
        self.style(&placement, color)
            .render(canvas, &text, placement.origin);
        text
    }

    /// Like [`add_text_fitted`](Self::add_text_fitted) but fills the rect's height instead.
    pub fn add_text_fitted_vert(
        &self,
        canvas: &mut RgbImage,
        rect: &TextRect,
        len: ChallengeLength,
        color: Rgb<u8>,
        rng: &mut RandomSource,
    ) -> String {
        let text = random_challenge(rng, len);
        let placement = self.fit_vertical(rect);
        self.style(&placement, color)
            .render(canvas, &text, placement.origin);
        text
    }
}
