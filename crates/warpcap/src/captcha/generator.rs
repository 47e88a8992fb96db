//! CAPTCHA image pipeline.
//!
//! Stages run strictly in order, all drawing from one `RandomSource`:
//! text color, background noise, fitted text, skew, color-key composite.

use base64::{Engine, engine::general_purpose::STANDARD};
use image::{ImageFormat, Rgb, RgbImage};
use serde::Serialize;
use std::io::Cursor;

use warpcap_common::constants::{BASE_TONE, DEFAULT_STROKE_THICKNESS, TEXT_CANVAS_FILL};
use warpcap_common::{ChallengeLength, DisplayResolution, Result, WarpcapError};

use super::color::sample_bright;
use super::compositor::combine;
use super::distortion::warp_text;
use super::font::GlyphFont;
use super::layout::TextLayout;
use super::noise::add_noise;
use super::random::RandomSource;

/// Per-image parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorOptions {
    pub resolution: DisplayResolution,
    pub length: ChallengeLength,
    /// Glyph stroke thickness in pixels
    pub thickness: u32,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            resolution: DisplayResolution::default(),
            length: ChallengeLength::default(),
            thickness: DEFAULT_STROKE_THICKNESS,
        }
    }
}

/// A rendered challenge
#[derive(Debug, Clone)]
pub struct Captcha {
    /// The characters drawn in the image
    pub answer: String,
    pub image: RgbImage,
    /// Seed that reproduces this image
    pub seed: u64,
    pub text_color: Rgb<u8>,
}

/// Serializable summary of a challenge, image inlined as a data URI
#[derive(Debug, Clone, Serialize)]
pub struct CaptchaManifest {
    pub answer: String,
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub text_color: [u8; 3],
    pub image_data: String,
}

impl Captcha {
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Encode the image as PNG
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut png = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|e| WarpcapError::Encode(e.to_string()))?;
        Ok(png)
    }

    /// `data:image/png;base64,...`
    pub fn to_data_uri(&self) -> Result<String> {
        Ok(format!(
            "data:image/png;base64,{}",
            STANDARD.encode(self.to_png()?)
        ))
    }

    pub fn manifest(&self) -> Result<CaptchaManifest> {
        let (width, height) = self.dimensions();
        Ok(CaptchaManifest {
            answer: self.answer.clone(),
            width,
            height,
            seed: self.seed,
            text_color: self.text_color.0,
            image_data: self.to_data_uri()?,
        })
    }
}

/// CAPTCHA generator service
#[derive(Debug, Clone)]
pub struct CaptchaGenerator {
    options: GeneratorOptions,
    layout: TextLayout,
}

impl CaptchaGenerator {
    pub fn new(options: GeneratorOptions, font: GlyphFont) -> Self {
        Self {
            layout: TextLayout::new(font, options.thickness),
            options,
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Run the full pipeline once
    pub fn generate(&self, rng: &mut RandomSource) -> Result<Captcha> {
        let resolution = self.options.resolution;
        let (width, height) = resolution.size();
        let text_rect = resolution.text_rect();

        let text_color = sample_bright(rng);

        let mut image = RgbImage::from_pixel(width, height, Rgb(BASE_TONE));
        let mut text_layer = RgbImage::from_pixel(width, height, Rgb(TEXT_CANVAS_FILL));

        add_noise(&mut image, rng);

        let answer = self.layout.add_text_fitted(
            &mut text_layer,
            &text_rect,
            self.options.length,
            text_color,
            rng,
        );

        let skew = warp_text(&mut text_layer, &text_rect, rng)?;

        combine(&text_layer, &mut image, text_color)?;

        tracing::debug!(
            seed = rng.seed(),
            resolution = ?resolution,
            length = self.options.length.get(),
            text_color = ?text_color.0,
            skew = ?skew.target,
            "Generated CAPTCHA image"
        );

        Ok(Captcha {
            answer,
            image,
            seed: rng.seed(),
            text_color,
        })
    }

    /// Run the pipeline with a fresh source seeded from `seed`
    pub fn generate_seeded(&self, seed: u64) -> Result<Captcha> {
        self.generate(&mut RandomSource::from_seed(seed))
    }
}
