//! Color sampling for text and noise.
//!
//! Text colors are fully saturated ("bright"), noise colors are strongly
//! desaturated ("pastel"). A bright color always has one channel at 0 and
//! a pastel color never drops a channel below ~178, so the two sets never
//! intersect and the text color can double as an exact compositing key.

use image::Rgb;
use warpcap_common::constants::color::{PASTEL_SATURATION_MAX, PASTEL_SATURATION_MIN};

use super::random::RandomSource;

/// Hue/saturation/value color. Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

impl Hsv {
    pub fn new(hue: f32, saturation: f32, value: f32) -> Self {
        Self {
            hue: hue.rem_euclid(360.0),
            saturation: saturation.clamp(0.0, 1.0),
            value: value.clamp(0.0, 1.0),
        }
    }

    pub fn to_rgb(&self) -> Rgb<u8> {
        let chroma = self.value * self.saturation;
        let sector = self.hue / 60.0;
        let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
        let (r, g, b) = match sector as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = self.value - chroma;
        let to_byte = |c: f32| ((c + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb([to_byte(r), to_byte(g), to_byte(b)])
    }

    pub fn from_rgb(rgb: Rgb<u8>) -> Self {
        let [r, g, b] = rgb.0.map(|c| c as f32 / 255.0);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let hue = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let saturation = if max == 0.0 { 0.0 } else { delta / max };

        Self::new(hue, saturation, max)
    }
}

/// Fully saturated, full value, random hue. Used for the challenge text.
pub fn sample_bright(rng: &mut RandomSource) -> Rgb<u8> {
    let hue = rng.uniform_f32(0.0..360.0);
    Hsv::new(hue, 1.0, 1.0).to_rgb()
}

/// Low saturation, full value, random hue. Used for noise shapes.
pub fn sample_pastel(rng: &mut RandomSource) -> Rgb<u8> {
    let hue = rng.uniform_f32(0.0..360.0);
    let saturation = rng.uniform_f32(PASTEL_SATURATION_MIN..PASTEL_SATURATION_MAX);
    Hsv::new(hue, saturation, 1.0).to_rgb()
}

/// Uniform over all three channels.
pub fn sample_uniform(rng: &mut RandomSource) -> Rgb<u8> {
    Rgb([rng.byte(), rng.byte(), rng.byte()])
}
