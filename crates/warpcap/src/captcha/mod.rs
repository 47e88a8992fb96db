//! CAPTCHA image synthesis.
//!
//! Leaf-first: `random` feeds `color`, `noise`, `layout` and `distortion`;
//! `compositor` merges the layers; `generator` runs the whole pipeline.

mod compositor;
mod distortion;
mod draw;
mod font;
mod generator;
mod layout;
mod noise;
mod random;

pub mod color;

pub use compositor::{color_key_mask, combine, copy_masked};
pub use distortion::{Skew, warp_text};
pub use draw::{LineStyle, draw_circle, draw_line};
pub use font::{EMBEDDED_FONT, FontSource, GlyphFont, TextMetrics};
pub use generator::{Captcha, CaptchaGenerator, CaptchaManifest, GeneratorOptions};
pub use layout::{ALPHABET, TextLayout, TextPlacement, TextStyle, random_challenge};
pub use noise::{CircleShape, LineShape, NoisePlan, add_noise};
pub use random::RandomSource;
