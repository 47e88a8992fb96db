//! # Warpcap
//!
//! Synthesizes classic geometric-distortion CAPTCHA images: a pastel noise
//! background, a random alphanumeric string fitted to a target region,
//! a one-sided perspective skew, and a color-key composite.
//!
//! ## Pipeline
//! ```text
//! seed ─> RandomSource
//!           ├─> sample_bright ─────────────────────────────┐ key
//!           ├─> add_noise ─────────> background ───────────┤
//!           ├─> add_text_fitted ───> text layer            │
//!           └─> warp_text ─────────> skewed text layer ────┴─> combine ─> Captcha
//! ```

pub mod batch;
pub mod captcha;
pub mod config;

pub use batch::generate_batch;
pub use captcha::{Captcha, CaptchaGenerator, GeneratorOptions, GlyphFont, RandomSource};
pub use config::GeneratorConfig;
pub use warpcap_common::{ChallengeLength, DisplayResolution, Result, WarpcapError};
