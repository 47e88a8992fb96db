//! Shared constants for Warpcap components.

use std::ops::Range;

/// Default challenge length
pub const DEFAULT_CHALLENGE_LENGTH: usize = 6;

/// Default display resolution selector (480x320)
pub const DEFAULT_RESOLUTION_SELECTOR: i64 = 3;

/// Default glyph stroke thickness in pixels
pub const DEFAULT_STROKE_THICKNESS: u32 = 4;

/// Background canvas base tone (RGB)
pub const BASE_TONE: [u8; 3] = [255, 255, 230];

/// Text canvas fill (RGB), also the warp's out-of-bounds value
pub const TEXT_CANVAS_FILL: [u8; 3] = [0, 0, 0];

/// Text rect left margin as a fraction of canvas width
pub const TEXT_MARGIN_LEFT: f32 = 0.2;

/// Text rect top margin as a fraction of canvas height
pub const TEXT_MARGIN_TOP: f32 = 0.05;

/// Glyph measured to estimate per-scale character size
pub const REFERENCE_GLYPH: char = 'a';

/// Reference pixel scale for the vertical fit measurement
pub const VERTICAL_REFERENCE_SCALE: f32 = 128.0;

/// Color sampling bands (HSV, saturation/value in 0.0..=1.0)
pub mod color {
    /// Pastel saturation lower bound (inclusive)
    pub const PASTEL_SATURATION_MIN: f32 = 0.20;

    /// Pastel saturation upper bound (exclusive)
    pub const PASTEL_SATURATION_MAX: f32 = 0.30;
}

/// Noise shape ranges, upper bounds exclusive
pub mod noise {
    use super::Range;

    /// Circles per invocation, and lines per invocation
    pub const SHAPE_COUNT: Range<i32> = 10..20;

    /// Circle stroke thickness; negative means filled
    pub const CIRCLE_THICKNESS: Range<i32> = -1..7;

    /// Line stroke thickness
    pub const LINE_THICKNESS: Range<i32> = 1..7;

    /// Largest circle radius as a fraction of canvas height
    pub const MAX_RADIUS_FRACTION: f32 = 0.4;
}

/// Horizontal magnitude of the left-edge skew, upper bound exclusive
pub const WARP_OFFSET: Range<i32> = 25..50;
