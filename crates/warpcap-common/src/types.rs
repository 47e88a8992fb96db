//! Core types shared across Warpcap components.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CHALLENGE_LENGTH, TEXT_MARGIN_LEFT, TEXT_MARGIN_TOP};
use crate::error::WarpcapError;

/// Display resolution presets.
///
/// - 0: HQVGA, 240x160
/// - 1: QVGA, 320x240
/// - 2: WQVGA, 400x240
/// - 3: HVGA, 480x320
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayResolution {
    Hqvga,
    Qvga,
    Wqvga,
    Hvga,
}

impl DisplayResolution {
    pub const ALL: [DisplayResolution; 4] = [Self::Hqvga, Self::Qvga, Self::Wqvga, Self::Hvga];

    /// Resolve a numeric selector. Anything outside [0, 3] falls back to HQVGA.
    pub fn from_selector(selector: i64) -> Self {
        match selector {
            0 => Self::Hqvga,
            1 => Self::Qvga,
            2 => Self::Wqvga,
            3 => Self::Hvga,
            _ => Self::Hqvga,
        }
    }

    /// (width, height) in pixels
    pub fn size(&self) -> (u32, u32) {
        match self {
            Self::Hqvga => (240, 160),
            Self::Qvga => (320, 240),
            Self::Wqvga => (400, 240),
            Self::Hvga => (480, 320),
        }
    }

    pub fn width(&self) -> u32 {
        self.size().0
    }

    pub fn height(&self) -> u32 {
        self.size().1
    }

    /// Region the challenge text is fitted into at this resolution
    pub fn text_rect(&self) -> TextRect {
        TextRect::for_canvas(self.width(), self.height())
    }
}

impl Default for DisplayResolution {
    fn default() -> Self {
        Self::Hvga
    }
}

/// Axis-aligned region in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl TextRect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Text region for a canvas: 20% left margin, 5% top margin, the rest is the box.
    pub fn for_canvas(width: u32, height: u32) -> Self {
        let x = (width as f32 * TEXT_MARGIN_LEFT) as u32;
        let y = (height as f32 * TEXT_MARGIN_TOP) as u32;
        Self {
            x: x as i32,
            y: y as i32,
            width: width - x,
            height: height - y,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Corners in top-left, top-right, bottom-right, bottom-left order
    pub fn corners(&self) -> [(f32, f32); 4] {
        let (left, top) = (self.x as f32, self.y as f32);
        let (right, bottom) = (self.right() as f32, self.bottom() as f32);
        [(left, top), (right, top), (right, bottom), (left, bottom)]
    }
}

/// Number of characters in a challenge string, always at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct ChallengeLength(usize);

impl ChallengeLength {
    pub const DEFAULT: ChallengeLength = ChallengeLength(DEFAULT_CHALLENGE_LENGTH);

    /// Reject zero; the text fitter divides by this value
    pub fn new(len: usize) -> Result<Self, WarpcapError> {
        if len == 0 {
            return Err(WarpcapError::InvalidChallengeLength(len));
        }
        Ok(Self(len))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for ChallengeLength {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<usize> for ChallengeLength {
    type Error = WarpcapError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChallengeLength> for usize {
    fn from(value: ChallengeLength) -> Self {
        value.0
    }
}
