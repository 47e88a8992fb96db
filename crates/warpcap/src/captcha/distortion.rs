//! One-sided perspective skew of the text layer.
//!
//! The right edge of the text rect stays anchored while the left edge is
//! pulled out to a leaning quad: top-left moves to x in [25, 50), bottom-left
//! to x in (-50, -25]. The whole canvas is resampled through the projection.

use image::{Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp};
use warpcap_common::constants::{TEXT_CANVAS_FILL, WARP_OFFSET};
use warpcap_common::{Result, TextRect, WarpcapError};

use super::random::RandomSource;

/// Source and destination quads, corners ordered TL, TR, BR, BL
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Skew {
    pub source: [(f32, f32); 4],
    pub target: [(f32, f32); 4],
}

impl Skew {
    /// Random left-edge skew of `rect`
    pub fn random(rect: &TextRect, rng: &mut RandomSource) -> Self {
        let source = rect.corners();
        let mut target = source;
        target[0].0 = rng.uniform(WARP_OFFSET) as f32;
        target[3].0 = -(rng.uniform(WARP_OFFSET) as f32);
        Self { source, target }
    }

    /// Projection taking `source` onto `target`. Quads that enclose no area
    /// have no projection.
    pub fn projection(&self) -> Result<Projection> {
        if quad_area(&self.source) < 1.0 || quad_area(&self.target) < 1.0 {
            return Err(self.degenerate());
        }
        Projection::from_control_points(self.source, self.target).ok_or_else(|| self.degenerate())
    }

    fn degenerate(&self) -> WarpcapError {
        WarpcapError::DegenerateTransform(format!("{:?} -> {:?}", self.source, self.target))
    }

    /// Resample `canvas` through the skew. Output keeps the input's size;
    /// pixels mapped from outside the input are black.
    pub fn apply(&self, canvas: &RgbImage) -> Result<RgbImage> {
        let projection = self.projection()?;
        Ok(warp(
            canvas,
            &projection,
            Interpolation::Nearest,
            Rgb(TEXT_CANVAS_FILL),
        ))
    }
}

/// Shoelace area of a quad, unsigned
fn quad_area(quad: &[(f32, f32); 4]) -> f32 {
    let twice: f32 = (0..4)
        .map(|i| {
            let (x0, y0) = quad[i];
            let (x1, y1) = quad[(i + 1) % 4];
            x0 * y1 - x1 * y0
        })
        .sum();
    twice.abs() / 2.0
}

/// Skew the text layer in place. Returns the skew that was applied.
pub fn warp_text(canvas: &mut RgbImage, rect: &TextRect, rng: &mut RandomSource) -> Result<Skew> {
    let skew = Skew::random(rect, rng);
    *canvas = skew.apply(canvas)?;
    Ok(skew)
}

#[cfg(test)]
mod tests {
    use super::*;
    use warpcap_common::DisplayResolution;

    #[test]
    fn test_right_edge_anchored_left_edge_offset() {
        let rect = DisplayResolution::Hvga.text_rect();
        for seed in 0..100 {
            let mut rng = RandomSource::from_seed(seed);
            let skew = Skew::random(&rect, &mut rng);

            assert_eq!(skew.target[1], skew.source[1]);
            assert_eq!(skew.target[2], skew.source[2]);
            assert_eq!(skew.target[0].1, skew.source[0].1);
            assert_eq!(skew.target[3].1, skew.source[3].1);

            let top = skew.target[0].0;
            let bottom = -skew.target[3].0;
            assert!((25.0..50.0).contains(&top), "top-left x {}", top);
            assert!((25.0..50.0).contains(&bottom), "bottom-left x {}", -bottom);
        }
    }

    #[test]
    fn test_projection_maps_corners_for_every_preset() {
        for resolution in DisplayResolution::ALL {
            let rect = resolution.text_rect();
            let (width, height) = resolution.size();
            // f32 solve, so allow error relative to the canvas rather than sub-pixel
            let tolerance = 0.02 * width.max(height) as f32;
            for seed in 0..2000 {
                let mut rng = RandomSource::from_seed(seed);
                let skew = Skew::random(&rect, &mut rng);
                let projection = skew
                    .projection()
                    .unwrap_or_else(|e| panic!("{:?} seed {}: {}", resolution, seed, e));

                for (from, to) in skew.source.iter().zip(skew.target.iter()) {
                    let (x, y) = projection * *from;
                    assert!(
                        (x - to.0).abs() < tolerance && (y - to.1).abs() < tolerance,
                        "{:?} seed {}: {:?} -> ({}, {}), wanted {:?}",
                        resolution,
                        seed,
                        from,
                        x,
                        y,
                        to
                    );
                }
            }
        }
    }

    #[test]
    fn test_quad_area() {
        let square = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        assert_eq!(quad_area(&square), 100.0);
        let line = [(0.0, 0.0), (5.0, 5.0), (10.0, 10.0), (5.0, 5.0)];
        assert_eq!(quad_area(&line), 0.0);
    }

    #[test]
    fn test_degenerate_quad_is_an_error() {
        let rect = DisplayResolution::Hvga.text_rect();
        let collapsed = Skew {
            source: [(0.0, 0.0); 4],
            target: rect.corners(),
        };
        let flattened = Skew {
            source: rect.corners(),
            target: [(1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (4.0, 4.0)],
        };
        for skew in [collapsed, flattened] {
            assert!(matches!(
                skew.projection(),
                Err(WarpcapError::DegenerateTransform(_))
            ));
        }
    }

    #[test]
    fn test_warp_preserves_dimensions_and_colors() {
        let color = Rgb([255, 128, 0]);
        let mut canvas = RgbImage::new(480, 320);
        for y in 100..200 {
            for x in 200..400 {
                canvas.put_pixel(x, y, color);
            }
        }
        let mut rng = RandomSource::from_seed(42);
        warp_text(&mut canvas, &DisplayResolution::Hvga.text_rect(), &mut rng).unwrap();

        assert_eq!(canvas.dimensions(), (480, 320));
        assert!(canvas.pixels().any(|p| *p == color));
        assert!(
            canvas
                .pixels()
                .all(|p| *p == color || *p == Rgb(TEXT_CANVAS_FILL))
        );
    }
}
