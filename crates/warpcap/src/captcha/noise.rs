//! Background clutter: randomly placed pastel circles and line segments.

use image::{Rgb, RgbImage};
use warpcap_common::constants::noise::{
    CIRCLE_THICKNESS, LINE_THICKNESS, MAX_RADIUS_FRACTION, SHAPE_COUNT,
};

use super::color::sample_pastel;
use super::draw::{LineStyle, draw_circle, draw_line};
use super::random::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
    pub center: (i32, i32),
    pub radius: i32,
    pub color: Rgb<u8>,
    /// Negative means filled
    pub thickness: i32,
    pub style: LineStyle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineShape {
    pub start: (i32, i32),
    pub end: (i32, i32),
    pub color: Rgb<u8>,
    pub thickness: i32,
    pub style: LineStyle,
}

/// All shapes for one background, drawn circles first
#[derive(Debug, Clone, Default)]
pub struct NoisePlan {
    pub circles: Vec<CircleShape>,
    pub lines: Vec<LineShape>,
}

impl NoisePlan {
    /// Draw random shape parameters for a `width` x `height` canvas
    pub fn random(rng: &mut RandomSource, width: u32, height: u32) -> Self {
        let (w, h) = (width as i32, height as i32);
        let max_radius = (height as f32 * MAX_RADIUS_FRACTION) as i32;

        let circle_count = rng.uniform(SHAPE_COUNT);
        let circles = (0..circle_count)
            .map(|_| {
                let center = (rng.uniform(0..w), rng.uniform(0..h));
                let radius = rng.uniform(1..max_radius);
                let color = sample_pastel(rng);
                let thickness = rng.uniform(CIRCLE_THICKNESS);
                let style = *rng.choose(&LineStyle::ALL);
                CircleShape {
                    center,
                    radius,
                    color,
                    thickness,
                    style,
                }
            })
            .collect();

        let line_count = rng.uniform(SHAPE_COUNT);
        let lines = (0..line_count)
            .map(|_| {
                let start = (rng.uniform(0..w), rng.uniform(0..h));
                let end = (rng.uniform(0..w), rng.uniform(0..h));
                let color = sample_pastel(rng);
                let thickness = rng.uniform(LINE_THICKNESS);
                let style = *rng.choose(&LineStyle::STROKED);
                LineShape {
                    start,
                    end,
                    color,
                    thickness,
                    style,
                }
            })
            .collect();

        Self { circles, lines }
    }

    pub fn shape_count(&self) -> usize {
        self.circles.len() + self.lines.len()
    }

    /// Draw every shape onto `canvas` in place
    pub fn paint(&self, canvas: &mut RgbImage) {
        for c in &self.circles {
            draw_circle(canvas, c.center, c.radius, c.color, c.thickness, c.style);
        }
        for l in &self.lines {
            draw_line(canvas, l.start, l.end, l.color, l.thickness, l.style);
        }
    }
}

/// Fill `canvas` with a fresh random set of noise shapes
pub fn add_noise(canvas: &mut RgbImage, rng: &mut RandomSource) {
    let plan = NoisePlan::random(rng, canvas.width(), canvas.height());
    tracing::trace!(
        circles = plan.circles.len(),
        lines = plan.lines.len(),
        "Painting noise layer"
    );
    plan.paint(canvas);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captcha::color::Hsv;
    use warpcap_common::constants::BASE_TONE;

    #[test]
    fn test_plan_counts_and_ranges() {
        for seed in 0..50 {
            let mut rng = RandomSource::from_seed(seed);
            let plan = NoisePlan::random(&mut rng, 480, 320);

            assert!((10..=19).contains(&plan.circles.len()));
            assert!((10..=19).contains(&plan.lines.len()));

            for c in &plan.circles {
                assert!((0..480).contains(&c.center.0));
                assert!((0..320).contains(&c.center.1));
                assert!(c.radius >= 1 && c.radius < 128, "radius {}", c.radius);
                assert!((-1..7).contains(&c.thickness));
            }
            for l in &plan.lines {
                assert!((0..480).contains(&l.start.0) && (0..480).contains(&l.end.0));
                assert!((0..320).contains(&l.start.1) && (0..320).contains(&l.end.1));
                assert!((1..7).contains(&l.thickness));
                assert_ne!(l.style, LineStyle::Filled);
            }
        }
    }

    #[test]
    fn test_plan_colors_are_pastel() {
        let mut rng = RandomSource::from_seed(31);
        let plan = NoisePlan::random(&mut rng, 320, 240);
        let colors = plan
            .circles
            .iter()
            .map(|c| c.color)
            .chain(plan.lines.iter().map(|l| l.color));
        for color in colors {
            let hsv = Hsv::from_rgb(color);
            assert_eq!(hsv.value, 1.0);
            assert!(hsv.saturation < 0.31);
        }
    }

    #[test]
    fn test_tiny_canvas_radius_collapses() {
        let mut rng = RandomSource::from_seed(32);
        let plan = NoisePlan::random(&mut rng, 4, 2);
        assert!(plan.circles.iter().all(|c| c.radius == 1));
    }

    #[test]
    fn test_add_noise_paints_in_place() {
        let mut canvas = RgbImage::from_pixel(240, 160, Rgb(BASE_TONE));
        let mut rng = RandomSource::from_seed(33);
        add_noise(&mut canvas, &mut rng);
        assert_eq!(canvas.dimensions(), (240, 160));
        assert!(canvas.pixels().any(|p| *p != Rgb(BASE_TONE)));
    }

    #[test]
    fn test_plan_is_deterministic() {
        let a = NoisePlan::random(&mut RandomSource::from_seed(34), 400, 240);
        let b = NoisePlan::random(&mut RandomSource::from_seed(34), 400, 240);
        assert_eq!(a.circles, b.circles);
        assert_eq!(a.lines, b.lines);
    }
}
