//! Shape rasterization: circles and line segments with stroke thickness
//! and edge style. Everything clips silently to the canvas.

use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_antialiased_line_segment_mut, draw_filled_circle_mut, draw_hollow_circle_mut,
    draw_line_segment_mut,
};
use imageproc::pixelops::interpolate;

/// Edge rendering style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Hard-edged like `Connected8`; only a negative thickness fills a circle
    Filled,
    Connected4,
    Connected8,
    Antialiased,
}

impl LineStyle {
    /// All styles, as picked for noise circles
    pub const ALL: [LineStyle; 4] = [
        Self::Filled,
        Self::Connected4,
        Self::Connected8,
        Self::Antialiased,
    ];

    /// Styles without `Filled`, as picked for noise lines
    pub const STROKED: [LineStyle; 3] = [Self::Connected4, Self::Connected8, Self::Antialiased];
}

/// Draw a circle. Negative thickness paints a disc, zero thickness a one
/// pixel ring, otherwise a ring `thickness` wide.
pub fn draw_circle(
    canvas: &mut RgbImage,
    center: (i32, i32),
    radius: i32,
    color: Rgb<u8>,
    thickness: i32,
    style: LineStyle,
) {
    let antialias = style == LineStyle::Antialiased;
    let r = radius as f32;
    let (cx, cy) = (center.0 as f32, center.1 as f32);

    if thickness < 0 {
        if antialias {
            let bounds = square_bounds(center, radius + 1);
            paint_field(canvas, bounds, color, true, |x, y| {
                r + 0.5 - (x - cx).hypot(y - cy)
            });
        } else {
            draw_filled_circle_mut(canvas, center, radius, color);
        }
        return;
    }

    if thickness == 0 && !antialias {
        draw_hollow_circle_mut(canvas, center, radius, color);
        return;
    }

    let half = (thickness.max(1) as f32) / 2.0;
    let bounds = square_bounds(center, radius + half.ceil() as i32 + 1);
    paint_field(canvas, bounds, color, antialias, |x, y| {
        half + 0.5 - ((x - cx).hypot(y - cy) - r).abs()
    });
}

/// Draw a line segment `thickness` pixels wide with round caps.
pub fn draw_line(
    canvas: &mut RgbImage,
    start: (i32, i32),
    end: (i32, i32),
    color: Rgb<u8>,
    thickness: i32,
    style: LineStyle,
) {
    if thickness <= 1 {
        match style {
            LineStyle::Antialiased => {
                draw_antialiased_line_segment_mut(canvas, start, end, color, interpolate)
            }
            LineStyle::Connected4 => draw_line_4_connected(canvas, start, end, color),
            LineStyle::Connected8 | LineStyle::Filled => draw_line_segment_mut(
                canvas,
                (start.0 as f32, start.1 as f32),
                (end.0 as f32, end.1 as f32),
                color,
            ),
        }
        return;
    }

    let half = thickness as f32 / 2.0;
    let pad = half.ceil() as i32 + 1;
    let bounds = (
        start.0.min(end.0) - pad,
        start.1.min(end.1) - pad,
        start.0.max(end.0) + pad,
        start.1.max(end.1) + pad,
    );
    let a = (start.0 as f32, start.1 as f32);
    let b = (end.0 as f32, end.1 as f32);
    paint_field(canvas, bounds, color, style == LineStyle::Antialiased, |x, y| {
        half + 0.5 - distance_to_segment((x, y), a, b)
    });
}

/// Grid walk that only ever steps horizontally or vertically.
fn draw_line_4_connected(canvas: &mut RgbImage, start: (i32, i32), end: (i32, i32), color: Rgb<u8>) {
    let dx = (end.0 - start.0).abs() as i64;
    let dy = (end.1 - start.1).abs() as i64;
    let sx = (end.0 - start.0).signum();
    let sy = (end.1 - start.1).signum();

    let (mut x, mut y) = start;
    let (mut ix, mut iy) = (0i64, 0i64);
    plot(canvas, x, y, color);
    while ix < dx || iy < dy {
        if (1 + 2 * ix) * dy < (1 + 2 * iy) * dx {
            x += sx;
            ix += 1;
        } else {
            y += sy;
            iy += 1;
        }
        plot(canvas, x, y, color);
    }
}

fn plot(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}

fn square_bounds(center: (i32, i32), reach: i32) -> (i32, i32, i32, i32) {
    (
        center.0 - reach,
        center.1 - reach,
        center.0 + reach,
        center.1 + reach,
    )
}

/// Paint every pixel in the inclusive bounds by its coverage in `[0, 1]`.
/// Hard edges keep pixels with coverage >= 0.5 at the exact color.
fn paint_field<F>(
    canvas: &mut RgbImage,
    (x0, y0, x1, y1): (i32, i32, i32, i32),
    color: Rgb<u8>,
    antialias: bool,
    coverage: F,
) where
    F: Fn(f32, f32) -> f32,
{
    let (width, height) = (canvas.width() as i32, canvas.height() as i32);
    for y in y0.max(0)..=y1.min(height - 1) {
        for x in x0.max(0)..=x1.min(width - 1) {
            let c = coverage(x as f32, y as f32).clamp(0.0, 1.0);
            if antialias {
                if c >= 1.0 {
                    canvas.put_pixel(x as u32, y as u32, color);
                } else if c > 0.0 {
                    let under = *canvas.get_pixel(x as u32, y as u32);
                    canvas.put_pixel(x as u32, y as u32, interpolate(color, under, c));
                }
            } else if c >= 0.5 {
                canvas.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

fn distance_to_segment(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len_sq).clamp(0.0, 1.0)
    };
    let (qx, qy) = (a.0 + t * abx, a.1 + t * aby);
    (p.0 - qx).hypot(p.1 - qy)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    fn blank(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, WHITE)
    }

    fn count(canvas: &RgbImage, color: Rgb<u8>) -> usize {
        canvas.pixels().filter(|p| **p == color).count()
    }

    #[test]
    fn test_filled_circle_covers_center() {
        let mut canvas = blank(40, 40);
        draw_circle(&mut canvas, (20, 20), 8, RED, -1, LineStyle::Connected8);
        assert_eq!(*canvas.get_pixel(20, 20), RED);
        assert_eq!(*canvas.get_pixel(0, 0), WHITE);
    }

    #[test]
    fn test_ring_leaves_center_untouched() {
        let mut canvas = blank(40, 40);
        draw_circle(&mut canvas, (20, 20), 10, RED, 3, LineStyle::Connected4);
        assert_eq!(*canvas.get_pixel(20, 20), WHITE);
        assert_eq!(*canvas.get_pixel(30, 20), RED);
        assert_eq!(*canvas.get_pixel(20, 10), RED);
    }

    #[test]
    fn test_filled_style_strokes_unless_thickness_negative() {
        let mut ring = blank(40, 40);
        draw_circle(&mut ring, (20, 20), 10, RED, 3, LineStyle::Filled);
        assert_eq!(*ring.get_pixel(20, 20), WHITE);
        assert_eq!(*ring.get_pixel(30, 20), RED);

        let mut stroked = blank(40, 40);
        draw_circle(&mut stroked, (20, 20), 10, RED, 3, LineStyle::Connected8);
        assert_eq!(ring.as_raw(), stroked.as_raw());

        let mut disc = blank(40, 40);
        draw_circle(&mut disc, (20, 20), 10, RED, -1, LineStyle::Filled);
        assert_eq!(*disc.get_pixel(20, 20), RED);
    }

    #[test]
    fn test_circle_clips_outside_canvas() {
        let mut canvas = blank(20, 20);
        draw_circle(&mut canvas, (-5, -5), 12, RED, 6, LineStyle::Antialiased);
        draw_circle(&mut canvas, (25, 25), 12, RED, -1, LineStyle::Antialiased);
        assert_eq!(canvas.dimensions(), (20, 20));
    }

    #[test]
    fn test_four_connected_line_has_no_diagonal_steps() {
        let mut canvas = blank(20, 20);
        draw_line(&mut canvas, (0, 0), (9, 6), RED, 1, LineStyle::Connected4);
        // a 4-connected walk visits dx + dy + 1 pixels
        assert_eq!(count(&canvas, RED), 9 + 6 + 1);
        assert_eq!(*canvas.get_pixel(0, 0), RED);
        assert_eq!(*canvas.get_pixel(9, 6), RED);
    }

    #[test]
    fn test_eight_connected_line_endpoints() {
        let mut canvas = blank(20, 20);
        draw_line(&mut canvas, (2, 3), (15, 11), RED, 1, LineStyle::Connected8);
        assert_eq!(*canvas.get_pixel(2, 3), RED);
        assert_eq!(*canvas.get_pixel(15, 11), RED);
    }

    #[test]
    fn test_thick_line_width() {
        let mut canvas = blank(30, 30);
        draw_line(&mut canvas, (5, 15), (25, 15), RED, 5, LineStyle::Connected8);
        for y in 13..=17 {
            assert_eq!(*canvas.get_pixel(15, y), RED, "row {}", y);
        }
        assert_eq!(*canvas.get_pixel(15, 10), WHITE);
        assert_eq!(*canvas.get_pixel(15, 20), WHITE);
    }

    #[test]
    fn test_antialiased_thick_line_blends_edges() {
        let mut canvas = blank(30, 30);
        draw_line(&mut canvas, (5, 15), (25, 15), RED, 4, LineStyle::Antialiased);
        assert_eq!(*canvas.get_pixel(15, 15), RED);
        let edge = canvas
            .pixels()
            .any(|p| *p != RED && *p != WHITE);
        assert!(edge, "expected blended edge pixels");
    }

    #[test]
    fn test_distance_to_segment() {
        assert_eq!(distance_to_segment((0.0, 5.0), (0.0, 0.0), (10.0, 0.0)), 5.0);
        assert_eq!(distance_to_segment((13.0, 4.0), (0.0, 0.0), (10.0, 0.0)), 5.0);
        assert_eq!(distance_to_segment((3.0, 4.0), (0.0, 0.0), (0.0, 0.0)), 5.0);
    }
}
