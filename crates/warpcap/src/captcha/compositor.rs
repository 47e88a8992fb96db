//! Color-key compositing of the text layer onto the background.

use image::{GrayImage, Luma, Rgb, RgbImage};
use warpcap_common::{Result, WarpcapError};

/// 255 where `image` exactly equals `key`, 0 elsewhere
pub fn color_key_mask(image: &RgbImage, key: Rgb<u8>) -> GrayImage {
    let (width, height) = image.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        if *image.get_pixel(x, y) == key {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// Copy `source` pixels onto `target` wherever `mask` is non-zero
pub fn copy_masked(source: &RgbImage, target: &mut RgbImage, mask: &GrayImage) -> Result<()> {
    ensure_same_size(source.dimensions(), target.dimensions())?;
    ensure_same_size(source.dimensions(), mask.dimensions())?;

    for ((src, dst), m) in source
        .pixels()
        .zip(target.pixels_mut())
        .zip(mask.pixels())
    {
        if m[0] != 0 {
            *dst = *src;
        }
    }
    Ok(())
}

/// Overwrite `background` with every `foreground` pixel equal to `key`.
/// All other background pixels stay as they were.
pub fn combine(foreground: &RgbImage, background: &mut RgbImage, key: Rgb<u8>) -> Result<()> {
    let mask = color_key_mask(foreground, key);
    copy_masked(foreground, background, &mask)
}

fn ensure_same_size(left: (u32, u32), right: (u32, u32)) -> Result<()> {
    if left != right {
        return Err(WarpcapError::DimensionMismatch { left, right });
    }
    Ok(())
}
