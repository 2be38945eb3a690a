// SPDX-License-Identifier: GPL-3.0-only

//! Synthetic color-bar frames
//!
//! Stand-in for a sensor image. The pattern reflects the device settings so
//! captures and the terminal preview show facing, ratio, zoom, mirror and
//! flash visibly.

use super::types::{DeviceSettings, FlashMode};
use crate::app::Facing;
use image::{Rgb, RgbImage};

/// SMPTE-style color bars
const BARS: [[u8; 3]; 7] = [
    [192, 192, 192],
    [192, 192, 0],
    [0, 192, 192],
    [0, 192, 0],
    [192, 0, 192],
    [192, 0, 0],
    [0, 0, 192],
];

/// Brightness added while the flash is on
const FLASH_BOOST: u8 = 48;

/// Render frame `frame_index` at the settings' capture size
pub fn render(settings: &DeviceSettings, frame_index: u64) -> RgbImage {
    let (width, height) = settings.ratio.capture_size();
    render_sized(settings, frame_index, width, height)
}

/// Render frame `frame_index` at an explicit size
pub fn render_sized(
    settings: &DeviceSettings,
    frame_index: u64,
    width: u32,
    height: u32,
) -> RgbImage {
    let width = width.max(1);
    let height = height.max(1);
    // Zoom magnifies the center; full zoom shows a quarter of the bars
    let magnification = 1.0 + settings.zoom.clamp(0.0, 1.0) * 3.0;
    let scan_row = ((frame_index * 8) % u64::from(height)) as u32;

    RgbImage::from_fn(width, height, |x, y| {
        let x = if settings.mirror { width - 1 - x } else { x };
        let u = (x as f32 / width as f32 - 0.5) / magnification + 0.5;
        let bar = ((u * BARS.len() as f32) as usize).min(BARS.len() - 1);
        let [mut r, g, mut b] = BARS[bar];

        if settings.facing == Facing::Front {
            std::mem::swap(&mut r, &mut b);
        }

        let mut pixel = [r, g, b];
        if y == scan_row {
            pixel = [255, 255, 255];
        }
        if settings.flash == FlashMode::On {
            pixel = pixel.map(|c| c.saturating_add(FLASH_BOOST));
        }
        Rgb(pixel)
    })
}
