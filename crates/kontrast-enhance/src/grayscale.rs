// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Luma-weighted BGR → gray reduction.

use image::GrayImage;
use kontrast_core::PixelBuffer;
use kontrast_core::error::{KontrastError, Result};

// 0.114·B + 0.587·G + 0.299·R in 14-bit fixed point. The weights sum to 1 << 14.
const B_WEIGHT: u32 = 1868;
const G_WEIGHT: u32 = 9617;
const R_WEIGHT: u32 = 4899;
const SHIFT: u32 = 14;
const ROUND: u32 = 1 << (SHIFT - 1);

/// Luma of one BGR pixel, rounded to nearest.
#[inline]
pub fn luma_bgr(b: u8, g: u8, r: u8) -> u8 {
    ((b as u32 * B_WEIGHT + g as u32 * G_WEIGHT + r as u32 * R_WEIGHT + ROUND) >> SHIFT) as u8
}

/// Reduce a 3-channel BGR buffer to a single-channel grayscale image.
///
/// Fails for buffers that are empty or do not have exactly three channels.
pub fn to_grayscale(color: &PixelBuffer) -> Result<GrayImage> {
    if color.channels() != 3 {
        return Err(KontrastError::Grayscale(format!(
            "expected 3 BGR channels, got {}",
            color.channels()
        )));
    }
    if color.is_empty() {
        return Err(KontrastError::Grayscale(format!(
            "cannot convert an empty {}x{} buffer",
            color.width(),
            color.height()
        )));
    }

    let (width, height) = color.dimensions();
    let samples: Vec<u8> = color
        .as_raw()
        .chunks_exact(3)
        .map(|px| luma_bgr(px[0], px[1], px[2]))
        .collect();

    GrayImage::from_raw(width, height, samples).ok_or_else(|| {
        KontrastError::Grayscale(format!("{width}x{height} gray plane has the wrong length"))
    })
}
