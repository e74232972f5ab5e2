// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Histogram equalization primitives.

pub mod clahe;
pub mod global;

pub use clahe::Clahe;
pub use global::GlobalEqualizer;

use image::GrayImage;
use kontrast_core::ClaheParams;
use kontrast_core::error::Result;

/// An equalization primitive: given a grayscale image and parameters,
/// return an equalized image of the same size or fail.
pub trait AdaptiveEqualizer {
    fn equalize(&self, gray: &GrayImage, params: &ClaheParams) -> Result<GrayImage>;
}
