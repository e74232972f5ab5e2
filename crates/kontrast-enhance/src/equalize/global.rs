// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Whole-image histogram equalization, used as the non-adaptive baseline.

use image::GrayImage;
use imageproc::contrast::equalize_histogram;
use kontrast_core::ClaheParams;
use kontrast_core::error::{KontrastError, Result};

use super::AdaptiveEqualizer;

/// Global histogram equalization. Ignores the clip limit and tile grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalEqualizer;

impl AdaptiveEqualizer for GlobalEqualizer {
    fn equalize(&self, gray: &GrayImage, _params: &ClaheParams) -> Result<GrayImage> {
        if gray.width() == 0 || gray.height() == 0 {
            return Err(KontrastError::Equalization(
                "cannot equalize an empty image".into(),
            ));
        }
        Ok(equalize_histogram(gray))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn brightest_level_maps_to_white() {
        let gray = GrayImage::from_fn(8, 8, |x, _| Luma([if x < 4 { 40 } else { 90 }]));
        let out = GlobalEqualizer
            .equalize(&gray, &ClaheParams::default())
            .unwrap();
        assert_eq!(out.dimensions(), (8, 8));
        assert_eq!(out.get_pixel(7, 0).0[0], 255);
        assert!(out.get_pixel(0, 0).0[0] < 255);
    }

    #[test]
    fn rejects_empty_image() {
        let gray = GrayImage::new(0, 3);
        assert!(GlobalEqualizer.equalize(&gray, &ClaheParams::default()).is_err());
    }
}
