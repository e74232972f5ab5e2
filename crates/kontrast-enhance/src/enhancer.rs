// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The enhancement function: BGR buffer in, enhanced grayscale buffer out.
//
// Two stages run in order, each producing a `Result`:
//
// 1. grayscale reduction of the BGR input
// 2. adaptive equalization of that grayscale image
//
// The first stage that produced a usable image wins. Failures never reach the
// caller; they degrade the output instead and are logged.

use image::GrayImage;
use kontrast_core::error::KontrastError;
use kontrast_core::{ClaheParams, PixelBuffer};
use tracing::{debug, instrument, warn};

use crate::equalize::{AdaptiveEqualizer, Clahe};
use crate::grayscale::to_grayscale;

/// Which stage produced the returned buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhanceOutcome {
    /// Both stages succeeded: the buffer is the equalized grayscale image.
    Equalized,
    /// Equalization failed: the buffer is the plain grayscale image.
    Grayscale,
    /// Grayscale reduction failed on a 3-channel input: the buffer is its
    /// first (blue) channel.
    FirstChannel,
    /// Grayscale reduction failed on any other input: the buffer is the
    /// input, unchanged.
    Passthrough,
}

impl EnhanceOutcome {
    /// True for every outcome except `Equalized`.
    pub fn is_degraded(&self) -> bool {
        !matches!(self, Self::Equalized)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equalized => "equalized",
            Self::Grayscale => "grayscale",
            Self::FirstChannel => "first_channel",
            Self::Passthrough => "passthrough",
        }
    }
}

impl std::fmt::Display for EnhanceOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The buffer returned by an enhancement run and the stage that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enhanced {
    pub image: PixelBuffer,
    pub outcome: EnhanceOutcome,
}

/// Runs the staged enhancement with a pluggable equalization primitive.
#[derive(Debug, Clone, Default)]
pub struct Enhancer<E = Clahe> {
    equalizer: E,
}

impl Enhancer<Clahe> {
    /// An enhancer backed by [`Clahe`].
    pub fn new() -> Self {
        Self { equalizer: Clahe }
    }
}

impl<E: AdaptiveEqualizer> Enhancer<E> {
    /// An enhancer backed by any equalization primitive.
    pub fn with_equalizer(equalizer: E) -> Self {
        Self { equalizer }
    }

    /// Enhance `color` (3-channel BGR) with `params`.
    ///
    /// Never fails. See [`EnhanceOutcome`] for what is returned when a stage
    /// fails.
    #[instrument(
        skip(self, color),
        fields(
            width = color.width(),
            height = color.height(),
            channels = color.channels(),
            clip_limit = params.clip_limit,
            grid = %params.grid
        )
    )]
    pub fn run(&self, color: &PixelBuffer, params: &ClaheParams) -> Enhanced {
        let gray = match to_grayscale(color) {
            Ok(gray) => gray,
            Err(err) => return fallback_without_gray(color, &err),
        };

        match self.equalizer.equalize(&gray, params) {
            Ok(equalized) => {
                debug!(outcome = %EnhanceOutcome::Equalized, "enhancement complete");
                Enhanced {
                    image: gray_into_buffer(equalized),
                    outcome: EnhanceOutcome::Equalized,
                }
            }
            Err(err) => {
                warn!(
                    error = %err,
                    outcome = %EnhanceOutcome::Grayscale,
                    "equalization failed; returning grayscale image"
                );
                Enhanced {
                    image: gray_into_buffer(gray),
                    outcome: EnhanceOutcome::Grayscale,
                }
            }
        }
    }
}

/// Enhance a BGR buffer with the default CLAHE primitive.
///
/// Returns a single-channel buffer of the same size on success; see
/// [`Enhancer::run`] for the degraded outputs.
pub fn enhance(color: &PixelBuffer, params: &ClaheParams) -> PixelBuffer {
    Enhancer::new().run(color, params).image
}

fn fallback_without_gray(color: &PixelBuffer, err: &KontrastError) -> Enhanced {
    let blue = if color.channels() == 3 {
        color.channel(0)
    } else {
        None
    };

    match blue {
        Some(blue) => {
            warn!(
                error = %err,
                outcome = %EnhanceOutcome::FirstChannel,
                "grayscale conversion failed; returning first channel"
            );
            Enhanced {
                image: blue,
                outcome: EnhanceOutcome::FirstChannel,
            }
        }
        None => {
            warn!(
                error = %err,
                outcome = %EnhanceOutcome::Passthrough,
                "grayscale conversion failed; returning input unchanged"
            );
            Enhanced {
                image: color.clone(),
                outcome: EnhanceOutcome::Passthrough,
            }
        }
    }
}

fn gray_into_buffer(gray: GrayImage) -> PixelBuffer {
    let (width, height) = gray.dimensions();
    PixelBuffer::from_luma(width, height, gray.into_raw())
}

// -- Tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equalize::GlobalEqualizer;
    use kontrast_core::error::Result;

    /// BGR buffer whose three channels all equal `f(x, y)`.
    fn gray_bgr(width: u32, height: u32, f: impl Fn(u32, u32) -> u8) -> PixelBuffer {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = f(x, y);
                data.extend_from_slice(&[v, v, v]);
            }
        }
        PixelBuffer::new(width, height, 3, data).unwrap()
    }

    /// A non-uniform test scene: two gradients with a bright block.
    fn scene() -> PixelBuffer {
        gray_bgr(96, 80, |x, y| {
            if (30..60).contains(&x) && (20..50).contains(&y) {
                220
            } else if x < 48 {
                (x + y / 2) as u8
            } else {
                (120 + (x - 48) / 2 + y / 4) as u8
            }
        })
    }

    struct AlwaysFails;

    impl AdaptiveEqualizer for AlwaysFails {
        fn equalize(&self, _gray: &GrayImage, _params: &ClaheParams) -> Result<GrayImage> {
            Err(KontrastError::Equalization("unavailable".into()))
        }
    }

    #[test]
    fn output_keeps_height_and_width() {
        let color = scene();
        for params in [
            ClaheParams::default(),
            ClaheParams::new(1.0, 2, 2),
            ClaheParams::new(40.0, 32, 32),
            ClaheParams::new(7.5, 3, 29),
        ] {
            let out = Enhancer::new().run(&color, &params);
            assert_eq!(out.outcome, EnhanceOutcome::Equalized);
            assert_eq!(out.image.dimensions(), color.dimensions());
            assert_eq!(out.image.channels(), 1);
            assert_eq!(out.image.as_raw().len(), 96 * 80);
        }
    }

    #[test]
    fn output_is_deterministic() {
        let color = scene();
        let params = ClaheParams::new(3.2, 6, 5);
        assert_eq!(enhance(&color, &params), enhance(&color, &params));
    }

    #[test]
    fn finer_grid_changes_output() {
        let color = scene();
        let coarse = enhance(&color, &ClaheParams::new(2.0, 2, 2));
        let fine = enhance(&color, &ClaheParams::new(2.0, 8, 8));
        assert_ne!(coarse, fine);
    }

    #[test]
    fn grid_larger_than_image_returns_grayscale() {
        let color = gray_bgr(5, 4, |x, y| (x * 40 + y * 10) as u8);
        let params = ClaheParams::new(2.0, 8, 8);

        let out = Enhancer::new().run(&color, &params);
        assert_eq!(out.outcome, EnhanceOutcome::Grayscale);

        let gray = to_grayscale(&color).unwrap();
        assert_eq!(out.image.as_raw(), gray.as_raw().as_slice());
        assert_eq!(out.image.dimensions(), (5, 4));
    }

    #[test]
    fn failing_equalizer_returns_grayscale() {
        let color = scene();
        let out = Enhancer::with_equalizer(AlwaysFails).run(&color, &ClaheParams::default());
        assert_eq!(out.outcome, EnhanceOutcome::Grayscale);
        assert!(out.outcome.is_degraded());
        assert_eq!(out.image.as_raw(), to_grayscale(&color).unwrap().as_raw().as_slice());
    }

    #[test]
    fn empty_bgr_input_returns_first_channel() {
        let color = PixelBuffer::new(0, 6, 3, Vec::new()).unwrap();
        let out = Enhancer::new().run(&color, &ClaheParams::default());
        assert_eq!(out.outcome, EnhanceOutcome::FirstChannel);
        assert_eq!(out.image.channels(), 1);
        assert_eq!(out.image.dimensions(), (0, 6));
    }

    #[test]
    fn first_channel_is_blue() {
        // Non-empty 3-channel buffers always convert, so drive the fallback directly.
        let color = PixelBuffer::new(2, 1, 3, vec![7, 100, 200, 9, 100, 200]).unwrap();
        let err = KontrastError::Grayscale("forced".into());
        let out = fallback_without_gray(&color, &err);
        assert_eq!(out.outcome, EnhanceOutcome::FirstChannel);
        assert_eq!(out.image.as_raw(), &[7, 9]);
    }

    #[test]
    fn wrong_channel_count_passes_input_through() {
        for channels in [1u8, 2, 4] {
            let color = PixelBuffer::filled(6, 6, channels, 77).unwrap();
            let out = Enhancer::new().run(&color, &ClaheParams::default());
            assert_eq!(out.outcome, EnhanceOutcome::Passthrough);
            assert_eq!(out.image, color);
        }
    }

    #[test]
    fn degenerate_clip_limit_is_passed_through() {
        let color = scene();
        for clip_limit in [0.0, -5.0, f32::NAN] {
            let out = Enhancer::new().run(&color, &ClaheParams::new(clip_limit, 4, 4));
            assert_eq!(out.outcome, EnhanceOutcome::Equalized);
            assert_eq!(out.image.dimensions(), color.dimensions());
        }
    }

    #[test]
    fn mid_gray_image_stays_uniform() {
        let color = gray_bgr(100, 100, |_, _| 128);
        let out = Enhancer::new().run(&color, &ClaheParams::new(2.0, 8, 8));

        assert_eq!(out.outcome, EnhanceOutcome::Equalized);
        assert_eq!(out.image.dimensions(), (100, 100));
        assert_eq!(out.image.channels(), 1);
        let first = out.image.as_raw()[0];
        assert!(out.image.as_raw().iter().all(|&v| v == first));
    }

    #[test]
    fn split_image_gains_local_contrast_over_global_baseline() {
        let color = gray_bgr(64, 64, |_, y| if y < 32 { 10 } else { 245 });
        let params = ClaheParams::new(2.0, 2, 2);

        let local = Enhancer::new().run(&color, &params).image;
        let global = Enhancer::with_equalizer(GlobalEqualizer)
            .run(&color, &params)
            .image;

        let step = |buf: &PixelBuffer| {
            let above = buf.sample(32, 30, 0).unwrap() as i32;
            let below = buf.sample(32, 33, 0).unwrap() as i32;
            (below - above).abs()
        };

        let local_step = step(&local);
        let global_step = step(&global);
        assert!(
            local_step > global_step + 50,
            "local {local_step} vs global {global_step}"
        );
        assert!(local_step >= 200);
    }
}
