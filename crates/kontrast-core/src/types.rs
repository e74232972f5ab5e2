// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Kontrast: pixel buffers, enhancement parameters, and
// accepted upload formats.

use serde::{Deserialize, Serialize};

use crate::error::{KontrastError, Result};

/// File name offered when the enhanced image is downloaded.
pub const DOWNLOAD_FILE_NAME: &str = "enhanced_clahe_image.png";

/// MIME type of the downloadable result.
pub const PNG_MIME: &str = "image/png";

// -- Pixel buffers ------------------------------------------------------------

/// An interleaved 8-bit pixel buffer of shape `(height, width, channels)`.
///
/// Color buffers handed to the enhancement function are 3-channel with
/// Blue-Green-Red sample order. Single-channel buffers hold grayscale
/// results. The buffer is never reshaped in place: every transformation
/// produces a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw interleaved samples.
    ///
    /// Fails when `channels` is zero or when `data` does not hold exactly
    /// `width * height * channels` samples. Zero-sized buffers are allowed.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        if channels == 0 {
            return Err(KontrastError::InvalidBuffer(
                "channel count must be at least 1".into(),
            ));
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(KontrastError::InvalidBuffer(format!(
                "{width}x{height}x{channels} buffer needs {expected} samples, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Single-channel buffer from a gray plane. `data` is truncated or
    /// zero-extended to `width * height` samples.
    pub fn from_luma(width: u32, height: u32, mut data: Vec<u8>) -> Self {
        data.resize(width as usize * height as usize, 0);
        Self {
            width,
            height,
            channels: 1,
            data,
        }
    }

    /// A buffer with every sample set to `value`.
    pub fn filled(width: u32, height: u32, channels: u8, value: u8) -> Result<Self> {
        let len = width as usize * height as usize * channels as usize;
        Self::new(width, height, channels, vec![value; len])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// `(width, height)`, matching `image::ImageBuffer::dimensions`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when the buffer has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Borrow the interleaved samples.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return the interleaved samples.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Sample at `(x, y)` in channel `c`, or `None` when out of range.
    pub fn sample(&self, x: u32, y: u32, c: u8) -> Option<u8> {
        if x >= self.width || y >= self.height || c >= self.channels {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * self.channels as usize
            + c as usize;
        self.data.get(idx).copied()
    }

    /// Extract one channel as a single-channel buffer.
    pub fn channel(&self, c: u8) -> Option<Self> {
        if c >= self.channels {
            return None;
        }
        let plane: Vec<u8> = self
            .data
            .iter()
            .skip(c as usize)
            .step_by(self.channels as usize)
            .copied()
            .collect();
        Some(Self {
            width: self.width,
            height: self.height,
            channels: 1,
            data: plane,
        })
    }
}

// -- Enhancement parameters ---------------------------------------------------

/// Lower bound of the clip-limit slider.
pub const CLIP_LIMIT_MIN: f32 = 1.0;
/// Upper bound of the clip-limit slider.
pub const CLIP_LIMIT_MAX: f32 = 40.0;
/// Slider increment for the clip limit.
pub const CLIP_LIMIT_STEP: f32 = 0.1;
/// Default clip limit.
pub const CLIP_LIMIT_DEFAULT: f32 = 2.0;

/// Lower bound of the tile-row / tile-column sliders.
pub const TILE_GRID_MIN: u32 = 2;
/// Upper bound of the tile-row / tile-column sliders.
pub const TILE_GRID_MAX: u32 = 32;
/// Default number of tile rows and columns.
pub const TILE_GRID_DEFAULT: u32 = 8;

/// Rows and columns of the adaptive tile grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileGrid {
    pub rows: u32,
    pub cols: u32,
}

impl TileGrid {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Total number of tiles.
    pub fn tile_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new(TILE_GRID_DEFAULT, TILE_GRID_DEFAULT)
    }
}

impl std::fmt::Display for TileGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Parameters of one CLAHE invocation. Supplied fresh on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClaheParams {
    /// Contrast clip limit. Non-positive values disable clipping.
    pub clip_limit: f32,
    /// Tile grid used to localise the histograms.
    pub grid: TileGrid,
}

impl ClaheParams {
    pub fn new(clip_limit: f32, rows: u32, cols: u32) -> Self {
        Self {
            clip_limit,
            grid: TileGrid::new(rows, cols),
        }
    }

    /// Snap every value into the range offered by the UI sliders.
    ///
    /// The enhancement function itself never clamps; this is for values that
    /// come from the environment or a text field.
    pub fn clamped(self) -> Self {
        let clip_limit = if self.clip_limit.is_finite() {
            self.clip_limit.clamp(CLIP_LIMIT_MIN, CLIP_LIMIT_MAX)
        } else {
            CLIP_LIMIT_DEFAULT
        };
        Self {
            clip_limit,
            grid: TileGrid::new(
                self.grid.rows.clamp(TILE_GRID_MIN, TILE_GRID_MAX),
                self.grid.cols.clamp(TILE_GRID_MIN, TILE_GRID_MAX),
            ),
        }
    }
}

impl Default for ClaheParams {
    fn default() -> Self {
        Self {
            clip_limit: CLIP_LIMIT_DEFAULT,
            grid: TileGrid::default(),
        }
    }
}

// -- Upload formats -----------------------------------------------------------

/// Image formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadFormat {
    Jpeg,
    Png,
}

impl UploadFormat {
    /// Extensions offered by the file picker.
    pub const EXTENSIONS: [&'static str; 3] = ["jpg", "jpeg", "png"];

    /// MIME type string.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => PNG_MIME,
        }
    }

    /// Infer the upload format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Infer the upload format from a file name such as `photo.JPG`.
    pub fn from_file_name(name: &str) -> Option<Self> {
        std::path::Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}
