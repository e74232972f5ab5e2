// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contrast Limited Adaptive Histogram Equalization for 8-bit grayscale images.
//
// The image is split into a rows x cols grid of equally sized tiles. When the
// image size is not a multiple of the grid, tiles are sized up and the missing
// border is mirrored (edge pixel not repeated) for histogram purposes only.
// Each tile gets a clipped, redistributed histogram and a cumulative lookup
// table; every output pixel blends the lookup tables of the four nearest tile
// centres bilinearly.

use image::{GrayImage, Luma};
use kontrast_core::error::{KontrastError, Result};
use kontrast_core::{ClaheParams, TileGrid};
use tracing::{debug, instrument};

use super::AdaptiveEqualizer;

const HIST_SIZE: usize = 256;

type Lut = [u8; HIST_SIZE];

/// Tiled, contrast-limited histogram equalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clahe;

impl AdaptiveEqualizer for Clahe {
    #[instrument(
        skip(self, gray),
        fields(
            width = gray.width(),
            height = gray.height(),
            clip_limit = params.clip_limit,
            grid = %params.grid
        )
    )]
    fn equalize(&self, gray: &GrayImage, params: &ClaheParams) -> Result<GrayImage> {
        let layout = TileLayout::new(gray.dimensions(), params.grid)?;
        let area = layout.tile_area();
        let clip = clip_threshold(params.clip_limit, area);
        let scale = (HIST_SIZE - 1) as f32 / area as f32;
        debug!(
            tile_width = layout.tile_width,
            tile_height = layout.tile_height,
            padded = layout.is_padded(),
            clip = ?clip,
            "tile layout computed"
        );

        let luts: Vec<Lut> = (0..layout.rows)
            .flat_map(|ty| (0..layout.cols).map(move |tx| (tx, ty)))
            .map(|(tx, ty)| tile_lut(gray, &layout, tx, ty, clip, scale))
            .collect();

        Ok(interpolate(gray, &layout, &luts))
    }
}

// -- Tile layout --------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct TileLayout {
    width: u32,
    height: u32,
    rows: u32,
    cols: u32,
    tile_width: u32,
    tile_height: u32,
}

impl TileLayout {
    fn new((width, height): (u32, u32), grid: TileGrid) -> Result<Self> {
        if grid.rows == 0 || grid.cols == 0 {
            return Err(KontrastError::Equalization(format!(
                "tile grid {grid} needs at least one row and one column"
            )));
        }
        if grid.cols > width || grid.rows > height {
            return Err(KontrastError::Equalization(format!(
                "tile grid {grid} does not fit a {width}x{height} image"
            )));
        }
        Ok(Self {
            width,
            height,
            rows: grid.rows,
            cols: grid.cols,
            tile_width: width.div_ceil(grid.cols),
            tile_height: height.div_ceil(grid.rows),
        })
    }

    fn tile_area(&self) -> usize {
        self.tile_width as usize * self.tile_height as usize
    }

    fn is_padded(&self) -> bool {
        self.width % self.cols != 0 || self.height % self.rows != 0
    }
}

/// Mirror an index past the end of `0..len` back inside, without repeating
/// the edge sample. Valid for `i <= 2 * (len - 1)`.
fn reflect_101(i: u32, len: u32) -> u32 {
    if i < len { i } else { 2 * (len - 1) - i }
}

// -- Histograms ---------------------------------------------------------------

/// Per-bin cap for a tile of `area` pixels, or `None` when clipping is off.
fn clip_threshold(clip_limit: f32, area: usize) -> Option<u32> {
    if clip_limit > 0.0 {
        Some(((clip_limit * area as f32 / HIST_SIZE as f32) as u32).max(1))
    } else {
        None
    }
}

/// Cap every bin at `limit` and hand the excess back out: an equal share to
/// every bin, then the remainder one by one spread across the range.
fn clip_histogram(hist: &mut [u32; HIST_SIZE], limit: u32) {
    let mut clipped = 0usize;
    for bin in hist.iter_mut() {
        if *bin > limit {
            clipped += (*bin - limit) as usize;
            *bin = limit;
        }
    }

    let batch = (clipped / HIST_SIZE) as u32;
    let residual = clipped % HIST_SIZE;
    for bin in hist.iter_mut() {
        *bin += batch;
    }

    if residual != 0 {
        let step = (HIST_SIZE / residual).max(1);
        for bin in hist.iter_mut().step_by(step).take(residual) {
            *bin += 1;
        }
    }
}

fn build_lut(hist: &[u32; HIST_SIZE], scale: f32) -> Lut {
    let mut lut = [0u8; HIST_SIZE];
    let mut sum = 0u64;
    for (entry, &count) in lut.iter_mut().zip(hist.iter()) {
        sum += count as u64;
        *entry = (sum as f32 * scale).round().clamp(0.0, 255.0) as u8;
    }
    lut
}

fn tile_lut(
    gray: &GrayImage,
    layout: &TileLayout,
    tx: u32,
    ty: u32,
    clip: Option<u32>,
    scale: f32,
) -> Lut {
    let mut hist = [0u32; HIST_SIZE];
    let x0 = tx * layout.tile_width;
    let y0 = ty * layout.tile_height;

    for y in y0..y0 + layout.tile_height {
        let sy = reflect_101(y, layout.height);
        for x in x0..x0 + layout.tile_width {
            let sx = reflect_101(x, layout.width);
            hist[gray.get_pixel(sx, sy).0[0] as usize] += 1;
        }
    }

    if let Some(limit) = clip {
        clip_histogram(&mut hist, limit);
    }
    build_lut(&hist, scale)
}

// -- Interpolation ------------------------------------------------------------

/// The two tiles whose centres bracket a pixel along one axis.
#[derive(Debug, Clone, Copy)]
struct Bracket {
    lo: usize,
    hi: usize,
    /// Weight of `hi`; `lo` gets `1 - w_hi`.
    w_hi: f32,
}

impl Bracket {
    fn new(pos: f32, count: u32) -> Self {
        let base = pos.floor();
        let w_hi = pos - base;
        let base = base as i64;
        let last = count as i64 - 1;
        Self {
            lo: base.clamp(0, last) as usize,
            hi: (base + 1).clamp(0, last) as usize,
            w_hi,
        }
    }

    fn along(len: u32, tile: u32, count: u32) -> Vec<Self> {
        let inv = 1.0 / tile as f32;
        (0..len)
            .map(|i| Self::new(i as f32 * inv - 0.5, count))
            .collect()
    }
}

fn interpolate(gray: &GrayImage, layout: &TileLayout, luts: &[Lut]) -> GrayImage {
    let cols = layout.cols as usize;
    let xs = Bracket::along(layout.width, layout.tile_width, layout.cols);
    let ys = Bracket::along(layout.height, layout.tile_height, layout.rows);

    GrayImage::from_fn(layout.width, layout.height, |x, y| {
        let p = gray.get_pixel(x, y).0[0] as usize;
        let bx = xs[x as usize];
        let by = ys[y as usize];

        let lookup = |row: usize, col: usize| luts[row * cols + col][p] as f32;
        let top = lookup(by.lo, bx.lo) * (1.0 - bx.w_hi) + lookup(by.lo, bx.hi) * bx.w_hi;
        let bottom = lookup(by.hi, bx.lo) * (1.0 - bx.w_hi) + lookup(by.hi, bx.hi) * bx.w_hi;
        let value = top * (1.0 - by.w_hi) + bottom * by.w_hi;

        Luma([value.round().clamp(0.0, 255.0) as u8])
    })
}

// -- Tests --------------------------------------------------------------------
