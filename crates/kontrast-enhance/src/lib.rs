// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// kontrast-enhance: contrast enhancement for Kontrast.
//
// Provides the BGR to gray reduction, contrast limited adaptive histogram
// equalization (CLAHE) behind the `AdaptiveEqualizer` trait, the staged
// enhancement function with its fallback chain, and the upload/download
// codec used at the UI boundary.

pub mod codec;
pub mod enhancer;
pub mod equalize;
pub mod grayscale;

// Re-export the primary items so callers can use `kontrast_enhance::enhance` etc.
pub use codec::{decode_upload, encode_png};
pub use enhancer::{EnhanceOutcome, Enhanced, Enhancer, enhance};
pub use equalize::{AdaptiveEqualizer, Clahe, GlobalEqualizer};
pub use grayscale::to_grayscale;
