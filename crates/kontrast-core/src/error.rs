// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Kontrast.

use thiserror::Error;

/// Top-level error type for all Kontrast operations.
#[derive(Debug, Error)]
pub enum KontrastError {
    // -- Boundary errors (upload / download) --
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("failed to encode image: {0}")]
    Encode(String),

    // -- Transformation errors --
    #[error("invalid pixel buffer: {0}")]
    InvalidBuffer(String),

    #[error("grayscale conversion failed: {0}")]
    Grayscale(String),

    #[error("adaptive equalization failed: {0}")]
    Equalization(String),

    // -- Storage --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, KontrastError>;
