// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the upload/download boundary.
//
// Every technical error is mapped to plain language with a clear suggestion.
// The severity drives the colour of the message in the UI.

use crate::error::KontrastError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Disk full or a permission hiccup. Trying again may work.
    Transient,
    /// The user must pick a different file or location.
    ActionRequired,
    /// A defect rather than something the user can fix.
    Permanent,
}

/// A human-readable error with a plain message and actionable suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanError {
    /// Plain summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level (drives colour in UI).
    pub severity: Severity,
}

impl HumanError {
    /// One-line rendering for status bars and logs.
    pub fn one_line(&self) -> String {
        format!("{} {}", self.message, self.suggestion)
    }
}

/// Convert a `KontrastError` into a `HumanError`.
pub fn humanize_error(err: &KontrastError) -> HumanError {
    match err {
        KontrastError::UnsupportedFormat(detail) => HumanError {
            message: "This type of image isn't supported.".into(),
            suggestion: format!("Please upload a JPG, JPEG, or PNG file. ({detail})"),
            severity: Severity::ActionRequired,
        },

        KontrastError::Decode(_) => HumanError {
            message: "We couldn't read this image.".into(),
            suggestion: "The file may be damaged. Try opening it in another program, or re-save it as PNG.".into(),
            severity: Severity::ActionRequired,
        },

        KontrastError::Encode(detail) => HumanError {
            message: "The result couldn't be prepared for download.".into(),
            suggestion: format!("The image on screen is still valid; try again with other settings. ({detail})"),
            severity: Severity::Permanent,
        },

        KontrastError::InvalidBuffer(detail)
        | KontrastError::Grayscale(detail)
        | KontrastError::Equalization(detail) => HumanError {
            message: "Something went wrong while processing the image.".into(),
            suggestion: format!("Try a different image or different settings. ({detail})"),
            severity: Severity::Permanent,
        },

        KontrastError::Io(io) => match io.kind() {
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "We aren't allowed to write there.".into(),
                suggestion: "Choose a different folder for the download.".into(),
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::NotFound => HumanError {
                message: "That file or folder no longer exists.".into(),
                suggestion: "Pick the file again, or choose another folder.".into(),
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "Reading or writing a file failed.".into(),
                suggestion: format!("Check there is free disk space and try again. ({io})"),
                severity: Severity::Transient,
            },
        },
    }
}
