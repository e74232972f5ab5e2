// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Enhancement session: the upload currently on screen and the decode ->
// enhance -> encode flow the UI drives.
//
// Kept free of Dioxus types so the whole flow can be exercised in tests.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use kontrast_core::error::Result;
use kontrast_core::human_errors::{HumanError, humanize_error};
use kontrast_core::{ClaheParams, PNG_MIME, PixelBuffer};
use kontrast_enhance::{EnhanceOutcome, Enhancer, decode_upload, encode_png};
use tracing::{info, instrument};

/// A decoded upload, ready to be enhanced with any parameters.
#[derive(Debug, Clone)]
pub struct EnhanceSession {
    file_name: String,
    original: PixelBuffer,
    original_data_url: String,
    enhancer: Enhancer,
}

/// An encoded result, ready for display and download.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedResult {
    pub png: Vec<u8>,
    pub data_url: String,
}

/// The outcome of enhancing the session's image with one set of parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub params: ClaheParams,
    pub outcome: EnhanceOutcome,
    pub width: u32,
    pub height: u32,
    /// Encoding failures are kept here and shown next to the result; they
    /// never abort the page.
    pub encoded: std::result::Result<EncodedResult, HumanError>,
}

impl EnhanceSession {
    /// Decode an uploaded file. Fails for unsupported or corrupt files, in
    /// which case the enhancer is never invoked.
    #[instrument(skip(bytes), fields(bytes = bytes.len()))]
    pub fn open(bytes: &[u8], file_name: &str) -> Result<Self> {
        let original = decode_upload(bytes, file_name)?;
        let original_data_url = data_url(PNG_MIME, &encode_png(&original)?);
        info!(
            width = original.width(),
            height = original.height(),
            "upload ready for enhancement"
        );
        Ok(Self {
            file_name: file_name.to_string(),
            original,
            original_data_url,
            enhancer: Enhancer::new(),
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The decoded upload as a 3-channel BGR buffer.
    pub fn original(&self) -> &PixelBuffer {
        &self.original
    }

    /// The upload re-encoded as PNG, as a `data:` URL for an `<img>`.
    pub fn original_data_url(&self) -> &str {
        &self.original_data_url
    }

    /// Enhance the upload with `params` and encode the result.
    pub fn render(&self, params: &ClaheParams) -> Rendered {
        let enhanced = self.enhancer.run(&self.original, params);
        let (width, height) = enhanced.image.dimensions();
        let encoded = encode_png(&enhanced.image)
            .map(|png| EncodedResult {
                data_url: data_url(PNG_MIME, &png),
                png,
            })
            .map_err(|err| {
                tracing::error!(error = %err, "failed to encode enhanced image");
                humanize_error(&err)
            });

        Rendered {
            params: *params,
            outcome: enhanced.outcome,
            width,
            height,
            encoded,
        }
    }
}

/// Write an encoded result to `path`.
pub fn write_download(png: &[u8], path: &Path) -> Result<()> {
    std::fs::write(path, png)?;
    info!(path = %path.display(), bytes = png.len(), "download written");
    Ok(())
}

/// Build a base64 `data:` URL.
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use kontrast_core::KontrastError;

    fn png_upload(width: u32, height: u32) -> Vec<u8> {
        let rgb = RgbImage::from_fn(width, height, |x, y| {
            let v = ((x * 7 + y * 3) % 256) as u8;
            Rgb([v, v / 2, 255 - v])
        });
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(rgb)
            .write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn open_and_render_default_params() {
        let session = EnhanceSession::open(&png_upload(40, 30), "upload.png").unwrap();
        assert_eq!(session.file_name(), "upload.png");
        assert_eq!(session.original().dimensions(), (40, 30));
        assert!(session.original_data_url().starts_with("data:image/png;base64,"));

        let rendered = session.render(&ClaheParams::default());
        assert_eq!(rendered.outcome, EnhanceOutcome::Equalized);
        assert_eq!((rendered.width, rendered.height), (40, 30));
        let encoded = rendered.encoded.unwrap();
        let decoded = image::load_from_memory(&encoded.png).unwrap();
        assert_eq!(decoded.color(), image::ColorType::L8);
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
    }

    #[test]
    fn tiny_upload_falls_back_to_grayscale() {
        let session = EnhanceSession::open(&png_upload(3, 3), "tiny.png").unwrap();
        let rendered = session.render(&ClaheParams::new(2.0, 8, 8));
        assert_eq!(rendered.outcome, EnhanceOutcome::Grayscale);
        assert!(rendered.encoded.is_ok());
    }

    #[test]
    fn unsupported_upload_is_rejected_before_enhancing() {
        let err = EnhanceSession::open(&png_upload(4, 4), "upload.gif").unwrap_err();
        assert!(matches!(err, KontrastError::UnsupportedFormat(_)));
    }

    #[test]
    fn download_is_written_to_disk() {
        let session = EnhanceSession::open(&png_upload(16, 16), "a.png").unwrap();
        let encoded = session.render(&ClaheParams::default()).encoded.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(kontrast_core::DOWNLOAD_FILE_NAME);
        write_download(&encoded.png, &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), encoded.png);
    }

    #[test]
    fn download_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        let err = write_download(&[1, 2, 3], &path).unwrap_err();
        assert!(matches!(err, KontrastError::Io(_)));
    }

    #[test]
    fn data_url_encodes_base64() {
        assert_eq!(data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
    }
}
