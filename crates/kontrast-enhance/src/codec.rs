// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Upload decoding and PNG encoding. Bridges encoded files and the `image`
// crate's buffers to the interleaved BGR `PixelBuffer` the enhancer consumes.

use image::{DynamicImage, GrayImage, ImageBuffer, ImageFormat, LumaA, RgbImage, RgbaImage};
use kontrast_core::error::{KontrastError, Result};
use kontrast_core::{PixelBuffer, UploadFormat};
use tracing::{debug, info, instrument, warn};

// -- Decoding -----------------------------------------------------------------

/// Decode an uploaded JPG, JPEG, or PNG file into a 3-channel BGR buffer.
///
/// The file name must carry one of the accepted extensions and the bytes must
/// actually be JPEG or PNG data. When the two disagree the content wins.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_upload(data: &[u8], file_name: &str) -> Result<PixelBuffer> {
    let declared = UploadFormat::from_file_name(file_name).ok_or_else(|| {
        KontrastError::UnsupportedFormat(format!(
            "{file_name}: expected a .jpg, .jpeg or .png file"
        ))
    })?;

    let sniffed = image::guess_format(data)
        .map_err(|err| KontrastError::Decode(format!("{file_name}: {err}")))?;
    let actual = match sniffed {
        ImageFormat::Jpeg => UploadFormat::Jpeg,
        ImageFormat::Png => UploadFormat::Png,
        other => {
            return Err(KontrastError::UnsupportedFormat(format!(
                "{file_name} contains {other:?} data"
            )));
        }
    };
    if actual != declared {
        warn!(
            declared = declared.mime_type(),
            actual = actual.mime_type(),
            "file extension does not match content; decoding by content"
        );
    }

    let img = image::load_from_memory_with_format(data, sniffed)
        .map_err(|err| KontrastError::Decode(format!("{file_name}: {err}")))?;
    info!(
        width = img.width(),
        height = img.height(),
        format = actual.mime_type(),
        "Upload decoded"
    );

    rgb_to_bgr(&img.to_rgb8())
}

/// Reorder an RGB image into an interleaved BGR buffer.
pub fn rgb_to_bgr(rgb: &RgbImage) -> Result<PixelBuffer> {
    let (width, height) = rgb.dimensions();
    let mut data = Vec::with_capacity(rgb.as_raw().len());
    for px in rgb.pixels() {
        let [r, g, b] = px.0;
        data.extend_from_slice(&[b, g, r]);
    }
    PixelBuffer::new(width, height, 3, data)
}

// -- Encoding -----------------------------------------------------------------

/// Wrap a buffer as a `DynamicImage` for display or encoding.
///
/// One channel is gray, two gray+alpha, three BGR, four BGRA. Any other
/// channel count cannot be represented.
pub fn to_dynamic(buf: &PixelBuffer) -> Result<DynamicImage> {
    let (width, height) = buf.dimensions();
    let raw = buf.as_raw().to_vec();
    let image = match buf.channels() {
        1 => GrayImage::from_raw(width, height, raw).map(DynamicImage::ImageLuma8),
        2 => ImageBuffer::<LumaA<u8>, Vec<u8>>::from_raw(width, height, raw)
            .map(DynamicImage::ImageLumaA8),
        3 => RgbImage::from_raw(width, height, swap_red_blue(raw, 3))
            .map(DynamicImage::ImageRgb8),
        4 => RgbaImage::from_raw(width, height, swap_red_blue(raw, 4))
            .map(DynamicImage::ImageRgba8),
        n => {
            return Err(KontrastError::Encode(format!(
                "cannot represent a {n}-channel buffer as an image"
            )));
        }
    };
    image.ok_or_else(|| {
        KontrastError::Encode(format!(
            "{width}x{height}x{} buffer does not fit its dimensions",
            buf.channels()
        ))
    })
}

/// Encode a buffer as PNG bytes.
#[instrument(skip(buf), fields(width = buf.width(), height = buf.height(), channels = buf.channels()))]
pub fn encode_png(buf: &PixelBuffer) -> Result<Vec<u8>> {
    let image = to_dynamic(buf)?;
    let bytes = encode_to_format(&image, ImageFormat::Png)?;
    debug!(png_bytes = bytes.len(), "PNG encoded");
    Ok(bytes)
}

fn swap_red_blue(mut raw: Vec<u8>, channels: usize) -> Vec<u8> {
    for px in raw.chunks_exact_mut(channels) {
        px.swap(0, 2);
    }
    raw
}

/// Encode a `DynamicImage` into the specified format, returning the raw bytes.
fn encode_to_format(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, format)
        .map_err(|err| KontrastError::Encode(format!("{format:?} encoding failed: {err}")))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn png_of(rgb: &RgbImage) -> Vec<u8> {
        encode_to_format(&DynamicImage::ImageRgb8(rgb.clone()), ImageFormat::Png).unwrap()
    }

    #[test]
    fn decode_reorders_to_bgr() {
        let rgb = RgbImage::from_pixel(3, 2, image::Rgb([200, 50, 10]));
        let buf = decode_upload(&png_of(&rgb), "photo.PNG").unwrap();
        assert_eq!(buf.dimensions(), (3, 2));
        assert_eq!(buf.channels(), 3);
        assert_eq!(&buf.as_raw()[..3], &[10, 50, 200]);
    }

    #[test]
    fn decode_trusts_content_over_extension() {
        let rgb = RgbImage::from_pixel(2, 2, image::Rgb([1, 2, 3]));
        let buf = decode_upload(&png_of(&rgb), "mislabelled.jpg").unwrap();
        assert_eq!(buf.dimensions(), (2, 2));
    }

    #[test]
    fn decode_rejects_unlisted_extension() {
        let rgb = RgbImage::new(2, 2);
        let err = decode_upload(&png_of(&rgb), "scan.tiff").unwrap_err();
        assert!(matches!(err, KontrastError::UnsupportedFormat(_)));
    }

    #[test]
    fn decode_rejects_other_formats_behind_allowed_names() {
        let mut bmp = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(2, 2))
            .write_to(&mut std::io::Cursor::new(&mut bmp), ImageFormat::Bmp)
            .unwrap();
        let err = decode_upload(&bmp, "sneaky.png").unwrap_err();
        assert!(matches!(err, KontrastError::UnsupportedFormat(_)));
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode_upload(b"definitely not an image", "x.png").unwrap_err();
        assert!(matches!(err, KontrastError::Decode(_)));
    }

    #[test]
    fn truncated_png_is_a_decode_error() {
        let rgb = RgbImage::from_pixel(16, 16, image::Rgb([9, 9, 9]));
        let png = png_of(&rgb);
        let err = decode_upload(&png[..png.len() / 2], "cut.png").unwrap_err();
        assert!(matches!(err, KontrastError::Decode(_)));
    }

    #[test]
    fn gray_buffer_encodes_as_png() {
        let buf = PixelBuffer::from_luma(4, 4, vec![128; 16]);
        let bytes = encode_png(&buf).unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.color(), image::ColorType::L8);
    }

    #[test]
    fn bgr_buffer_encodes_as_rgb() {
        let buf = PixelBuffer::new(1, 1, 3, vec![10, 50, 200]).unwrap();
        let image = to_dynamic(&buf).unwrap();
        assert_eq!(image.to_rgb8().get_pixel(0, 0).0, [200, 50, 10]);
    }

    #[test]
    fn unusual_channel_count_fails_to_encode() {
        let buf = PixelBuffer::filled(2, 2, 5, 0).unwrap();
        assert!(matches!(encode_png(&buf), Err(KontrastError::Encode(_))));
    }
}
