//! Transport payload decoding: base64 (optionally wrapped in a data URI)
//! into a 3-channel raster image.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::RgbImage;

use crate::error::{Result, RoomError};

/// Decode an image payload into an RGB raster.
///
/// The payload is either raw base64 image data or a data URI
/// (`data:image/png;base64,<payload>`); a data-URI header is stripped at
/// the first comma. Accepts any raster format the `image` crate
/// recognises (PNG, JPEG, BMP, ...).
pub fn decode_image_payload(payload: &str) -> Result<RgbImage> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        return Err(RoomError::MalformedInput("empty image payload".into()));
    }

    let body = if let Some((_, rest)) = trimmed.split_once(',') {
        rest
    } else if trimmed.starts_with("data:") {
        return Err(RoomError::MalformedInput(
            "data URI is missing the comma separator before the base64 body".into(),
        ));
    } else {
        trimmed
    };

    let bytes = STANDARD
        .decode(body.as_bytes())
        .map_err(|err| RoomError::MalformedInput(format!("invalid base64 data: {err}")))?;

    let decoded = image::load_from_memory(&bytes)?;
    Ok(decoded.to_rgb8())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, GrayImage, ImageFormat, Luma};

    use super::*;

    fn png_base64() -> String {
        let mut img = GrayImage::new(8, 8);
        img.put_pixel(3, 3, Luma([200u8]));
        let mut buf = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        STANDARD.encode(buf)
    }

    #[test]
    fn decodes_raw_base64() {
        let decoded = decode_image_payload(&png_base64()).unwrap();
        assert_eq!(decoded.dimensions(), (8, 8));
    }

    #[test]
    fn strips_data_uri_header() {
        let payload = format!("data:image/png;base64,{}", png_base64());
        let decoded = decode_image_payload(&payload).unwrap();
        assert_eq!(decoded.dimensions(), (8, 8));
    }

    #[test]
    fn rejects_data_uri_without_comma() {
        let err = decode_image_payload("data:image/png;base64").unwrap_err();
        assert!(matches!(err, RoomError::MalformedInput(_)));
        assert!(err.to_string().contains("comma"));
    }

    #[test]
    fn rejects_empty_payload() {
        let err = decode_image_payload("   ").unwrap_err();
        assert!(matches!(err, RoomError::MalformedInput(_)));
    }

    #[test]
    fn rejects_non_base64_text() {
        let err = decode_image_payload("this is !!! not base64").unwrap_err();
        assert!(matches!(err, RoomError::MalformedInput(_)));
    }

    #[test]
    fn rejects_bytes_that_are_not_an_image() {
        let payload = STANDARD.encode(b"just some text pretending to be an image");
        let err = decode_image_payload(&payload).unwrap_err();
        assert!(matches!(err, RoomError::ImageDecode(_)));
    }
}
