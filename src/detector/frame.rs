use base64::Engine as _;
use image::ImageFormat;

use crate::posture::AnalysisError;

/// An encoded camera frame whose format and size have been verified.
#[derive(Debug, Clone)]
pub struct ImageFrame {
    bytes: Vec<u8>,
    format: ImageFormat,
    width: u32,
    height: u32,
}

impl ImageFrame {
    /// Sniffs the format and fully decodes the image once to make sure the
    /// pose service never receives garbage. CPU-bound; call it off the
    /// async runtime.
    pub fn decode(bytes: Vec<u8>) -> Result<Self, AnalysisError> {
        if bytes.is_empty() {
            return Err(AnalysisError::malformed("Image payload is empty"));
        }

        let format = image::guess_format(&bytes)
            .map_err(|_| AnalysisError::malformed("Unsupported image format"))?;
        let decoded = image::load_from_memory_with_format(&bytes, format).map_err(|e| {
            tracing::debug!(error = %e, ?format, "Image decode failed");
            AnalysisError::malformed("Image could not be decoded")
        })?;

        let (width, height) = (decoded.width(), decoded.height());
        if width == 0 || height == 0 {
            return Err(AnalysisError::malformed("Image has no pixels"));
        }

        Ok(Self {
            bytes,
            format,
            width,
            height,
        })
    }

    /// Accepts plain base64 or a `data:image/...;base64,` URL.
    pub fn from_base64(encoded: &str) -> Result<Self, AnalysisError> {
        let trimmed = encoded.trim();
        let payload = if trimmed.starts_with("data:") {
            trimmed
                .split_once(',')
                .map(|(_, data)| data)
                .ok_or_else(|| AnalysisError::malformed("Data URL has no payload"))?
        } else {
            trimmed
        };

        if payload.is_empty() {
            return Err(AnalysisError::malformed("Image payload is empty"));
        }

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|_| AnalysisError::malformed("Image is not valid base64"))?;
        Self::decode(bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Cursor;

    use super::*;

    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 180, 160]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn decodes_png_dimensions() {
        let frame = ImageFrame::decode(png_bytes(8, 6)).unwrap();
        assert_eq!((frame.width(), frame.height()), (8, 6));
        assert_eq!(frame.format(), ImageFormat::Png);
        assert_eq!(frame.mime_type(), "image/png");
    }

    #[test]
    fn accepts_data_url_prefix() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(png_bytes(4, 4));
        let frame = ImageFrame::from_base64(&format!("data:image/png;base64,{encoded}")).unwrap();
        assert_eq!(frame.width(), 4);

        let plain = ImageFrame::from_base64(&encoded).unwrap();
        assert_eq!(plain.bytes(), frame.bytes());
    }

    #[test]
    fn rejects_empty_and_garbage() {
        for input in ["", "   ", "data:image/png;base64,", "not base64!!"] {
            assert!(
                matches!(ImageFrame::from_base64(input), Err(AnalysisError::MalformedInput(_))),
                "{input:?}"
            );
        }
    }

    #[test]
    fn rejects_valid_base64_that_is_not_an_image() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(b"hello, posture");
        assert!(matches!(
            ImageFrame::from_base64(&encoded),
            Err(AnalysisError::MalformedInput(_))
        ));
    }

    #[test]
    fn rejects_truncated_png() {
        let mut bytes = png_bytes(16, 16);
        bytes.truncate(40);
        assert!(matches!(
            ImageFrame::decode(bytes),
            Err(AnalysisError::MalformedInput(_))
        ));
    }
}
