//! Normalises whatever the page uploads into something the provider accepts.

use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageFormat, ImageOutputFormat};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const JPEG_QUALITY: u8 = 85;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
        }
    }
}

/// A JPEG or PNG byte stream, base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub media_type: MediaType,
    pub data: String,
}

impl ImagePayload {
    /// Accepts raw base64 or a `data:<type>;base64,<data>` URL.
    pub fn from_base64(input: &str) -> Result<Self> {
        let encoded = strip_data_url(input.trim());
        if encoded.is_empty() {
            return Err(Error::MissingImage);
        }

        let bytes = general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| Error::InvalidImage(format!("bad base64: {e}")))?;

        match image::guess_format(&bytes) {
            Ok(ImageFormat::Jpeg) => Ok(Self {
                media_type: MediaType::Jpeg,
                data: encoded.to_string(),
            }),
            Ok(ImageFormat::Png) => Ok(Self {
                media_type: MediaType::Png,
                data: encoded.to_string(),
            }),
            _ => Self::from_bytes(&bytes),
        }
    }

    /// Keeps JPEG and PNG as they are, re-encodes anything else decodable as JPEG.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(Error::MissingImage);
        }

        match image::guess_format(bytes) {
            Ok(ImageFormat::Jpeg) => return Ok(Self::encode(MediaType::Jpeg, bytes)),
            Ok(ImageFormat::Png) => return Ok(Self::encode(MediaType::Png, bytes)),
            _ => {}
        }

        let img = image::load_from_memory(bytes)
            .map_err(|e| Error::InvalidImage(format!("unreadable image: {e}")))?;

        // jpeg has no alpha channel
        let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
        let mut jpeg_bytes = Vec::new();
        rgb.write_to(
            &mut Cursor::new(&mut jpeg_bytes),
            ImageOutputFormat::Jpeg(JPEG_QUALITY),
        )
        .map_err(|e| Error::InvalidImage(format!("could not re-encode as jpeg: {e}")))?;

        tracing::debug!(
            original = bytes.len(),
            encoded = jpeg_bytes.len(),
            "re-encoded upload as jpeg"
        );

        Ok(Self::encode(MediaType::Jpeg, &jpeg_bytes))
    }

    pub fn as_data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type.as_str(), self.data)
    }

    fn encode(media_type: MediaType, bytes: &[u8]) -> Self {
        Self {
            media_type,
            data: general_purpose::STANDARD.encode(bytes),
        }
    }
}

fn strip_data_url(input: &str) -> &str {
    if input.starts_with("data:") {
        input.split_once(',').map_or("", |(_, data)| data)
    } else {
        input
    }
}
