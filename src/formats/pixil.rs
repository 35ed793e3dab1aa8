//! Pixilart project (`.pixil`) decoder
//!
//! A project is a JSON document:
//! - `width`, `height`: canvas dimensions
//! - `frames[0].layers[0]`: the layer that gets rendered
//!
//! Depending on the revision, the layer stores its pixels either as a flat
//! `pixelData` array (RGBA samples, `width * height * 4` entries) or as a
//! `src` data URI wrapping a base64-encoded PNG. In the second case the
//! embedded image's own header decides the dimensions.

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, RgbaImage};
use serde::Deserialize;
use std::path::Path;

use crate::error::DecodeError;

#[derive(Debug, Deserialize)]
struct ProjectFile {
    width: u32,
    height: u32,
    frames: Vec<Frame>,
}

#[derive(Debug, Deserialize)]
struct Frame {
    layers: Vec<Layer>,
}

#[derive(Debug, Deserialize)]
struct Layer {
    #[serde(rename = "pixelData", default)]
    pixel_data: Option<Vec<u8>>,
    #[serde(default)]
    src: Option<String>,
}

/// Where a layer's pixels come from
enum PixelSource<'a> {
    Raw(&'a [u8]),
    DataUri(&'a str),
}

impl Layer {
    fn pixel_source(&self) -> Result<PixelSource<'_>, DecodeError> {
        match (&self.pixel_data, &self.src) {
            (Some(raw), None) => Ok(PixelSource::Raw(raw)),
            (None, Some(uri)) => Ok(PixelSource::DataUri(uri)),
            (Some(_), Some(_)) => Err(DecodeError::Malformed(
                "layer has both 'pixelData' and 'src'".to_string(),
            )),
            (None, None) => Err(DecodeError::Malformed(
                "layer has neither 'pixelData' nor 'src'".to_string(),
            )),
        }
    }
}

/// Decode a project file from disk
pub fn decode(path: &Path) -> Result<DynamicImage, DecodeError> {
    let text = std::fs::read_to_string(path)?;
    decode_str(&text)
}

/// Decode a project held in memory
pub fn decode_str(json: &str) -> Result<DynamicImage, DecodeError> {
    let project: ProjectFile = serde_json::from_str(json)?;

    let layer = project
        .frames
        .first()
        .ok_or_else(|| DecodeError::Malformed("project has no frames".to_string()))?
        .layers
        .first()
        .ok_or_else(|| DecodeError::Malformed("first frame has no layers".to_string()))?;

    match layer.pixel_source()? {
        PixelSource::Raw(samples) => decode_raw(project.width, project.height, samples),
        PixelSource::DataUri(uri) => decode_data_uri(uri),
    }
}

/// Decode a project file, logging and discarding any error.
///
/// Callers treat `None` as "skip this item".
pub fn load_project(path: &Path) -> Option<DynamicImage> {
    match decode(path) {
        Ok(image) => {
            log::debug!(
                "Decoded project {} ({}x{})",
                path.display(),
                image.width(),
                image.height()
            );
            Some(image)
        }
        Err(e) => {
            log::error!("Error loading project {}: {}", path.display(), e);
            None
        }
    }
}

fn decode_raw(width: u32, height: u32, samples: &[u8]) -> Result<DynamicImage, DecodeError> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or(DecodeError::SizeMismatch {
            expected: usize::MAX,
            actual: samples.len(),
        })?;

    if samples.len() != expected {
        return Err(DecodeError::SizeMismatch {
            expected,
            actual: samples.len(),
        });
    }

    let buffer = RgbaImage::from_raw(width, height, samples.to_vec()).ok_or(
        DecodeError::SizeMismatch {
            expected,
            actual: samples.len(),
        },
    )?;
    Ok(DynamicImage::ImageRgba8(buffer))
}

fn decode_data_uri(uri: &str) -> Result<DynamicImage, DecodeError> {
    let (_, payload) = uri
        .split_once(',')
        .ok_or_else(|| DecodeError::Malformed("'src' is not a data URI".to_string()))?;

    let bytes = general_purpose::STANDARD.decode(payload.trim())?;
    Ok(image::load_from_memory(&bytes)?)
}
