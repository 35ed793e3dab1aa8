//! Input routing and output format definitions
//!
//! Inputs are routed by extension: `.pixil` projects go through the project
//! decoder, everything else is opened by the image library, which guesses the
//! format from the file header.

pub mod pixil;
mod target;

pub use target::TargetFormat;

use image::DynamicImage;
use std::path::Path;

use crate::error::ConvertError;

/// Extension of Pixilart project files
pub const PROJECT_EXTENSION: &str = "pixil";

/// How an input file will be decoded
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    /// Pixilart project, decoded by [`pixil::decode`]
    Project,
    /// Any format the image library can detect from the header
    Standard,
}

/// Detect how a path should be decoded, based on its extension
pub fn detect_source(path: &Path) -> SourceKind {
    let is_project = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PROJECT_EXTENSION));

    if is_project {
        SourceKind::Project
    } else {
        SourceKind::Standard
    }
}

/// Open any supported input file as a bitmap
pub fn open_source(path: &Path) -> Result<DynamicImage, ConvertError> {
    match detect_source(path) {
        SourceKind::Project => Ok(pixil::decode(path)?),
        SourceKind::Standard => {
            let image = image::ImageReader::open(path)?
                .with_guessed_format()?
                .decode()?;
            Ok(image)
        }
    }
}
