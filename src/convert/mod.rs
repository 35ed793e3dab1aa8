//! Single-image conversion and saving
//!
//! `try_*` functions return typed errors. [`convert`] and [`save_bitmap`] are
//! the boundaries used by hosts and the batch driver: they log failures and
//! return `false`, so one bad file never stops the caller.

pub mod batch;
pub mod icon;

pub use batch::{batch_convert, BatchJob, BatchSummary};

use image::{ColorType, DynamicImage};
use std::borrow::Cow;
use std::path::Path;

use crate::error::ConvertError;
use crate::formats::{open_source, TargetFormat};

/// What to convert
#[derive(Clone, Copy, Debug)]
pub enum Source<'a> {
    /// A file on disk, routed by extension
    Path(&'a Path),
    /// An image already in memory
    Bitmap(&'a DynamicImage),
}

/// Drop the alpha channel for formats that cannot store it.
///
/// Alpha is discarded, not composited against a background.
pub fn flatten_for(format: TargetFormat, image: &DynamicImage) -> Cow<'_, DynamicImage> {
    if format.supports_alpha() {
        return Cow::Borrowed(image);
    }

    match image.color() {
        ColorType::L8 | ColorType::Rgb8 => Cow::Borrowed(image),
        _ => Cow::Owned(DynamicImage::ImageRgb8(image.to_rgb8())),
    }
}

/// Write `image` to `path` in `format`
pub fn write_bitmap(
    image: &DynamicImage,
    path: &Path,
    format: TargetFormat,
) -> Result<(), ConvertError> {
    let Some(image_format) = format.image_format() else {
        return icon::save_icon_pack(image, path);
    };

    let prepared = flatten_for(format, image);
    prepared.save_with_format(path, image_format)?;
    Ok(())
}

/// Convert a source to `target_path`, returning the first error
pub fn try_convert(
    source: Source<'_>,
    target_path: &Path,
    format: TargetFormat,
) -> Result<(), ConvertError> {
    let opened;
    let image = match source {
        Source::Path(path) => {
            opened = open_source(path)?;
            &opened
        }
        Source::Bitmap(image) => image,
    };

    write_bitmap(image, target_path, format)
}

/// Convert a source to `target_path`; failures are logged and reported as `false`
pub fn convert(source: Source<'_>, target_path: &Path, format: TargetFormat) -> bool {
    match try_convert(source, target_path, format) {
        Ok(()) => {
            log::info!("Converted to {} ({})", target_path.display(), format);
            true
        }
        Err(e) => {
            match source {
                Source::Path(path) => log::error!(
                    "Conversion error for {} -> {}: {}",
                    path.display(),
                    target_path.display(),
                    e
                ),
                Source::Bitmap(_) => {
                    log::error!("Conversion error for {}: {}", target_path.display(), e)
                }
            }
            false
        }
    }
}

/// Save an image, inferring the format from the path's extension
pub fn try_save_bitmap(image: &DynamicImage, path: &Path) -> Result<(), ConvertError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let format = TargetFormat::from_extension(extension).ok_or_else(|| {
        ConvertError::UnsupportedFormat(if extension.is_empty() {
            "<no extension>".to_string()
        } else {
            extension.to_string()
        })
    })?;

    write_bitmap(image, path, format)
}

/// Save an image, inferring the format from the path's extension.
///
/// Returns `false` (after logging) instead of propagating errors.
pub fn save_bitmap(image: &DynamicImage, path: &Path) -> bool {
    match try_save_bitmap(image, path) {
        Ok(()) => {
            log::info!("Saved image to {}", path.display());
            true
        }
        Err(e) => {
            log::error!("Failed to save {}: {}", path.display(), e);
            false
        }
    }
}
