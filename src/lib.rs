//! pixelcat: image viewing backend and batch converter
//!
//! Decodes Pixilart `.pixil` projects and standard raster files, applies
//! non-destructive adjustments, and exports to PNG, JPEG, BMP or multi-size
//! ICO, one file at a time or as a failure-tolerant batch.

pub mod adjust;
pub mod convert;
pub mod error;
pub mod formats;
pub mod settings;

pub use adjust::{adjust_brightness_contrast, rotate_clockwise_90, AdjustmentSession};
pub use convert::{
    batch_convert, convert, save_bitmap, try_convert, try_save_bitmap, BatchJob, BatchSummary,
    Source,
};
pub use error::{ConvertError, DecodeError};
pub use formats::pixil::{decode, load_project};
pub use formats::{open_source, TargetFormat};
pub use settings::AppSettings;
