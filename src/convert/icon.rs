//! Multi-resolution icon packs

use image::imageops::FilterType;
use image::DynamicImage;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::ConvertError;

/// Square sizes embedded in every icon pack, smallest first
pub const ICON_SIZES: [u32; 6] = [16, 32, 48, 64, 128, 256];

/// Build an icon directory holding `image` resampled to every [`ICON_SIZES`] entry
pub fn build_icon_dir(image: &DynamicImage) -> Result<ico::IconDir, ConvertError> {
    let mut icon_dir = ico::IconDir::new(ico::ResourceType::Icon);

    for size in ICON_SIZES {
        let resized = image.resize_exact(size, size, FilterType::Lanczos3);
        let icon_image = ico::IconImage::from_rgba_data(size, size, resized.to_rgba8().into_raw());
        let entry = ico::IconDirEntry::encode(&icon_image)
            .map_err(|source| ConvertError::Icon { size, source })?;
        icon_dir.add_entry(entry);
    }

    Ok(icon_dir)
}

/// Encode an icon pack into any writer
pub fn write_icon_pack<W: Write>(image: &DynamicImage, writer: W) -> Result<(), ConvertError> {
    build_icon_dir(image)?.write(writer)?;
    Ok(())
}

/// Encode an icon pack to a file
///
/// Every entry is encoded before the file is created, so a failed encode
/// leaves nothing behind.
pub fn save_icon_pack(image: &DynamicImage, path: &Path) -> Result<(), ConvertError> {
    let icon_dir = build_icon_dir(image)?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    icon_dir.write(&mut writer)?;
    writer.flush()?;
    Ok(())
}
