//! Output format identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Formats a bitmap can be exported to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TargetFormat {
    #[default]
    Png,
    Jpeg,
    /// JPEG under its short name; batch output files end in `.jpg`
    Jpg,
    Bmp,
    /// Multi-resolution icon pack
    Ico,
}

impl TargetFormat {
    /// Every supported output format, in menu order
    pub const ALL: [TargetFormat; 5] = [
        TargetFormat::Png,
        TargetFormat::Jpeg,
        TargetFormat::Jpg,
        TargetFormat::Bmp,
        TargetFormat::Ico,
    ];

    /// Upper-case identifier as shown to users
    pub fn identifier(self) -> &'static str {
        match self {
            TargetFormat::Png => "PNG",
            TargetFormat::Jpeg => "JPEG",
            TargetFormat::Jpg => "JPG",
            TargetFormat::Bmp => "BMP",
            TargetFormat::Ico => "ICO",
        }
    }

    /// File extension used for batch output names (lower-cased identifier)
    pub fn extension(self) -> &'static str {
        match self {
            TargetFormat::Png => "png",
            TargetFormat::Jpeg => "jpeg",
            TargetFormat::Jpg => "jpg",
            TargetFormat::Bmp => "bmp",
            TargetFormat::Ico => "ico",
        }
    }

    /// Whether the format can store an alpha channel
    pub fn supports_alpha(self) -> bool {
        matches!(self, TargetFormat::Png | TargetFormat::Ico)
    }

    /// The `image` crate encoder for this format.
    ///
    /// `None` for icon packs, which are assembled separately.
    pub fn image_format(self) -> Option<image::ImageFormat> {
        match self {
            TargetFormat::Png => Some(image::ImageFormat::Png),
            TargetFormat::Jpeg | TargetFormat::Jpg => Some(image::ImageFormat::Jpeg),
            TargetFormat::Bmp => Some(image::ImageFormat::Bmp),
            TargetFormat::Ico => None,
        }
    }

    /// Infer the format from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(TargetFormat::Png),
            "jpeg" => Some(TargetFormat::Jpeg),
            "jpg" => Some(TargetFormat::Jpg),
            "bmp" => Some(TargetFormat::Bmp),
            "ico" => Some(TargetFormat::Ico),
            _ => None,
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for TargetFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s.trim()).ok_or_else(|| {
            format!(
                "unknown format '{}' (expected one of PNG, JPEG, JPG, BMP, ICO)",
                s
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifiers() {
        assert_eq!("PNG".parse::<TargetFormat>().unwrap(), TargetFormat::Png);
        assert_eq!("jpeg".parse::<TargetFormat>().unwrap(), TargetFormat::Jpeg);
        assert_eq!("JPG".parse::<TargetFormat>().unwrap(), TargetFormat::Jpg);
        assert_eq!("Bmp".parse::<TargetFormat>().unwrap(), TargetFormat::Bmp);
        assert_eq!("ico".parse::<TargetFormat>().unwrap(), TargetFormat::Ico);
        assert!("webp".parse::<TargetFormat>().is_err());
        assert!("".parse::<TargetFormat>().is_err());
    }

    #[test]
    fn test_extension_is_lowercase_identifier() {
        for format in TargetFormat::ALL {
            assert_eq!(format.extension(), format.identifier().to_lowercase());
        }
    }

    #[test]
    fn test_alpha_support() {
        assert!(TargetFormat::Png.supports_alpha());
        assert!(TargetFormat::Ico.supports_alpha());
        assert!(!TargetFormat::Jpeg.supports_alpha());
        assert!(!TargetFormat::Jpg.supports_alpha());
        assert!(!TargetFormat::Bmp.supports_alpha());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&TargetFormat::Jpeg).unwrap();
        assert_eq!(json, "\"JPEG\"");
        let parsed: TargetFormat = serde_json::from_str("\"JPG\"").unwrap();
        assert_eq!(parsed, TargetFormat::Jpg);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"JPG\"");
    }

    #[test]
    fn test_jpeg_spellings_share_encoder_but_keep_extension() {
        assert_eq!(TargetFormat::Jpg.image_format(), TargetFormat::Jpeg.image_format());
        assert_eq!("jpg".parse::<TargetFormat>().unwrap().extension(), "jpg");
        assert_eq!("JPEG".parse::<TargetFormat>().unwrap().extension(), "jpeg");
    }
}
