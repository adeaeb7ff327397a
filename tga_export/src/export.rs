use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use image::ImageError;
use lib_tga::constants::FILE_EXT;
use lib_tga::{encode, EncodingError, Origin, Raster, RasterError};
use log::{info, warn};
use thiserror::Error;

use crate::source::PixelSource;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("source has no decodable pixel data")]
    NoPixelData,

    #[error("mip level {requested} out of range, source has {available}")]
    MipOutOfRange { requested: u8, available: u8 },

    #[error("image dimensions {0}x{1} exceed the 16-bit TGA limit")]
    DimensionsTooLarge(u32, u32),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("image processing error: {0}")]
    ImageError(#[from] ImageError),

    #[error("invalid raster data: {0}")]
    RasterError(#[from] RasterError),

    #[error("TGA encoding error: {0}")]
    EncodingError(#[from] EncodingError),
}

/// Default output path: the input path with the `.tga` extension.
pub fn output_path(input: &Path, output: Option<PathBuf>) -> PathBuf {
    output.unwrap_or_else(|| input.with_extension(FILE_EXT))
}

/// Exports one source asset to a TGA file and returns the path written.
///
/// The output file is only created once pixel data is in hand, so a source
/// without decodable pixels leaves nothing behind.
pub fn export_file(
    input: &Path,
    output: Option<PathBuf>,
    mip: u8,
    origin: Origin,
) -> Result<PathBuf, ExportError> {
    let source = image::open(input)?;

    if mip >= source.mip_count() {
        return Err(ExportError::MipOutOfRange {
            requested: mip,
            available: source.mip_count(),
        });
    }

    let (width, height) = PixelSource::dimensions(&source);
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(ExportError::DimensionsTooLarge(width, height));
    }

    let decoded = match source.decode_mip(mip) {
        Some(decoded) => decoded,
        None => {
            warn!("texture {} has no valid mipmaps", input.display());
            return Err(ExportError::NoPixelData);
        }
    };

    let raster = Raster::from_rgba(decoded.width, decoded.height, decoded.rgba)?;

    let path = output_path(input, output);
    let mut file = File::create(&path)?;
    encode(raster, origin, &mut file)?;
    info!("Exported {} to {}", input.display(), path.display());

    Ok(path)
}
