use image::{DynamicImage, GenericImageView};

/// A flat RGBA8 mip decoded out of a source asset: `width * height * 4`
/// bytes, row-major, top-left origin.
pub struct DecodedMip {
    pub width: u16,
    pub height: u16,
    pub rgba: Vec<u8>,
}

// A trait for the assets the exporter can pull pixel data from
pub trait PixelSource {
    /// Get the dimensions of the top-level image (width, height)
    fn dimensions(&self) -> (u32, u32);

    /// Number of mip levels the source carries
    fn mip_count(&self) -> u8;

    /// Decode one mip level to flat RGBA8, or `None` when the source has
    /// no decodable pixel data at that level
    fn decode_mip(&self, level: u8) -> Option<DecodedMip>;
}

// Implementation for the standard image crate's DynamicImage; ordinary
// raster files carry a single mip level
impl PixelSource for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn mip_count(&self) -> u8 {
        1
    }

    fn decode_mip(&self, level: u8) -> Option<DecodedMip> {
        if level >= self.mip_count() {
            return None;
        }

        let (width, height) = PixelSource::dimensions(self);
        // TGA header dimensions are 16-bit
        let width = u16::try_from(width).ok()?;
        let height = u16::try_from(height).ok()?;

        Some(DecodedMip {
            width,
            height,
            rgba: self.to_rgba8().into_raw(),
        })
    }
}
