use std::io::{self, Write};

use log::{debug, info};
use thiserror::Error;

use super::format::{ColorDepth, Origin, Raster, TgaHeader};
use crate::compression::compress;
use crate::constants::{HEADER_SIZE, IMAGE_TYPE_RLE, IMAGE_TYPE_UNCOMPRESSED};

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("failed to write to output sink: {0}")]
    Sink(#[from] io::Error),
}

/// Encodes a raster as a complete TGA file, header then payload, into the
/// given sink. The raster is consumed; its buffer is released when this
/// returns, on every path.
pub fn encode<W: Write>(
    mut raster: Raster,
    origin: Origin,
    sink: &mut W,
) -> Result<(), EncodingError> {
    info!(
        "Starting TGA encode: {}x{}",
        raster.width(),
        raster.height()
    );

    // Step 1: rewrite the raster to match TGA conventions
    if origin == Origin::BottomLeft {
        raster.flip_vertical();
    }
    raster.swap_red_blue();
    let depth = raster.color_depth();
    debug!("Alpha probe: storing {} bytes per pixel", depth.bytes_per_pixel());

    // Step 2: run-length compress, falling back to raw storage when the
    // packet stream comes too close to the uncompressed size
    let (image_type, payload) = match compress(&raster, depth) {
        Some(packets) => {
            debug!("Packet stream: {} bytes", packets.len());
            (IMAGE_TYPE_RLE, packets)
        }
        None => {
            info!("Compression overflow, storing uncompressed");
            (IMAGE_TYPE_UNCOMPRESSED, raw_payload(&raster, depth))
        }
    };

    // Step 3: header record, then payload
    let header = TgaHeader {
        image_type,
        width: raster.width(),
        height: raster.height(),
        pixel_depth: depth.bits(),
        attributes: origin.attributes(),
    };
    sink.write_all(&header.to_bytes())?;
    sink.write_all(&payload)?;

    info!(
        "Encoding completed: {} bytes written",
        HEADER_SIZE + payload.len()
    );
    Ok(())
}

/// The uncompressed payload: the preprocessed raster at `depth` bytes per
/// pixel, dropping the constant alpha byte for 24-bit output.
fn raw_payload(raster: &Raster, depth: ColorDepth) -> Vec<u8> {
    match depth {
        ColorDepth::Rgba => raster.pixels().to_vec(),
        ColorDepth::Rgb => {
            let mut data = Vec::with_capacity(raster.pixel_count() * 3);
            for pixel in raster.pixels().chunks_exact(4) {
                data.extend_from_slice(&pixel[..3]);
            }
            data
        }
    }
}
