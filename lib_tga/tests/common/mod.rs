//! Shared fixtures plus a minimal reference decoder for the files the
//! encoder emits. Decoding TGA is deliberately not part of the library
//! API, so the tests carry their own.

use lib_tga::constants::{HEADER_SIZE, IMAGE_TYPE_RLE, IMAGE_TYPE_UNCOMPRESSED, RLE_PACKET_FLAG};

/// One decoded packet: kind, pixel count, and the index of the first pixel
/// it covers.
#[derive(Debug)]
pub struct Packet {
    pub rle: bool,
    pub count: usize,
    pub start_pixel: usize,
}

#[derive(Debug)]
pub struct DecodedTga {
    pub image_type: u8,
    pub width: u16,
    pub height: u16,
    pub pixel_depth: u8,
    pub attributes: u8,
    pub packets: Vec<Packet>,
    /// The stored pixel stream, `pixel_depth / 8` bytes per pixel, in
    /// payload row order.
    pub pixels: Vec<u8>,
}

/// Walks a packet stream covering `pixel_count` pixels of `bpp` bytes each,
/// expanding it and recording packet boundaries.
pub fn parse_packets(payload: &[u8], bpp: usize, pixel_count: usize) -> (Vec<Packet>, Vec<u8>) {
    let mut packets = Vec::new();
    let mut pixels = Vec::with_capacity(pixel_count * bpp);
    let mut cursor = 0;
    let mut decoded = 0;

    while decoded < pixel_count {
        let header = payload[cursor];
        cursor += 1;
        let count = (header & !RLE_PACKET_FLAG) as usize + 1;
        let rle = header & RLE_PACKET_FLAG != 0;

        packets.push(Packet {
            rle,
            count,
            start_pixel: decoded,
        });

        if rle {
            let value = &payload[cursor..cursor + bpp];
            for _ in 0..count {
                pixels.extend_from_slice(value);
            }
            cursor += bpp;
        } else {
            pixels.extend_from_slice(&payload[cursor..cursor + count * bpp]);
            cursor += count * bpp;
        }
        decoded += count;
    }

    assert_eq!(decoded, pixel_count, "packet stream overshot the raster");
    assert_eq!(cursor, payload.len(), "trailing bytes after last packet");
    (packets, pixels)
}

pub fn decode_tga(bytes: &[u8]) -> DecodedTga {
    assert!(bytes.len() >= HEADER_SIZE, "file shorter than a TGA header");
    assert_eq!(bytes[0], 0, "id length");
    assert_eq!(bytes[1], 0, "colormap type");
    assert_eq!(&bytes[3..8], &[0; 5], "colormap fields");
    assert_eq!(&bytes[8..12], &[0; 4], "origin coordinates");

    let image_type = bytes[2];
    let width = u16::from_le_bytes([bytes[12], bytes[13]]);
    let height = u16::from_le_bytes([bytes[14], bytes[15]]);
    let pixel_depth = bytes[16];
    let attributes = bytes[17];

    assert!(pixel_depth == 24 || pixel_depth == 32, "pixel depth");
    let bpp = pixel_depth as usize / 8;
    let pixel_count = width as usize * height as usize;
    let payload = &bytes[HEADER_SIZE..];

    let (packets, pixels) = match image_type {
        IMAGE_TYPE_UNCOMPRESSED => {
            assert_eq!(payload.len(), pixel_count * bpp, "raw payload length");
            (Vec::new(), payload.to_vec())
        }
        IMAGE_TYPE_RLE => parse_packets(payload, bpp, pixel_count),
        other => panic!("unexpected image type {}", other),
    };

    DecodedTga {
        image_type,
        width,
        height,
        pixel_depth,
        attributes,
        packets,
        pixels,
    }
}

/// Opaque image whose scanlines are solid, distinct colors; compresses to
/// one run per row.
pub fn banded_rgba(width: u16, height: u16) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for _ in 0..width {
            rgba.extend_from_slice(&[y as u8, (y * 3) as u8, (y * 7) as u8, 255]);
        }
    }
    rgba
}

/// Deterministic high-entropy image: no two neighboring pixels are equal
/// and no alpha is fully opaque, so nothing ever forms a run.
pub fn noise_rgba(width: u16, height: u16) -> Vec<u8> {
    let count = width as usize * height as usize;
    let mut rgba = Vec::with_capacity(count * 4);
    for i in 0..count {
        rgba.extend_from_slice(&[
            i as u8,
            (i >> 8) as u8,
            (i.wrapping_mul(31)) as u8,
            1 + (i % 254) as u8,
        ]);
    }
    rgba
}

/// What the encoder's preprocessing makes of an RGBA input: optionally
/// flipped scanlines, blue/red swapped, alpha dropped for opaque images.
pub fn preprocess(width: u16, height: u16, rgba: &[u8], flip: bool) -> Vec<u8> {
    let row_bytes = width as usize * 4;
    let mut rows: Vec<&[u8]> = rgba.chunks_exact(row_bytes).collect();
    assert_eq!(rows.len(), height as usize);
    if flip {
        rows.reverse();
    }

    let opaque = rgba.iter().skip(3).step_by(4).all(|&a| a == 255);
    let mut out = Vec::new();
    for row in rows {
        for pixel in row.chunks_exact(4) {
            out.push(pixel[2]);
            out.push(pixel[1]);
            out.push(pixel[0]);
            if !opaque {
                out.push(pixel[3]);
            }
        }
    }
    out
}
