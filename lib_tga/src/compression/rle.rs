use log::debug;

use crate::constants::{COMPRESSION_MARGIN, MAX_PACKET_PIXELS, RLE_PACKET_FLAG};
use crate::image::format::{ColorDepth, Raster};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PacketKind {
    Raw,
    Run,
}

/// The packet currently being built: where its header byte sits in the
/// output buffer and how many pixels it has absorbed so far.
#[derive(Debug)]
struct PacketBuilder {
    kind: PacketKind,
    header_at: usize,
    count: usize,
}

impl PacketBuilder {
    fn open(kind: PacketKind, out: &mut Vec<u8>) -> Self {
        let header_at = out.len();
        out.push(0); // patched by close()
        PacketBuilder {
            kind,
            header_at,
            count: 0,
        }
    }

    fn close(self, out: &mut Vec<u8>) {
        debug_assert!(self.count >= 1 && self.count <= MAX_PACKET_PIXELS);
        let kind_flag = match self.kind {
            PacketKind::Run => RLE_PACKET_FLAG,
            PacketKind::Raw => 0,
        };
        out[self.header_at] = kind_flag | (self.count as u8 - 1);
    }
}

/// Packs a preprocessed raster into a TGA run-length packet stream in one
/// left-to-right, top-to-bottom pass.
///
/// # Parameters
/// - `raster`: the flipped, channel-swapped pixel buffer.
/// - `depth`: bytes stored per pixel, from the alpha probe.
///
/// # Returns
/// The packet stream, or `None` once the stream comes within
/// `COMPRESSION_MARGIN` bytes of the uncompressed payload size. That is not
/// an error; the caller stores the image uncompressed instead.
pub fn compress(raster: &Raster, depth: ColorDepth) -> Option<Vec<u8>> {
    let bpp = depth.bytes_per_pixel();
    let width = raster.width() as usize;
    let pixel_count = raster.pixel_count();
    let uncompressed = pixel_count * bpp;

    // Rasters whose whole payload fits inside the margin can never trip
    // the guard; their packet overhead is allowed to exceed the raw size.
    let threshold = (uncompressed > COMPRESSION_MARGIN).then(|| uncompressed - COMPRESSION_MARGIN);

    let rgba = raster.pixels();
    let pixel = |i: usize| &rgba[i * 4..(i + 1) * 4];

    let mut out = Vec::with_capacity(uncompressed);
    let mut open: Option<PacketBuilder> = None;

    for i in 0..pixel_count {
        if let Some(limit) = threshold {
            if out.len() >= limit {
                debug!(
                    "Packet stream reached {} of {} byte budget at pixel {}, abandoning",
                    out.len(),
                    uncompressed,
                    i
                );
                return None;
            }
        }

        let cur = pixel(i);
        let column = i % width;

        // A run continues only within the scanline, onto an identical next
        // pixel, and while the open run is below the packet cap.
        let run_full = matches!(
            &open,
            Some(p) if p.kind == PacketKind::Run && p.count == MAX_PACKET_PIXELS - 1
        );
        let run_continues = column < width - 1 && pixel(i + 1) == cur && !run_full;

        if run_continues {
            if open.as_ref().is_some_and(|p| p.kind == PacketKind::Run) {
                if let Some(run) = open.as_mut() {
                    run.count += 1;
                }
            } else {
                // a raw packet in progress is already complete as-is
                if let Some(raw) = open.take() {
                    raw.close(&mut out);
                }
                let mut run = PacketBuilder::open(PacketKind::Run, &mut out);
                out.extend_from_slice(&cur[..bpp]);
                run.count = 1;
                open = Some(run);
            }
        } else if open.as_ref().is_some_and(|p| p.kind == PacketKind::Run) {
            // the previous iteration matched this pixel against the run
            // value, so fold it in and seal the packet
            if let Some(mut run) = open.take() {
                run.count += 1;
                run.close(&mut out);
            }
        } else {
            // raw packets restart at every scanline edge
            if column == 0 {
                if let Some(raw) = open.take() {
                    raw.close(&mut out);
                }
            }

            let mut raw = match open.take() {
                Some(raw) => raw,
                None => PacketBuilder::open(PacketKind::Raw, &mut out),
            };
            out.extend_from_slice(&cur[..bpp]);
            raw.count += 1;
            if raw.count == MAX_PACKET_PIXELS {
                raw.close(&mut out);
            } else {
                open = Some(raw);
            }
        }
    }

    if let Some(last) = open.take() {
        last.close(&mut out);
    }

    debug!(
        "Packed {} pixels into {} bytes ({} uncompressed)",
        pixel_count,
        out.len(),
        uncompressed
    );
    Some(out)
}
