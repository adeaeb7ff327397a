pub const FORMAT_NAME: &str = "Truevision TGA";
pub const FILE_EXT: &str = "tga";

/// Fixed size of the TGA file header.
pub const HEADER_SIZE: usize = 18;

pub const IMAGE_TYPE_UNCOMPRESSED: u8 = 2;
pub const IMAGE_TYPE_RLE: u8 = 10;

pub const ORIGIN_BOTTOM_LEFT: u8 = 0x00;
pub const ORIGIN_TOP_LEFT: u8 = 0x20;

/// Top bit of a packet header byte marks a run-length packet.
pub const RLE_PACKET_FLAG: u8 = 0x80;
/// A packet holds at most this many pixels (7-bit count, stored minus one).
pub const MAX_PACKET_PIXELS: usize = 128;

pub const OPAQUE_ALPHA: u8 = 255;

/// The packet stream is abandoned once it comes within this many bytes of
/// the uncompressed payload size.
pub const COMPRESSION_MARGIN: usize = 16;
