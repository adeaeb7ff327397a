pub mod encoder;
pub mod format;

pub use encoder::encode;
pub use format::{ColorDepth, Origin, Raster, TgaHeader};
