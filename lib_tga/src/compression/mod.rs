pub mod rle;

pub use rle::compress;
