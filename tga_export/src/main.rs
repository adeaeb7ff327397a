mod export;
mod source;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use lib_tga::Origin;

use crate::export::export_file;

/// Export a decoded image asset to a Truevision TGA file.
#[derive(Debug, Parser)]
#[command(name = "tga-export", version, about)]
struct Args {
    /// Source image (png, jpg, bmp, webp, ...)
    input: PathBuf,

    /// Output path; defaults to the input path with a .tga extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Mip level to export
    #[arg(long, default_value_t = 0)]
    mip: u8,

    /// Keep top-left row order instead of flipping to bottom-left origin
    #[arg(long)]
    top_left: bool,
}

fn main() -> ExitCode {
    lib_tga::init_logging();

    let args = Args::parse();
    let origin = if args.top_left {
        Origin::TopLeft
    } else {
        Origin::BottomLeft
    };

    match export_file(&args.input, args.output, args.mip, origin) {
        Ok(path) => {
            println!("File saved successfully to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
