//! A strict PNG container decoder.
//!
//! Parses chunk framing, validates `IHDR`, sequences chunks against
//! the ordering rules the format defines, and inflates the
//! concatenated `IDAT` payload. Scanline unfiltering, Adam7
//! de-interlacing, and palette/`tRNS` expansion are a downstream
//! concern and are not implemented here — [`decode`] returns the
//! inflated bytes exactly as DEFLATE produced them.
//!
//! ```no_run
//! let data = std::fs::read("image.png").unwrap();
//! let image = pngflate_png::decode(&data).unwrap();
//! println!("{}x{}", image.width, image.height);
//! ```

mod constants;
mod crc;
mod decoder;
mod enums;
pub mod error;
mod header;

pub use decoder::{decode, decode_with_options, DecodedImage, PngDecoder};
pub use enums::{ColorType, InterlaceMethod};
pub use error::PngError;
pub use header::ImageHeader;
pub use pngflate_core::DecoderOptions;
