//! `IHDR` chunk parsing and validation.

use log::info;
use pngflate_core::{ByteReader, DecoderOptions};

use crate::enums::{ColorType, InterlaceMethod};
use crate::error::PngError;

/// The decoded, validated contents of a PNG's `IHDR` chunk.
#[derive(Debug, Copy, Clone)]
pub struct ImageHeader
{
    pub width:            u32,
    pub height:           u32,
    pub bit_depth:        u8,
    pub color_type:       ColorType,
    pub interlace_method: InterlaceMethod
}

/// Parse and validate a 13-byte `IHDR` payload.
///
/// `data` must be exactly the chunk's data, not including its length,
/// type, or CRC fields.
pub fn parse_ihdr(data: &[u8], options: &DecoderOptions) -> Result<ImageHeader, PngError>
{
    if data.len() != 13
    {
        return Err(PngError::CorruptIhdr);
    }

    let mut reader = ByteReader::new(data);
    let width = reader.read_u32_be()?;
    let height = reader.read_u32_be()?;

    if width == 0 || height == 0
    {
        return Err(PngError::ZeroSize);
    }
    if (width as usize) > options.get_max_width() || (height as usize) > options.get_max_height()
    {
        return Err(PngError::ImageTooBig {
            width:  width as usize,
            height: height as usize
        });
    }

    let bit_depth = reader.read_u8()?;
    let color_byte = reader.read_u8()?;
    let color_type = ColorType::from_byte(color_byte).ok_or(PngError::BadColorType(color_byte))?;

    if !color_type.allows_bit_depth(bit_depth)
    {
        return Err(PngError::BadBitDepthCombo { depth: bit_depth, color_type: color_byte });
    }

    let compression_method = reader.read_u8()?;
    if compression_method != 0
    {
        return Err(PngError::BadCompressionMethod(compression_method));
    }

    let filter_method = reader.read_u8()?;
    if filter_method != 0
    {
        return Err(PngError::BadFilterMethod(filter_method));
    }

    let interlace_byte = reader.read_u8()?;
    let interlace_method =
        InterlaceMethod::from_byte(interlace_byte).ok_or(PngError::BadInterlaceMethod(interlace_byte))?;

    info!("IHDR: {width}x{height}, depth {bit_depth}, color type {color_byte}, interlace {interlace_byte}");

    Ok(ImageHeader { width, height, bit_depth, color_type, interlace_method })
}
