#![allow(non_camel_case_types)]

/// The 4-byte chunk type tag, classified by name.
///
/// Variants spelled in PNG's own mixed case (e.g. `tEXt`) match the
/// casing convention the format itself uses to encode whether a chunk
/// is critical/ancillary and safe-to-copy; chunks this decoder has no
/// use for besides recognizing their ordering constraints fall back
/// to [`Unknown`](ChunkType::Unknown).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ChunkType
{
    IHDR,
    PLTE,
    IDAT,
    IEND,
    gAMA,
    Unknown([u8; 4])
}

impl ChunkType
{
    pub(crate) fn from_tag(tag: [u8; 4]) -> ChunkType
    {
        match &tag
        {
            b"IHDR" => ChunkType::IHDR,
            b"PLTE" => ChunkType::PLTE,
            b"IDAT" => ChunkType::IDAT,
            b"IEND" => ChunkType::IEND,
            b"gAMA" => ChunkType::gAMA,
            _ => ChunkType::Unknown(tag)
        }
    }

    /// Whether the chunk's ancillary bit (bit 5 of the first byte) is
    /// clear, meaning a conforming reader must understand it to
    /// proceed.
    pub(crate) fn is_critical(tag: [u8; 4]) -> bool
    {
        tag[0] & (1 << 5) == 0
    }
}

/// Color type as declared in `IHDR`'s 10th byte.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ColorType
{
    Greyscale,
    Truecolor,
    Indexed,
    GreyscaleAlpha,
    TruecolorAlpha
}

impl ColorType
{
    pub(crate) fn from_byte(byte: u8) -> Option<ColorType>
    {
        match byte
        {
            0 => Some(ColorType::Greyscale),
            2 => Some(ColorType::Truecolor),
            3 => Some(ColorType::Indexed),
            4 => Some(ColorType::GreyscaleAlpha),
            6 => Some(ColorType::TruecolorAlpha),
            _ => None
        }
    }

    /// Number of samples per pixel, before any palette expansion.
    pub fn num_components(self) -> u8
    {
        match self
        {
            ColorType::Greyscale | ColorType::Indexed => 1,
            ColorType::GreyscaleAlpha => 2,
            ColorType::Truecolor => 3,
            ColorType::TruecolorAlpha => 4
        }
    }

    /// Whether `depth` is one of the bit depths this color type
    /// permits (Table 11.3 of the PNG spec).
    pub(crate) fn allows_bit_depth(self, depth: u8) -> bool
    {
        match self
        {
            ColorType::Greyscale | ColorType::Indexed =>
            {
                matches!(depth, 1 | 2 | 4 | 8 | 16) && !(self == ColorType::Indexed && depth == 16)
            }
            ColorType::Truecolor | ColorType::GreyscaleAlpha | ColorType::TruecolorAlpha =>
            {
                matches!(depth, 8 | 16)
            }
        }
    }
}

/// `IHDR`'s interlace method byte.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum InterlaceMethod
{
    None,
    Adam7
}

impl InterlaceMethod
{
    pub(crate) fn from_byte(byte: u8) -> Option<InterlaceMethod>
    {
        match byte
        {
            0 => Some(InterlaceMethod::None),
            1 => Some(InterlaceMethod::Adam7),
            _ => None
        }
    }
}

/// State machine tracking which chunks are still legal to see next.
///
/// Redundant with some of the decoder's own boolean flags (`seen_plte`
/// etc.) by design: the flags pin down exactly *which* rule a given
/// chunk violated for error messages, while this enum pins down the
/// coarse ordering.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum ParserState
{
    Start,
    AfterIhdr,
    AfterPlte,
    AfterIdat,
    End
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn indexed_color_rejects_16_bit_depth()
    {
        assert!(!ColorType::Indexed.allows_bit_depth(16));
        assert!(ColorType::Indexed.allows_bit_depth(8));
    }

    #[test]
    fn truecolor_rejects_sub_byte_depths()
    {
        assert!(!ColorType::Truecolor.allows_bit_depth(4));
        assert!(ColorType::Truecolor.allows_bit_depth(8));
    }

    #[test]
    fn chunk_type_classifies_known_tags()
    {
        assert_eq!(ChunkType::from_tag(*b"IHDR"), ChunkType::IHDR);
        assert_eq!(ChunkType::from_tag(*b"fooo"), ChunkType::Unknown(*b"fooo"));
    }

    #[test]
    fn critical_bit_matches_ascii_case()
    {
        assert!(ChunkType::is_critical(*b"IHDR"));
        assert!(!ChunkType::is_critical(*b"tEXt"));
    }
}
