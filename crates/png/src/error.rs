use core::fmt;

use pngflate_inflate::InflateError;

/// Everything that can go wrong decoding a PNG container.
pub enum PngError
{
    /// The first 8 bytes did not match the canonical PNG signature.
    BadSignature,
    /// A chunk other than `IHDR` appeared first, or a chunk that must
    /// follow `IHDR` appeared before it.
    IhdrNotFound,
    /// A second `IHDR` chunk was seen.
    MultipleIhdr,
    /// `IHDR`'s length was not exactly 13 bytes.
    CorruptIhdr,
    /// Width or height was zero.
    ZeroSize,
    /// Width or height exceeded the configured maximum.
    ImageTooBig { width: usize, height: usize },
    /// The bit depth is not legal for the chunk's color type.
    BadBitDepthCombo { depth: u8, color_type: u8 },
    /// `IHDR`'s color type byte didn't match any of the 5 defined
    /// values.
    BadColorType(u8),
    /// `IHDR`'s compression method was not 0.
    BadCompressionMethod(u8),
    /// `IHDR`'s filter method was not 0.
    BadFilterMethod(u8),
    /// `IHDR`'s interlace method was neither 0 nor 1.
    BadInterlaceMethod(u8),
    /// A `PLTE` chunk appeared for a color type that forbids it
    /// (greyscale or greyscale+alpha).
    UnexpectedPlte,
    /// A second `PLTE` chunk was seen.
    MultiplePlte,
    /// `PLTE`'s length was not a multiple of 3.
    CorruptPlte,
    /// An indexed-color image had no `PLTE` chunk before `IDAT`.
    MissingPlte,
    /// `gAMA` appeared after `PLTE`.
    GammaAfterPlte,
    /// A second `gAMA` chunk was seen.
    MultipleGama,
    /// Concatenated `IDAT` payload exceeded the configured limit.
    IdatTooLarge,
    /// `IEND` was reached without seeing any `IDAT` chunk.
    NoIdat,
    /// An unknown chunk had its critical bit set.
    UnknownCriticalChunk([u8; 4]),
    /// A chunk's declared length ran past the end of the file.
    TruncatedChunk,
    /// A chunk's CRC-32 did not match its declared value.
    CrcMismatch { expected: u32, actual: u32 },
    /// Buffer ended before `IEND` was reached.
    UnexpectedEof,
    /// Propagated from the DEFLATE/zlib decompressor.
    Inflate(InflateError)
}

impl fmt::Debug for PngError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self
        {
            PngError::BadSignature => writeln!(f, "first 8 bytes are not the PNG signature"),
            PngError::IhdrNotFound => writeln!(f, "IHDR must be the first chunk"),
            PngError::MultipleIhdr => writeln!(f, "more than one IHDR chunk"),
            PngError::CorruptIhdr => writeln!(f, "IHDR chunk length was not 13"),
            PngError::ZeroSize => writeln!(f, "width or height was zero"),
            PngError::ImageTooBig { width, height } =>
            {
                writeln!(f, "image dimensions {width}x{height} exceed the configured maximum")
            }
            PngError::BadBitDepthCombo { depth, color_type } =>
            {
                writeln!(f, "bit depth {depth} is not valid for color type {color_type}")
            }
            PngError::BadColorType(ty) => writeln!(f, "unknown color type {ty}"),
            PngError::BadCompressionMethod(m) => writeln!(f, "unknown compression method {m}"),
            PngError::BadFilterMethod(m) => writeln!(f, "unknown filter method {m}"),
            PngError::BadInterlaceMethod(m) => writeln!(f, "unknown interlace method {m}"),
            PngError::UnexpectedPlte =>
            {
                writeln!(f, "PLTE chunk is not allowed for this color type")
            }
            PngError::MultiplePlte => writeln!(f, "more than one PLTE chunk"),
            PngError::CorruptPlte => writeln!(f, "PLTE chunk length was not a multiple of 3"),
            PngError::MissingPlte =>
            {
                writeln!(f, "indexed-color image has no PLTE chunk before IDAT")
            }
            PngError::GammaAfterPlte => writeln!(f, "gAMA chunk appeared after PLTE"),
            PngError::MultipleGama => writeln!(f, "more than one gAMA chunk"),
            PngError::IdatTooLarge => writeln!(f, "concatenated IDAT payload exceeded the configured limit"),
            PngError::NoIdat => writeln!(f, "reached IEND without seeing an IDAT chunk"),
            PngError::UnknownCriticalChunk(ty) =>
            {
                let name = core::str::from_utf8(ty).unwrap_or("????");
                writeln!(f, "unknown chunk {name} has its critical bit set")
            }
            PngError::TruncatedChunk => writeln!(f, "chunk length runs past the end of the file"),
            PngError::CrcMismatch { expected, actual } =>
            {
                writeln!(f, "crc mismatch: expected {expected:#010x}, computed {actual:#010x}")
            }
            PngError::UnexpectedEof => writeln!(f, "buffer ended before IEND"),
            PngError::Inflate(err) => writeln!(f, "deflate error: {err:?}")
        }
    }
}

impl fmt::Display for PngError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for PngError {}

impl From<InflateError> for PngError
{
    fn from(err: InflateError) -> Self
    {
        PngError::Inflate(err)
    }
}

impl From<&'static str> for PngError
{
    fn from(_msg: &'static str) -> Self
    {
        PngError::UnexpectedEof
    }
}
