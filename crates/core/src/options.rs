//! Decoder configuration shared across `pngflate` crates.

/// Default ceiling on image width/height, `2^24`, matching spec's
/// `MAX_DIM` default.
pub const DEFAULT_MAX_DIM: usize = 1 << 24;

/// Tunable knobs respected by the PNG and DEFLATE decoders.
///
/// Not every decoder respects every option: `max_width`/`max_height`
/// are PNG-only, `confirm_crc` is PNG-only, `confirm_adler` is
/// DEFLATE/zlib-only.
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions
{
    max_width:     usize,
    max_height:    usize,
    confirm_crc:   bool,
    confirm_adler: bool,
    strict:        bool
}

impl Default for DecoderOptions
{
    fn default() -> Self
    {
        DecoderOptions {
            max_width:     DEFAULT_MAX_DIM,
            max_height:    DEFAULT_MAX_DIM,
            confirm_crc:   true,
            confirm_adler: false,
            strict:        false
        }
    }
}

impl DecoderOptions
{
    /// Options tuned for throughput: skip CRC and Adler verification.
    pub fn fast() -> DecoderOptions
    {
        DecoderOptions::default()
            .set_confirm_crc(false)
            .set_confirm_adler(false)
    }

    /// Maximum width the PNG decoder will accept before failing with
    /// `BigImage`.
    pub const fn get_max_width(&self) -> usize
    {
        self.max_width
    }

    /// Maximum height the PNG decoder will accept before failing with
    /// `BigImage`.
    pub const fn get_max_height(&self) -> usize
    {
        self.max_height
    }

    /// Whether the PNG decoder verifies each chunk's CRC-32.
    pub const fn get_confirm_crc(&self) -> bool
    {
        self.confirm_crc
    }

    /// Whether the DEFLATE decoder verifies the zlib Adler-32 trailer.
    pub const fn get_confirm_adler(&self) -> bool
    {
        self.confirm_adler
    }

    /// Whether unknown ancillary chunks are treated as fatal instead of
    /// being skipped.
    pub const fn get_strict(&self) -> bool
    {
        self.strict
    }

    pub fn set_max_width(mut self, width: usize) -> Self
    {
        self.max_width = width;
        self
    }

    pub fn set_max_height(mut self, height: usize) -> Self
    {
        self.max_height = height;
        self
    }

    pub fn set_confirm_crc(mut self, yes: bool) -> Self
    {
        self.confirm_crc = yes;
        self
    }

    pub fn set_confirm_adler(mut self, yes: bool) -> Self
    {
        self.confirm_adler = yes;
        self
    }

    pub fn set_strict(mut self, yes: bool) -> Self
    {
        self.strict = yes;
        self
    }
}
