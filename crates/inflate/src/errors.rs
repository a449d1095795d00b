use core::fmt;

/// Everything that can go wrong decoding a zlib/DEFLATE stream.
pub enum InflateError
{
    /// Input ran out mid-stream, before a final block was reached.
    UnexpectedEof,
    /// The 2-byte zlib header failed its mod-31 check.
    ZlibHeaderCorrupted,
    /// `CM` field was not 8 (only the DEFLATE compression method is
    /// supported).
    UnsupportedCompression(u8),
    /// `FDICT` was set; preset dictionaries are not supported.
    PresetDictNotAllowed,
    /// A DEFLATE block header named a `BTYPE` of 3 (reserved).
    ReservedBlockType,
    /// A stored block's `LEN`/`NLEN` fields were not complements.
    StoredBlockLengthMismatch,
    /// A dynamic block's `HLIT`/`HDIST`/`HCLEN` counts were out of
    /// range, or the code-length alphabet didn't decode cleanly.
    BadCodeLengths,
    /// A canonical Huffman code table was over- or under-subscribed.
    BadHuffmanTable,
    /// A decoded literal/length or distance symbol was out of range
    /// for its table, or a back-reference pointed before the start of
    /// output.
    InvalidSymbol,
    /// A back-reference's length/distance pair reached past the start
    /// of the output produced so far.
    InvalidBackReference,
    /// `confirm_adler` was set and the trailing Adler-32 did not match
    /// the decompressed data.
    AdlerMismatch { expected: u32, actual: u32 }
}

impl fmt::Debug for InflateError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self
        {
            InflateError::UnexpectedEof =>
            {
                writeln!(f, "ran out of input before the stream's final block")
            }
            InflateError::ZlibHeaderCorrupted =>
            {
                writeln!(f, "zlib header failed the mod-31 check")
            }
            InflateError::UnsupportedCompression(method) =>
            {
                writeln!(f, "unsupported zlib compression method {method}, expected 8 (deflate)")
            }
            InflateError::PresetDictNotAllowed =>
            {
                writeln!(f, "zlib header sets FDICT, preset dictionaries are not supported")
            }
            InflateError::ReservedBlockType =>
            {
                writeln!(f, "deflate block header used the reserved BTYPE value 3")
            }
            InflateError::StoredBlockLengthMismatch =>
            {
                writeln!(f, "stored block's LEN did not match the one's complement of NLEN")
            }
            InflateError::BadCodeLengths =>
            {
                writeln!(f, "dynamic block's code-length description was invalid")
            }
            InflateError::BadHuffmanTable =>
            {
                writeln!(f, "huffman code lengths were over- or under-subscribed")
            }
            InflateError::InvalidSymbol =>
            {
                writeln!(f, "decoded a symbol with no matching huffman code")
            }
            InflateError::InvalidBackReference =>
            {
                writeln!(f, "back-reference distance reached before the start of output")
            }
            InflateError::AdlerMismatch { expected, actual } =>
            {
                writeln!(f, "adler-32 mismatch: expected {expected:#010x}, got {actual:#010x}")
            }
        }
    }
}

impl fmt::Display for InflateError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for InflateError {}
