/// The 8-byte sequence every PNG file starts with (a high bit to
/// catch 7-bit transmission, CR/LF/CR-LF to catch line-ending
/// translation, and "PNG" itself).
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Default ceiling on the concatenated `IDAT` payload size, guarding
/// against a small file declaring an enormous decompressed image.
pub const DEFAULT_MAX_IDAT_SIZE: usize = 1 << 30;
