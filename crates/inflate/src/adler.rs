//! Adler-32 checksum (RFC 1950 §9), used to verify the zlib trailer.

const MOD_ADLER: u32 = 65521;

/// Compute the Adler-32 checksum of `data`.
pub fn adler32(data: &[u8]) -> u32
{
    let mut a: u32 = 1;
    let mut b: u32 = 0;

    // Accumulate in chunks so `b` can't overflow a u32 before the next
    // reduction mod 65521 (5552 is the largest chunk that's safe for
    // 8-bit input bytes).
    for chunk in data.chunks(5552)
    {
        for &byte in chunk
        {
            a += u32::from(byte);
            b += a;
        }
        a %= MOD_ADLER;
        b %= MOD_ADLER;
    }

    (b << 16) | a
}
