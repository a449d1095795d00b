//! LSB-first bit reader over a borrowed byte buffer.
//!
//! DEFLATE packs bits into bytes least-significant-bit first. The
//! reader keeps a 32-bit refill register (`code_buf`) holding between
//! 0 and 31 valid low-order bits; whenever a read needs more bits than
//! are buffered, whole bytes are shifted in from the underlying stream
//! until the register holds more than 24 bits (the most that can ever
//! be consumed in one `get_bits` call, given the 16-bit cap) or the
//! stream runs out.

/// Reader over a borrowed byte slice, serving bits LSB-first.
pub struct BitReader<'a>
{
    data:          &'a [u8],
    byte_pos:      usize,
    code_buf:      u32,
    code_buf_bits: u8,
    /// Set once a refill has hit end-of-input and been forced to
    /// return zero bits; once set, every further read also reports
    /// failure so callers don't need to check EOF more than once.
    hit_eof: bool
}

impl<'a> BitReader<'a>
{
    pub const fn new(data: &'a [u8]) -> BitReader<'a>
    {
        BitReader { data, byte_pos: 0, code_buf: 0, code_buf_bits: 0, hit_eof: false }
    }

    /// Whether the reader ran out of input bytes during a refill.
    pub const fn at_eof(&self) -> bool
    {
        self.hit_eof
    }

    /// Byte position of the next unread byte (ignores buffered bits).
    pub const fn byte_position(&self) -> usize
    {
        self.byte_pos
    }

    fn next_byte(&mut self) -> Option<u8>
    {
        let byte = *self.data.get(self.byte_pos)?;
        self.byte_pos += 1;
        Some(byte)
    }

    fn refill(&mut self)
    {
        while self.code_buf_bits <= 24
        {
            match self.next_byte()
            {
                Some(byte) =>
                {
                    self.code_buf |= u32::from(byte) << self.code_buf_bits;
                    self.code_buf_bits += 8;
                }
                None =>
                {
                    self.hit_eof = true;
                    return;
                }
            }
        }
    }

    /// Read `n` bits (`1..=16`), LSB-first, without advancing past
    /// them (use [`drop_bits`] to consume after inspecting).
    ///
    /// [`drop_bits`]: Self::drop_bits
    pub fn peek_bits(&mut self, n: u8) -> u32
    {
        debug_assert!((1..=16).contains(&n));
        if self.code_buf_bits < n
        {
            self.refill();
        }
        self.code_buf & ((1u32 << n) - 1)
    }

    /// Consume `n` bits previously inspected with [`peek_bits`].
    ///
    /// [`peek_bits`]: Self::peek_bits
    pub fn drop_bits(&mut self, n: u8)
    {
        debug_assert!(n <= self.code_buf_bits || self.hit_eof);
        self.code_buf >>= n;
        self.code_buf_bits = self.code_buf_bits.saturating_sub(n);
    }

    /// Read and consume `n` bits (`1..=16`), LSB-first.
    ///
    /// Once the stream is exhausted, returns zero for any further
    /// call; check [`at_eof`] to distinguish that from a genuine zero
    /// in well-formed input.
    ///
    /// [`at_eof`]: Self::at_eof
    pub fn get_bits(&mut self, n: u8) -> u32
    {
        let value = self.peek_bits(n);
        self.drop_bits(n);
        value
    }

    /// Discard any partial byte in the bit buffer and return the next
    /// whole byte, aligned to a byte boundary — used by stored blocks.
    pub fn get_byte_aligned(&mut self) -> u8
    {
        let drop = self.code_buf_bits % 8;
        self.drop_bits(drop);

        if self.code_buf_bits > 0
        {
            let byte = (self.code_buf & 0xff) as u8;
            self.drop_bits(8);
            byte
        }
        else
        {
            self.next_byte().unwrap_or_else(|| {
                self.hit_eof = true;
                0
            })
        }
    }

    /// True if the bit buffer already holds `n` bits without needing a
    /// refill.
    pub const fn has_buffered(&self, n: u8) -> bool
    {
        self.code_buf_bits >= n
    }

    /// Drop any partial byte still buffered and report the byte offset
    /// of the next unread byte in the underlying stream.
    ///
    /// Used once at the end of a deflate stream to locate a trailing
    /// checksum: the bit buffer is typically several bytes ahead of
    /// the last bit actually consumed, so this walks the buffer back
    /// to the true byte boundary rather than trusting [`byte_position`].
    ///
    /// [`byte_position`]: Self::byte_position
    pub fn aligned_byte_position(&mut self) -> usize
    {
        let drop = self.code_buf_bits % 8;
        self.drop_bits(drop);
        self.byte_pos - (self.code_buf_bits / 8) as usize
    }
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn reads_lsb_first()
    {
        // byte 0b1011_0010 -> bits read low-to-high: 0,1,0,0,1,1,0,1
        let data = [0b1011_0010];
        let mut r = BitReader::new(&data);
        assert_eq!(r.get_bits(1), 0);
        assert_eq!(r.get_bits(1), 1);
        assert_eq!(r.get_bits(1), 0);
        assert_eq!(r.get_bits(1), 0);
        assert_eq!(r.get_bits(4), 0b1011);
    }

    #[test]
    fn refills_across_byte_boundary()
    {
        let data = [0xff, 0x01];
        let mut r = BitReader::new(&data);
        assert_eq!(r.get_bits(9), 0x1ff);
    }

    #[test]
    fn byte_align_drops_partial_bits()
    {
        let data = [0b1111_0001, 0xab];
        let mut r = BitReader::new(&data);
        let _ = r.get_bits(3);
        assert_eq!(r.get_byte_aligned(), 0xab);
    }

    #[test]
    fn byte_align_is_noop_when_already_aligned()
    {
        let data = [0x11, 0x22];
        let mut r = BitReader::new(&data);
        assert_eq!(r.get_byte_aligned(), 0x11);
        assert_eq!(r.get_byte_aligned(), 0x22);
    }

    #[test]
    fn eof_yields_zero_bits_and_sets_flag()
    {
        let data: [u8; 0] = [];
        let mut r = BitReader::new(&data);
        assert_eq!(r.get_bits(8), 0);
        assert!(r.at_eof());
    }
}
