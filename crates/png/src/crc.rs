//! CRC-32 (ISO 3309 / ITU-T V.42, polynomial 0xEDB88320 reflected),
//! the checksum PNG stores at the end of every chunk.

use std::sync::OnceLock;

const POLYNOMIAL: u32 = 0xedb8_8320;

fn table() -> &'static [u32; 256]
{
    static TABLE: OnceLock<[u32; 256]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = [0u32; 256];
        let mut n = 0usize;
        while n < 256
        {
            let mut c = n as u32;
            let mut k = 0;
            while k < 8
            {
                c = if c & 1 != 0 { POLYNOMIAL ^ (c >> 1) } else { c >> 1 };
                k += 1;
            }
            table[n] = c;
            n += 1;
        }
        table
    })
}

/// CRC-32 of `data`, as stored at the end of a PNG chunk (over the
/// chunk type and chunk data, not the length field).
pub fn crc32(data: &[u8]) -> u32
{
    let table = table();
    let mut crc = 0xffff_ffffu32;
    for &byte in data
    {
        let idx = ((crc ^ u32::from(byte)) & 0xff) as usize;
        crc = table[idx] ^ (crc >> 8);
    }
    crc ^ 0xffff_ffff
}
