//! zlib (RFC 1950) framing and DEFLATE (RFC 1951) block decoding.

use pngflate_core::DecoderOptions;

use crate::adler;
use crate::bitstream::BitReader;
use crate::constants::{
    fixed_dist_lengths, fixed_litlen_lengths, CODE_LENGTH_ORDER, DIST_BASE_EXTRA, END_OF_BLOCK,
    LENGTH_BASE_EXTRA, NUM_CODE_LENGTH_SYMS, NUM_DIST_SYMS, NUM_LITLEN_SYMS
};
use crate::errors::InflateError;
use crate::huffman::HuffmanTable;

/// Decompress a zlib-wrapped DEFLATE stream (the format PNG's
/// concatenated `IDAT` payload uses).
pub fn decode_zlib(data: &[u8], options: &DecoderOptions) -> Result<Vec<u8>, InflateError>
{
    if data.len() < 2
    {
        return Err(InflateError::UnexpectedEof);
    }
    let cmf = data[0];
    let flg = data[1];
    validate_zlib_header(cmf, flg)?;

    let body = &data[2..];
    let mut reader = BitReader::new(body);
    let mut out = Vec::new();
    decode_blocks(&mut reader, &mut out)?;

    if options.get_confirm_adler()
    {
        let aligned = reader.aligned_byte_position();
        let trailer = body
            .get(aligned..aligned + 4)
            .ok_or(InflateError::UnexpectedEof)?;
        let expected = u32::from_be_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
        let actual = adler::adler32(&out);
        if expected != actual
        {
            return Err(InflateError::AdlerMismatch { expected, actual });
        }
    }

    Ok(out)
}

/// Validate the 2-byte zlib header: compression method, window size,
/// the mod-31 check bits, and the preset-dictionary flag.
fn validate_zlib_header(cmf: u8, flg: u8) -> Result<(), InflateError>
{
    let cm = cmf & 0x0f;
    let cinfo = cmf >> 4;

    if cm != 8
    {
        return Err(InflateError::UnsupportedCompression(cm));
    }
    if cinfo > 7
    {
        return Err(InflateError::ZlibHeaderCorrupted);
    }
    if (u16::from(cmf) * 256 + u16::from(flg)) % 31 != 0
    {
        return Err(InflateError::ZlibHeaderCorrupted);
    }

    let fdict = (flg >> 5) & 1;
    if fdict != 0
    {
        return Err(InflateError::PresetDictNotAllowed);
    }

    Ok(())
}

fn decode_blocks(reader: &mut BitReader, out: &mut Vec<u8>) -> Result<(), InflateError>
{
    loop
    {
        let bfinal = reader.get_bits(1);
        let btype = reader.get_bits(2);

        match btype
        {
            0 => decode_stored_block(reader, out)?,
            1 =>
            {
                let litlen = HuffmanTable::build(&fixed_litlen_lengths())?;
                let dist = HuffmanTable::build(&fixed_dist_lengths())?;
                decode_compressed_block(reader, out, &litlen, &dist)?;
            }
            2 =>
            {
                let (litlen, dist) = decode_dynamic_tables(reader)?;
                decode_compressed_block(reader, out, &litlen, &dist)?;
            }
            _ => return Err(InflateError::ReservedBlockType)
        }

        if bfinal == 1
        {
            return Ok(());
        }
        if reader.at_eof()
        {
            return Err(InflateError::UnexpectedEof);
        }
    }
}

fn decode_stored_block(reader: &mut BitReader, out: &mut Vec<u8>) -> Result<(), InflateError>
{
    let len = u16::from_le_bytes([reader.get_byte_aligned(), reader.get_byte_aligned()]);
    let nlen = u16::from_le_bytes([reader.get_byte_aligned(), reader.get_byte_aligned()]);
    if reader.at_eof()
    {
        return Err(InflateError::UnexpectedEof);
    }
    if len != !nlen
    {
        return Err(InflateError::StoredBlockLengthMismatch);
    }

    for _ in 0..len
    {
        out.push(reader.get_byte_aligned());
    }
    if reader.at_eof()
    {
        return Err(InflateError::UnexpectedEof);
    }
    Ok(())
}

fn decode_compressed_block(
    reader: &mut BitReader, out: &mut Vec<u8>, litlen: &HuffmanTable, dist: &HuffmanTable
) -> Result<(), InflateError>
{
    loop
    {
        let sym = litlen.decode(reader)?;

        if sym == END_OF_BLOCK
        {
            return Ok(());
        }
        else if sym < END_OF_BLOCK
        {
            out.push(sym as u8);
        }
        else
        {
            let len_idx = (sym - 257) as usize;
            let &(base, extra) = LENGTH_BASE_EXTRA
                .get(len_idx)
                .ok_or(InflateError::InvalidSymbol)?;
            let length = base as usize + get_extra_bits(reader, extra) as usize;

            let dist_sym = dist.decode(reader)?;
            let &(dbase, dextra) = DIST_BASE_EXTRA
                .get(dist_sym as usize)
                .ok_or(InflateError::InvalidSymbol)?;
            let distance = dbase as usize + get_extra_bits(reader, dextra) as usize;

            if distance == 0 || distance > out.len()
            {
                return Err(InflateError::InvalidBackReference);
            }
            let start = out.len() - distance;
            for i in 0..length
            {
                let byte = out[start + i];
                out.push(byte);
            }
        }

        if reader.at_eof()
        {
            return Err(InflateError::UnexpectedEof);
        }
    }
}

fn get_extra_bits(reader: &mut BitReader, extra: u8) -> u32
{
    if extra == 0
    {
        0
    }
    else
    {
        reader.get_bits(extra)
    }
}

/// Read a dynamic block's code-length description and build its two
/// Huffman tables (literal/length and distance).
fn decode_dynamic_tables(reader: &mut BitReader) -> Result<(HuffmanTable, HuffmanTable), InflateError>
{
    let hlit = reader.get_bits(5) as usize + 257;
    let hdist = reader.get_bits(5) as usize + 1;
    let hclen = reader.get_bits(4) as usize + 4;

    if hlit > NUM_LITLEN_SYMS || hdist > NUM_DIST_SYMS
    {
        return Err(InflateError::BadCodeLengths);
    }

    let mut cl_lengths = [0u8; NUM_CODE_LENGTH_SYMS];
    for i in 0..hclen
    {
        cl_lengths[CODE_LENGTH_ORDER[i]] = reader.get_bits(3) as u8;
    }
    let cl_table = HuffmanTable::build(&cl_lengths)?;

    let mut lengths = vec![0u8; hlit + hdist];
    let mut i = 0;
    while i < lengths.len()
    {
        let sym = cl_table.decode(reader)?;
        match sym
        {
            0..=15 =>
            {
                lengths[i] = sym as u8;
                i += 1;
            }
            16 =>
            {
                if i == 0
                {
                    return Err(InflateError::BadCodeLengths);
                }
                let prev = lengths[i - 1];
                let repeat = 3 + reader.get_bits(2) as usize;
                fill_repeated(&mut lengths, &mut i, prev, repeat)?;
            }
            17 =>
            {
                let repeat = 3 + reader.get_bits(3) as usize;
                fill_repeated(&mut lengths, &mut i, 0, repeat)?;
            }
            18 =>
            {
                let repeat = 11 + reader.get_bits(7) as usize;
                fill_repeated(&mut lengths, &mut i, 0, repeat)?;
            }
            _ => return Err(InflateError::BadCodeLengths)
        }

        if reader.at_eof()
        {
            return Err(InflateError::UnexpectedEof);
        }
    }

    let litlen_table = HuffmanTable::build(&lengths[0..hlit])?;
    let dist_table = HuffmanTable::build(&lengths[hlit..hlit + hdist])?;
    Ok((litlen_table, dist_table))
}

fn fill_repeated(lengths: &mut [u8], i: &mut usize, value: u8, repeat: usize) -> Result<(), InflateError>
{
    if *i + repeat > lengths.len()
    {
        return Err(InflateError::BadCodeLengths);
    }
    for slot in &mut lengths[*i..*i + repeat]
    {
        *slot = value;
    }
    *i += repeat;
    Ok(())
}
