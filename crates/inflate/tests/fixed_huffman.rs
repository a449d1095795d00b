//! Hand-encoded fixed-Huffman block scenarios, built bit by bit
//! against RFC 1951's canonical code assignment rather than produced
//! by any existing compressor.

use pngflate_core::DecoderOptions;
use pngflate_inflate::{decode_zlib, InflateError};

fn wrap_zlib(deflate_body: &[u8]) -> Vec<u8>
{
    let mut out = vec![0x78, 0x01];
    out.extend_from_slice(deflate_body);
    out.extend_from_slice(&[0, 0, 0, 0]);
    out
}

#[test]
fn decodes_single_literal_fixed_block()
{
    // BFINAL=1, BTYPE=01 (fixed), literal 'a' (8-bit code 0x91,
    // bit-reversed to 0x89), then end-of-block (7 zero bits).
    let body = [0x4b, 0x04, 0x00];
    let data = wrap_zlib(&body);

    let out = decode_zlib(&data, &DecoderOptions::default().set_confirm_adler(false)).unwrap();
    assert_eq!(out, b"a");
}

#[test]
fn rejects_truncated_stream()
{
    // Valid zlib header, zero bytes of deflate body.
    let data = [0x78, 0x01];
    let err = decode_zlib(&data, &DecoderOptions::default().set_confirm_adler(false)).unwrap_err();
    assert!(matches!(err, InflateError::UnexpectedEof));
}
