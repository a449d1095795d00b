//! Black-box scenarios against the public decoding API, using only
//! hand-built byte buffers (no external PNG fixtures or crates).

use pngflate_png::{decode, decode_with_options, DecoderOptions, PngError};

fn crc32(data: &[u8]) -> u32
{
    // Mirrors the crate's internal CRC-32; duplicated here since the
    // module isn't part of the public API.
    const POLY: u32 = 0xedb8_8320;
    let mut crc = 0xffff_ffffu32;
    for &byte in data
    {
        crc ^= u32::from(byte);
        for _ in 0..8
        {
            crc = if crc & 1 != 0 { POLY ^ (crc >> 1) } else { crc >> 1 };
        }
    }
    crc ^ 0xffff_ffff
}

fn chunk(tag: &[u8; 4], data: &[u8]) -> Vec<u8>
{
    let mut out = Vec::new();
    out.extend_from_slice(&(data.len() as u32).to_be_bytes());
    out.extend_from_slice(tag);
    out.extend_from_slice(data);
    let mut crc_input = tag.to_vec();
    crc_input.extend_from_slice(data);
    out.extend_from_slice(&crc32(&crc_input).to_be_bytes());
    out
}

const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

fn ihdr_data(width: u32, height: u32, depth: u8, color: u8) -> Vec<u8>
{
    let mut v = Vec::new();
    v.extend_from_slice(&width.to_be_bytes());
    v.extend_from_slice(&height.to_be_bytes());
    v.extend_from_slice(&[depth, color, 0, 0, 0]);
    v
}

fn stored_idat_zlib(payload: &[u8]) -> Vec<u8>
{
    let mut body = vec![0b0000_0001u8];
    body.extend_from_slice(&(payload.len() as u16).to_le_bytes());
    body.extend_from_slice(&(!(payload.len() as u16)).to_le_bytes());
    body.extend_from_slice(payload);

    let mut zlib = vec![0x78, 0x01];
    zlib.extend_from_slice(&body);
    zlib.extend_from_slice(&[0, 0, 0, 1]);
    zlib
}

fn one_pixel_png(depth: u8, color: u8, payload: &[u8]) -> Vec<u8>
{
    let mut out = SIGNATURE.to_vec();
    out.extend(chunk(b"IHDR", &ihdr_data(1, 1, depth, color)));
    out.extend(chunk(b"IDAT", &stored_idat_zlib(payload)));
    out.extend(chunk(b"IEND", &[]));
    out
}

#[test]
fn decodes_one_pixel_greyscale_image()
{
    let png = one_pixel_png(8, 0, &[0, 200]);
    let image = decode(&png).unwrap();
    assert_eq!((image.width, image.height), (1, 1));
    assert_eq!(image.data, vec![0, 200]);
}

#[test]
fn rejects_wrong_signature()
{
    let mut png = one_pixel_png(8, 0, &[0, 200]);
    png[1] = b'X';
    assert!(matches!(decode(&png), Err(PngError::BadSignature)));
}

#[test]
fn rejects_signature_with_no_chunks()
{
    assert!(matches!(decode(&SIGNATURE), Err(PngError::IhdrNotFound)));
}

#[test]
fn rejects_bad_bit_depth_color_combo()
{
    // Bit depth 16 is not legal for indexed color.
    let png = one_pixel_png(16, 3, &[0, 0]);
    assert!(matches!(decode(&png), Err(PngError::BadBitDepthCombo { .. })));
}

#[test]
fn honors_tightened_dimension_limits()
{
    let png = one_pixel_png(8, 0, &[0, 200]);
    let opts = DecoderOptions::default().set_max_width(0);
    assert!(matches!(decode_with_options(&png, opts), Err(PngError::ImageTooBig { .. })));
}
