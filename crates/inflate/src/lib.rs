//! A small, pure-Rust zlib/DEFLATE decompressor (RFC 1950 + RFC 1951).
//!
//! Scoped to what a PNG decoder needs: decompressing a zlib-wrapped
//! `IDAT` payload. There is no encoder, no gzip support, and no
//! streaming/incremental API — callers hand over the whole compressed
//! buffer and get the whole decompressed buffer back.

mod adler;
mod bitstream;
mod constants;
mod decoder;
mod errors;
mod huffman;

pub use decoder::decode_zlib;
pub use errors::InflateError;
