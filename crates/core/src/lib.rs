//! Core primitives shared by the `pngflate` family of crates.
//!
//! This crate holds only what more than one format-specific crate
//! needs: a zero-copy byte cursor and decoder configuration. Anything
//! PNG- or DEFLATE-specific lives in its own crate.

pub mod bytes;
pub mod options;

pub use bytes::ByteReader;
pub use options::DecoderOptions;
