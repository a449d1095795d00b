//! The chunk-sequencing state machine: reads a PNG file chunk by
//! chunk, validates ordering, concatenates `IDAT` payloads, and hands
//! them to the DEFLATE decompressor.

use log::{trace, warn};
use pngflate_core::{ByteReader, DecoderOptions};
use pngflate_inflate::decode_zlib;

use crate::constants::{DEFAULT_MAX_IDAT_SIZE, PNG_SIGNATURE};
use crate::crc::crc32;
use crate::enums::{ChunkType, ColorType, ParserState};
use crate::error::PngError;
use crate::header::{parse_ihdr, ImageHeader};

struct Chunk<'a>
{
    chunk_type: [u8; 4],
    data:       &'a [u8],
    crc:        u32
}

fn read_chunk<'a>(reader: &mut ByteReader<'a>) -> Result<Chunk<'a>, PngError>
{
    let length = reader.read_u32_be()?;
    let chunk_type_bytes = reader.read_bytes(4)?;
    let chunk_type = [chunk_type_bytes[0], chunk_type_bytes[1], chunk_type_bytes[2], chunk_type_bytes[3]];

    if !reader.has(length as usize + 4)
    {
        return Err(PngError::TruncatedChunk);
    }

    let data = reader.read_bytes(length as usize)?;
    let crc = reader.read_u32_be()?;

    Ok(Chunk { chunk_type, data, crc })
}

fn verify_crc(chunk: &Chunk) -> Result<(), PngError>
{
    let mut buf = Vec::with_capacity(4 + chunk.data.len());
    buf.extend_from_slice(&chunk.chunk_type);
    buf.extend_from_slice(chunk.data);

    let computed = crc32(&buf);
    if computed != chunk.crc
    {
        return Err(PngError::CrcMismatch { expected: chunk.crc, actual: computed });
    }
    Ok(())
}

/// A fully decoded PNG image: pixel data exactly as it came out of
/// the DEFLATE decompressor, with its filter bytes still in place and
/// no palette expansion or Adam7 de-interlacing applied.
pub struct DecodedImage
{
    pub width:      u32,
    pub height:     u32,
    pub bit_depth:  u8,
    pub color_type: ColorType,
    pub data:       Vec<u8>
}

/// Decodes a PNG byte stream chunk by chunk.
pub struct PngDecoder<'a>
{
    reader:    ByteReader<'a>,
    options:   DecoderOptions,
    state:     ParserState,
    header:    Option<ImageHeader>,
    seen_plte: bool,
    seen_gama: bool,
    idat:      Vec<u8>
}

impl<'a> PngDecoder<'a>
{
    pub fn new(data: &'a [u8]) -> PngDecoder<'a>
    {
        PngDecoder::with_options(data, DecoderOptions::default())
    }

    pub fn with_options(data: &'a [u8], options: DecoderOptions) -> PngDecoder<'a>
    {
        PngDecoder {
            reader: ByteReader::new(data),
            options,
            state: ParserState::Start,
            header: None,
            seen_plte: false,
            seen_gama: false,
            idat: Vec::new()
        }
    }

    /// The image's `IHDR` fields, once decoding has reached past
    /// them.
    pub fn header(&self) -> Option<&ImageHeader>
    {
        self.header.as_ref()
    }

    fn read_signature(&mut self) -> Result<(), PngError>
    {
        let sig = self.reader.read_bytes(8)?;
        if sig != PNG_SIGNATURE
        {
            return Err(PngError::BadSignature);
        }
        Ok(())
    }

    pub fn decode(&mut self) -> Result<DecodedImage, PngError>
    {
        self.read_signature()?;

        loop
        {
            let chunk = match read_chunk(&mut self.reader)
            {
                Ok(chunk) => chunk,
                Err(_) if self.header.is_none() => return Err(PngError::IhdrNotFound),
                Err(err) => return Err(err)
            };

            if self.options.get_confirm_crc()
            {
                verify_crc(&chunk)?;
            }

            match ChunkType::from_tag(chunk.chunk_type)
            {
                ChunkType::IHDR => self.parse_ihdr(chunk.data)?,
                ChunkType::PLTE => self.parse_plte(chunk.data)?,
                ChunkType::gAMA => self.parse_gama(chunk.data)?,
                ChunkType::IDAT => self.parse_idat(chunk.data)?,
                ChunkType::IEND =>
                {
                    self.state = ParserState::End;
                    break;
                }
                ChunkType::Unknown(tag) => self.handle_unknown_chunk(tag)?
            }
        }

        let header = self.header.ok_or(PngError::IhdrNotFound)?;
        if self.idat.is_empty()
        {
            return Err(PngError::NoIdat);
        }

        let data = decode_zlib(&self.idat, &self.options)?;

        Ok(DecodedImage {
            width: header.width,
            height: header.height,
            bit_depth: header.bit_depth,
            color_type: header.color_type,
            data
        })
    }

    fn parse_ihdr(&mut self, data: &[u8]) -> Result<(), PngError>
    {
        if self.state != ParserState::Start
        {
            return Err(PngError::MultipleIhdr);
        }
        let header = parse_ihdr(data, &self.options)?;
        self.header = Some(header);
        self.state = ParserState::AfterIhdr;
        Ok(())
    }

    fn parse_plte(&mut self, data: &[u8]) -> Result<(), PngError>
    {
        let header = self.header.ok_or(PngError::IhdrNotFound)?;
        if self.seen_plte
        {
            return Err(PngError::MultiplePlte);
        }
        if matches!(header.color_type, ColorType::Greyscale | ColorType::GreyscaleAlpha)
        {
            return Err(PngError::UnexpectedPlte);
        }
        if data.len() % 3 != 0
        {
            return Err(PngError::CorruptPlte);
        }

        self.seen_plte = true;
        self.state = ParserState::AfterPlte;
        Ok(())
    }

    fn parse_gama(&mut self, data: &[u8]) -> Result<(), PngError>
    {
        self.header.ok_or(PngError::IhdrNotFound)?;
        if self.seen_plte
        {
            return Err(PngError::GammaAfterPlte);
        }
        if self.seen_gama
        {
            return Err(PngError::MultipleGama);
        }

        let mut reader = ByteReader::new(data);
        let raw = reader.read_u32_be()?;
        if raw == 0
        {
            warn!("gAMA chunk declares a gamma of zero, falling back to 1/2.2");
        }
        self.seen_gama = true;
        Ok(())
    }

    fn parse_idat(&mut self, data: &[u8]) -> Result<(), PngError>
    {
        let header = self.header.ok_or(PngError::IhdrNotFound)?;
        if header.color_type == ColorType::Indexed && !self.seen_plte
        {
            return Err(PngError::MissingPlte);
        }
        if self.idat.len() + data.len() > DEFAULT_MAX_IDAT_SIZE
        {
            return Err(PngError::IdatTooLarge);
        }

        self.idat.extend_from_slice(data);
        self.state = ParserState::AfterIdat;
        Ok(())
    }

    fn handle_unknown_chunk(&mut self, tag: [u8; 4]) -> Result<(), PngError>
    {
        self.header.ok_or(PngError::IhdrNotFound)?;
        if ChunkType::is_critical(tag)
        {
            return Err(PngError::UnknownCriticalChunk(tag));
        }
        trace!("skipping unknown ancillary chunk {:?}", core::str::from_utf8(&tag).unwrap_or("????"));
        Ok(())
    }
}

/// Decode a PNG file with default options.
pub fn decode(data: &[u8]) -> Result<DecodedImage, PngError>
{
    PngDecoder::new(data).decode()
}

/// Decode a PNG file with caller-supplied limits and checksum policy.
pub fn decode_with_options(data: &[u8], options: DecoderOptions) -> Result<DecodedImage, PngError>
{
    PngDecoder::with_options(data, options).decode()
}

#[cfg(test)]
mod tests
{
    use super::*;

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

    fn ihdr_data(width: u32, height: u32, depth: u8, color: u8) -> Vec<u8>
    {
        let mut v = Vec::new();
        v.extend_from_slice(&width.to_be_bytes());
        v.extend_from_slice(&height.to_be_bytes());
        v.extend_from_slice(&[depth, color, 0, 0, 0]);
        v
    }

    fn minimal_png() -> Vec<u8>
    {
        // 1x1 8-bit greyscale, one IDAT holding a stored deflate
        // block of the two bytes (filter byte 0, pixel 0).
        let mut out = PNG_SIGNATURE.to_vec();
        out.extend(chunk(b"IHDR", &ihdr_data(1, 1, 8, 0)));

        let payload = [0u8, 0u8];
        let mut body = vec![0b0000_0001u8];
        body.extend_from_slice(&(payload.len() as u16).to_le_bytes());
        body.extend_from_slice(&(!(payload.len() as u16)).to_le_bytes());
        body.extend_from_slice(&payload);

        let mut zlib = vec![0x78, 0x01];
        zlib.extend_from_slice(&body);
        zlib.extend_from_slice(&[0, 0, 0, 1]); // adler trailer, unchecked by default

        out.extend(chunk(b"IDAT", &zlib));
        out.extend(chunk(b"IEND", &[]));
        out
    }

    #[test]
    fn decodes_minimal_greyscale_image()
    {
        let png = minimal_png();
        let image = decode(&png).unwrap();
        assert_eq!((image.width, image.height), (1, 1));
        assert_eq!(image.data, vec![0, 0]);
    }

    #[test]
    fn rejects_bad_signature()
    {
        let mut png = minimal_png();
        png[0] = 0x00;
        assert!(matches!(decode(&png), Err(PngError::BadSignature)));
    }

    #[test]
    fn rejects_plte_before_ihdr()
    {
        let mut out = PNG_SIGNATURE.to_vec();
        out.extend(chunk(b"PLTE", &[0, 0, 0]));
        assert!(matches!(decode(&out), Err(PngError::IhdrNotFound)));
    }

    #[test]
    fn rejects_gama_before_ihdr()
    {
        let mut out = PNG_SIGNATURE.to_vec();
        out.extend(chunk(b"gAMA", &100_000u32.to_be_bytes()));
        assert!(matches!(decode(&out), Err(PngError::IhdrNotFound)));
    }

    #[test]
    fn rejects_unknown_ancillary_chunk_before_ihdr()
    {
        let mut out = PNG_SIGNATURE.to_vec();
        out.extend(chunk(b"thIs", &[9, 9, 9]));
        assert!(matches!(decode(&out), Err(PngError::IhdrNotFound)));
    }

    #[test]
    fn rejects_signature_only_stream()
    {
        let out = PNG_SIGNATURE.to_vec();
        assert!(matches!(decode(&out), Err(PngError::IhdrNotFound)));
    }

    #[test]
    fn rejects_unknown_critical_chunk()
    {
        let mut out = PNG_SIGNATURE.to_vec();
        out.extend(chunk(b"IHDR", &ihdr_data(1, 1, 8, 0)));
        out.extend(chunk(b"FooX", &[1, 2, 3]));
        assert!(matches!(decode(&out), Err(PngError::UnknownCriticalChunk(_))));
    }

    #[test]
    fn skips_unknown_ancillary_chunk()
    {
        let mut out = PNG_SIGNATURE.to_vec();
        out.extend(chunk(b"IHDR", &ihdr_data(1, 1, 8, 0)));
        out.extend(chunk(b"thIs", &[9, 9, 9]));

        let payload = [0u8, 0u8];
        let mut body = vec![0b0000_0001u8];
        body.extend_from_slice(&(payload.len() as u16).to_le_bytes());
        body.extend_from_slice(&(!(payload.len() as u16)).to_le_bytes());
        body.extend_from_slice(&payload);
        let mut zlib = vec![0x78, 0x01];
        zlib.extend_from_slice(&body);
        zlib.extend_from_slice(&[0, 0, 0, 1]);

        out.extend(chunk(b"IDAT", &zlib));
        out.extend(chunk(b"IEND", &[]));

        assert!(decode(&out).is_ok());
    }

    #[test]
    fn rejects_crc_mismatch_when_confirm_crc_enabled()
    {
        let mut png = minimal_png();
        // Flip a byte inside the IHDR chunk's data without fixing its CRC.
        let ihdr_data_start = PNG_SIGNATURE.len() + 4 + 4;
        png[ihdr_data_start] ^= 0xff;

        let opts = DecoderOptions::default().set_confirm_crc(true);
        assert!(matches!(
            decode_with_options(&png, opts),
            Err(PngError::CrcMismatch { .. })
        ));
    }
}
