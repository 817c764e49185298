//! PNG codec for radar rasters.
//!
//! Decoding accepts any PNG color type and bit depth and normalizes it to
//! 8-bit RGBA. Chunk CRCs and the zlib checksum are not verified: published
//! composites occasionally carry bad checksums over intact pixel data.
//!
//! Encoding always writes a non-interlaced 8-bit RGBA image (color type 6)
//! with filter type 0 on every scanline, so identical rasters encode to
//! identical bytes.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use radar_common::{RadarError, RadarResult};

const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// RGBA color type in IHDR
const COLOR_TYPE_RGBA: u8 = 6;

/// Decoded image: width, height and `width * height * 4` RGBA bytes.
pub struct Decoded {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Decode PNG bytes to 8-bit RGBA.
pub fn decode_rgba(bytes: &[u8]) -> RadarResult<Decoded> {
    let decode_err = |e: png::DecodingError| RadarError::Decode(e.to_string());

    let mut decoder = png::Decoder::new(bytes);
    decoder.ignore_checksums(true);
    decoder.set_transformations(png::Transformations::normalize_to_color8());

    let mut reader = decoder.read_info().map_err(decode_err)?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).map_err(decode_err)?;
    buf.truncate(frame.buffer_size());

    let rgba = match frame.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(RadarError::Decode(
                "palette image was not expanded to RGB".to_string(),
            ))
        }
    };

    Ok(Decoded {
        width: frame.width,
        height: frame.height,
        rgba,
    })
}

/// Encode an RGBA buffer as an 8-bit RGBA PNG.
pub fn encode_rgba(width: u32, height: u32, rgba: &[u8]) -> RadarResult<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(RadarError::Encode(format!(
            "cannot encode an empty {}x{} raster",
            width, height
        )));
    }
    let stride = width as usize * 4;
    if rgba.len() != stride * height as usize {
        return Err(RadarError::Encode(format!(
            "RGBA buffer has {} bytes, expected {} for {}x{}",
            rgba.len(),
            stride * height as usize,
            width,
            height
        )));
    }

    let mut header = [0u8; 13];
    header[0..4].copy_from_slice(&width.to_be_bytes());
    header[4..8].copy_from_slice(&height.to_be_bytes());
    header[8] = 8; // bit depth
    header[9] = COLOR_TYPE_RGBA;
    // compression, filter and interlace methods stay 0

    let image_data = compress_scanlines(rgba, stride)
        .map_err(|e| RadarError::Encode(format!("zlib compression failed: {}", e)))?;

    let mut out = Vec::with_capacity(SIGNATURE.len() + image_data.len() + 3 * 12 + 13);
    out.extend_from_slice(&SIGNATURE);
    push_chunk(&mut out, b"IHDR", &header);
    push_chunk(&mut out, b"IDAT", &image_data);
    push_chunk(&mut out, b"IEND", &[]);
    Ok(out)
}

/// zlib stream of the scanlines, each prefixed with filter byte 0.
fn compress_scanlines(rgba: &[u8], stride: usize) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(rgba.len() / 4), Compression::default());
    for row in rgba.chunks_exact(stride) {
        encoder.write_all(&[0])?;
        encoder.write_all(row)?;
    }
    encoder.finish()
}

/// Append length, type, body and CRC-32 (over type and body).
fn push_chunk(out: &mut Vec<u8>, kind: &[u8; 4], body: &[u8]) {
    let mut crc = crc32fast::Hasher::new();
    crc.update(kind);
    crc.update(body);

    out.extend_from_slice(&(body.len() as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(body);
    out.extend_from_slice(&crc.finalize().to_be_bytes());
}
