//! Indexed PNG output.
//!
//! Images are written in palette mode (colour type 3, 8-bit) with a PLTE
//! chunk holding the configured palette, so every pixel is guaranteed to be
//! a palette colour when decoded.

use std::fs;
use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{FlockError, Result};
use crate::types::{Colour, Palette};

use super::{quantize, IndexedImage, PixelGrid};

/// Largest upscale factor accepted for written PNG files.
pub const MAX_SCALE: u32 = 64;

/// Prefix of the data URI carried in metadata.
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// A quantized image with its PNG bytes and their base64 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub image: IndexedImage,
    pub png: Vec<u8>,
    pub base64: String,
}

impl EncodedImage {
    /// `data:image/png;base64,...`
    pub fn data_uri(&self) -> String {
        format!("{}{}", DATA_URI_PREFIX, self.base64)
    }
}

/// Encode an indexed image as a palette-mode PNG.
pub fn encode_png(image: &IndexedImage) -> Result<Vec<u8>> {
    let width = u32::try_from(image.width()).map_err(|_| too_large(image.width(), image.height()))?;
    let height = u32::try_from(image.height()).map_err(|_| too_large(image.width(), image.height()))?;
    let mut bytes = Vec::new();

    {
        let mut encoder = png::Encoder::new(&mut bytes, width, height);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_palette(image.palette().to_rgb_bytes());

        let mut writer = encoder.write_header().map_err(encode_error)?;
        writer
            .write_image_data(image.indices())
            .map_err(encode_error)?;
        writer.finish().map_err(encode_error)?;
    }

    Ok(bytes)
}

/// Quantize a grid and encode it, producing PNG bytes and base64 text.
pub fn quantize_and_encode(grid: &PixelGrid, palette: &Palette) -> Result<EncodedImage> {
    let image = quantize(grid, palette)?;
    let png = encode_png(&image)?;
    let base64 = STANDARD.encode(&png);

    Ok(EncodedImage { image, png, base64 })
}

/// Decode a palette-mode PNG back into an indexed image.
///
/// Fails with `Encode` for anything other than 8-bit indexed PNGs.
pub fn decode_indexed(bytes: &[u8]) -> Result<IndexedImage> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().map_err(decode_error)?;

    let (colour_type, depth) = reader.output_color_type();
    if colour_type != png::ColorType::Indexed || depth != png::BitDepth::Eight {
        return Err(FlockError::Encode {
            message: format!(
                "Expected an 8-bit indexed PNG, found {:?} at {:?}",
                colour_type, depth
            ),
        });
    }

    let plte = reader
        .info()
        .palette
        .as_ref()
        .map(|p| p.to_vec())
        .ok_or_else(|| FlockError::Encode {
            message: "Indexed PNG has no PLTE chunk".to_string(),
        })?;
    let colours = plte
        .chunks_exact(3)
        .map(|c| Colour::rgb(c[0], c[1], c[2]))
        .collect();
    let palette = Palette::new(colours)?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).map_err(decode_error)?;
    buf.truncate(frame.buffer_size());

    IndexedImage::new(frame.width as usize, frame.height as usize, buf, palette)
}

/// Scale an indexed image by an integer factor.
///
/// Uses nearest-neighbour scaling so pixel edges stay crisp. Factors above
/// `MAX_SCALE` are an `Encode` error.
pub fn scale_pixels(image: &IndexedImage, scale: u32) -> Result<IndexedImage> {
    if scale > MAX_SCALE {
        return Err(FlockError::Encode {
            message: format!("Scale {} is larger than the maximum of {}", scale, MAX_SCALE),
        });
    }
    let scale = scale.max(1) as usize;
    if scale == 1 {
        return Ok(image.clone());
    }

    let width = image.width().checked_mul(scale);
    let height = image.height().checked_mul(scale);
    let (width, height, len) = match (width, height) {
        (Some(w), Some(h)) => match w.checked_mul(h) {
            Some(len) => (w, h, len),
            None => return Err(too_large(w, h)),
        },
        _ => return Err(too_large(image.width(), image.height())),
    };
    let mut indices = Vec::with_capacity(len);

    for y in 0..height {
        let row = (y / scale) * image.width();
        for x in 0..width {
            indices.push(image.indices()[row + x / scale]);
        }
    }

    IndexedImage::new(width, height, indices, image.palette().clone())
}

/// Write an indexed image to a PNG file, optionally scaled.
pub fn write_png(image: &IndexedImage, path: &Path, scale: u32) -> Result<()> {
    let scaled = scale_pixels(image, scale)?;
    let bytes = encode_png(&scaled)?;

    fs::write(path, bytes).map_err(|e| FlockError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })
}

fn too_large(width: usize, height: usize) -> FlockError {
    FlockError::Encode {
        message: format!("Image of {}x{} pixels is too large to encode", width, height),
    }
}

fn encode_error(e: png::EncodingError) -> FlockError {
    FlockError::Encode {
        message: format!("PNG encoding failed: {}", e),
    }
}

fn decode_error(e: png::DecodingError) -> FlockError {
    FlockError::Encode {
        message: format!("PNG decoding failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn palette() -> Palette {
        Palette::new(vec![Colour::BLACK, Colour::WHITE, Colour::rgb(255, 0, 0)]).unwrap()
    }

    fn checker() -> IndexedImage {
        IndexedImage::new(2, 2, vec![0, 1, 2, 0], palette()).unwrap()
    }

    #[test]
    fn test_encode_is_indexed() {
        let bytes = encode_png(&checker()).unwrap();

        let decoder = png::Decoder::new(bytes.as_slice());
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!(info.color_type, png::ColorType::Indexed);
        assert_eq!(info.bit_depth, png::BitDepth::Eight);
        assert_eq!(info.palette.as_deref(), Some(palette().to_rgb_bytes().as_slice()));
    }

    #[test]
    fn test_encode_is_deterministic() {
        assert_eq!(encode_png(&checker()).unwrap(), encode_png(&checker()).unwrap());
    }

    #[test]
    fn test_decode_round_trip_through_image_crate() {
        let bytes = encode_png(&checker()).unwrap();

        let img = image::load_from_memory(&bytes).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(1, 0).0, [255, 255, 255]);
        assert_eq!(img.get_pixel(0, 1).0, [255, 0, 0]);
    }

    #[test]
    fn test_decode_indexed() {
        let bytes = encode_png(&checker()).unwrap();
        assert_eq!(decode_indexed(&bytes).unwrap(), checker());
    }

    #[test]
    fn test_decode_rejects_rgb() {
        let img = image::RgbImage::new(2, 2);
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();

        let err = decode_indexed(bytes.get_ref()).unwrap_err();
        assert!(matches!(err, FlockError::Encode { .. }));
    }

    #[test]
    fn test_base64_matches_png() {
        let grid = PixelGrid::from_rows(vec![vec![Colour::BLACK, Colour::WHITE]]);
        let encoded = quantize_and_encode(&grid, &palette()).unwrap();

        assert_eq!(STANDARD.decode(&encoded.base64).unwrap(), encoded.png);
        assert!(encoded.data_uri().starts_with(DATA_URI_PREFIX));
    }

    #[test]
    fn test_scale_pixels() {
        let scaled = scale_pixels(&checker(), 2).unwrap();
        assert_eq!(scaled.width(), 4);
        assert_eq!(scaled.height(), 4);
        assert_eq!(
            scaled.indices(),
            &[0, 0, 1, 1, 0, 0, 1, 1, 2, 2, 0, 0, 2, 2, 0, 0]
        );
    }

    #[test]
    fn test_scale_pixels_identity() {
        assert_eq!(scale_pixels(&checker(), 1).unwrap(), checker());
        assert_eq!(scale_pixels(&checker(), 0).unwrap(), checker());
    }

    #[test]
    fn test_scale_pixels_rejects_oversized_factor() {
        assert!(scale_pixels(&checker(), MAX_SCALE).is_ok());

        for scale in [MAX_SCALE + 1, 100_000, 1 << 30, u32::MAX] {
            assert!(
                matches!(scale_pixels(&checker(), scale), Err(FlockError::Encode { .. })),
                "scale {}",
                scale
            );
        }
    }

    #[test]
    fn test_write_png_oversized_scale_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge.png");

        assert!(write_png(&checker(), &path, 1 << 30).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_write_png_scaled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scaled.png");

        write_png(&checker(), &path, 3).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (6, 6));
        assert_eq!(img.get_pixel(2, 2).0, [0, 0, 0]);
        assert_eq!(img.get_pixel(3, 0).0, [255, 255, 255]);
    }
}
