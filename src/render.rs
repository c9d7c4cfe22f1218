//! Rasterization of finished symbols: grayscale images, PNG bytes and
//! terminal text. Black on white only.

use crate::error::{EncodingError, RenderError};
use crate::models::ModuleMatrix;
use image::codecs::png::PngEncoder;
use image::{ColorType, GrayImage, ImageEncoder, Luma};

/// Quiet zone width required around a symbol, in modules
pub const DEFAULT_BORDER: usize = 4;
/// Largest accepted pixels-per-module scale
pub const MAX_SCALE: u32 = 40;
/// Largest accepted quiet zone, in modules
pub const MAX_BORDER: usize = 64;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Render `matrix` with `scale` pixels per module and `border` light modules around it
pub fn to_image(matrix: &ModuleMatrix, scale: u32, border: usize) -> Result<GrayImage, EncodingError> {
    if !(1..=MAX_SCALE).contains(&scale) {
        return Err(EncodingError::InvalidScale(scale));
    }
    let side_px = side_modules(matrix, border)?
        .checked_mul(scale as usize)
        .and_then(|side| u32::try_from(side).ok())
        .ok_or(EncodingError::InvalidBorder(border))?;
    let scale = scale as usize;

    let image = GrayImage::from_fn(side_px, side_px, |px, py| {
        let x = (px as usize / scale).checked_sub(border);
        let y = (py as usize / scale).checked_sub(border);
        match (x, y) {
            (Some(x), Some(y)) if matrix.is_dark(x, y) => DARK,
            _ => LIGHT,
        }
    });
    tracing::trace!(side = side_px, scale, border, "symbol rasterized");
    Ok(image)
}

/// Render `matrix` as PNG bytes (8-bit grayscale)
pub fn to_png(matrix: &ModuleMatrix, scale: u32, border: usize) -> Result<Vec<u8>, RenderError> {
    let image = to_image(matrix, scale, border)?;
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ColorType::L8,
    )?;
    Ok(buf)
}

/// Render `matrix` as text, two characters per module
pub fn to_ascii(matrix: &ModuleMatrix, border: usize) -> Result<String, EncodingError> {
    let side = side_modules(matrix, border)?;
    let mut out = String::with_capacity(side * (side * 2 * 3 + 1));
    for py in 0..side {
        for px in 0..side {
            let dark = match (px.checked_sub(border), py.checked_sub(border)) {
                (Some(x), Some(y)) => matrix.is_dark(x, y),
                _ => false,
            };
            out.push_str(if dark { "██" } else { "  " });
        }
        out.push('\n');
    }
    Ok(out)
}

/// Symbol side plus the quiet zone on both edges, in modules
fn side_modules(matrix: &ModuleMatrix, border: usize) -> Result<usize, EncodingError> {
    if border > MAX_BORDER {
        return Err(EncodingError::InvalidBorder(border));
    }
    border
        .checked_mul(2)
        .and_then(|margin| matrix.size().checked_add(margin))
        .ok_or(EncodingError::InvalidBorder(border))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Version;
    use crate::{ECLevel, encode};

    #[test]
    fn test_image_dimensions() {
        let matrix = encode(b"render", ECLevel::M, 1).unwrap();
        let image = to_image(&matrix, 3, DEFAULT_BORDER).unwrap();
        assert_eq!(image.width(), (21 + 8) * 3);
        assert_eq!(image.height(), image.width());
        // Quiet zone is light, top-left finder corner is dark
        assert_eq!(*image.get_pixel(0, 0), LIGHT);
        assert_eq!(*image.get_pixel(12, 12), DARK);
    }

    #[test]
    fn test_scale_range() {
        let matrix = ModuleMatrix::new(Version::new(1).unwrap());
        assert_eq!(to_image(&matrix, 0, 4).unwrap_err(), EncodingError::InvalidScale(0));
        assert_eq!(to_image(&matrix, 41, 4).unwrap_err(), EncodingError::InvalidScale(41));
        assert!(to_image(&matrix, 40, 0).is_ok());
    }

    #[test]
    fn test_border_range() {
        let matrix = ModuleMatrix::new(Version::new(40).unwrap());
        let widest = to_image(&matrix, 1, MAX_BORDER).unwrap();
        assert_eq!(widest.width() as usize, 177 + 2 * MAX_BORDER);

        for border in [MAX_BORDER + 1, 50_000_000, usize::MAX / 2, usize::MAX] {
            assert_eq!(
                to_image(&matrix, 40, border).unwrap_err(),
                EncodingError::InvalidBorder(border)
            );
            assert_eq!(
                to_ascii(&matrix, border).unwrap_err(),
                EncodingError::InvalidBorder(border)
            );
        }
        assert!(matches!(
            to_png(&matrix, 1, usize::MAX).unwrap_err(),
            RenderError::Encoding(EncodingError::InvalidBorder(_))
        ));
        assert_eq!(EncodingError::InvalidBorder(65).class(), crate::ErrorClass::Input);
    }

    #[test]
    fn test_png_signature() {
        let matrix = encode(b"png", ECLevel::L, 1).unwrap();
        let png = to_png(&matrix, 2, DEFAULT_BORDER).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&png).unwrap().to_luma8();
        assert_eq!(decoded, to_image(&matrix, 2, DEFAULT_BORDER).unwrap());
    }

    #[test]
    fn test_ascii_layout() {
        let matrix = encode(b"ascii", ECLevel::L, 1).unwrap();
        let text = to_ascii(&matrix, 1).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 23);
        assert!(lines.iter().all(|l| l.chars().count() == 46));
        assert!(lines[1].starts_with("  ██"));
    }
}
