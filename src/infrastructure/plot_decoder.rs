use anyhow::{Context, Result};
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

/// Straight-alpha RGBA pixels ready to upload as a texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }
}

/// Decodes PNG (or any format `image` was built with) into RGBA8.
pub fn decode_rgba(bytes: &[u8]) -> Result<DecodedImage> {
    let img = image::load_from_memory(bytes).context("Failed to decode image bytes")?;
    let rgba = img.to_rgba8();
    Ok(DecodedImage {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}

/// Renders a simple placeholder plot: a dark field with a strike-zone outline.
pub fn placeholder_plot_png(width: u32, height: u32) -> Result<Vec<u8>> {
    let background = Rgba([0, 0, 0, 255]);
    let outline = Rgba([255, 255, 255, 255]);

    let (left, right) = (width * 3 / 8, width * 5 / 8);
    let (top, bottom) = (height / 4, height * 3 / 4);

    let img = RgbaImage::from_fn(width, height, |x, y| {
        let on_vertical = (x == left || x == right) && (top..=bottom).contains(&y);
        let on_horizontal = (y == top || y == bottom) && (left..=right).contains(&x);
        if on_vertical || on_horizontal {
            outline
        } else {
            background
        }
    });

    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)
        .context("Failed to encode placeholder plot")?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_plot_decodes() {
        let png = placeholder_plot_png(40, 40).unwrap();
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));

        let decoded = decode_rgba(&png).unwrap();
        assert_eq!(decoded.size(), [40, 40]);
        assert_eq!(decoded.rgba.len(), 40 * 40 * 4);
        // (15, 10) sits on the top edge of the zone outline.
        let idx = ((10 * 40 + 15) * 4) as usize;
        assert_eq!(&decoded.rgba[idx..idx + 4], &[255, 255, 255, 255]);
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        assert!(decode_rgba(b"definitely not an image").is_err());
    }
}
