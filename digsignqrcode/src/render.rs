//! Rendu des QR codes en PNG
//!
//! Fixed visuals: 4-module quiet zone, 200x200 pixels, black modules on an
//! opaque white background, RGBA8 so the alpha channel is kept in the file.

use crate::error::{QrCodeError, Result};
use image::{ImageFormat, Rgba, RgbaImage};
use qrcode::{Color, QrCode};
use std::io::Cursor;

/// Taille de l'image en pixels (carrée)
pub const CODE_SIZE: u32 = 200;

/// Marge blanche autour du code, en modules
pub const QUIET_ZONE: usize = 4;

const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Dessine le QR code de `data` dans une image `CODE_SIZE` x `CODE_SIZE`
///
/// Each pixel samples the module under it (nearest neighbour), so the
/// output has the exact size whatever the QR version.
pub fn render_code(data: &str) -> Result<RgbaImage> {
    if data.is_empty() {
        return Err(QrCodeError::EmptyUrl);
    }

    let code = QrCode::new(data.as_bytes())?;
    let width = code.width();
    let colors = code.to_colors();
    let total = width + 2 * QUIET_ZONE;

    let mut img = RgbaImage::from_pixel(CODE_SIZE, CODE_SIZE, LIGHT);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let mx = x as usize * total / CODE_SIZE as usize;
        let my = y as usize * total / CODE_SIZE as usize;

        let inside = (QUIET_ZONE..QUIET_ZONE + width).contains(&mx)
            && (QUIET_ZONE..QUIET_ZONE + width).contains(&my);
        if inside && colors[(my - QUIET_ZONE) * width + (mx - QUIET_ZONE)] == Color::Dark {
            *pixel = DARK;
        }
    }

    Ok(img)
}

/// Encode une image en PNG
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Rendu complet: QR code de `data` en octets PNG
pub fn render_png(data: &str) -> Result<Vec<u8>> {
    encode_png(&render_code(data)?)
}
