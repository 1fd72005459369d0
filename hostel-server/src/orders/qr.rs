//! QR image rendering for order tokens
//!
//! Tokens are rendered as a black-on-white QR code, encoded as PNG and
//! delivered inline as a `data:image/png;base64,...` URL.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, QrCode};

use super::error::OrderError;

/// Pixels per QR module
const MODULE_PX: u32 = 8;
/// Light border around the symbol, in modules
const QUIET_ZONE: u32 = 4;

pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Render `text` as a QR code PNG
pub fn render_png(text: &str) -> Result<Vec<u8>, OrderError> {
    let code = QrCode::new(text.as_bytes()).map_err(|e| OrderError::Render(e.to_string()))?;
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let size = (modules + 2 * QUIET_ZONE) * MODULE_PX;

    let img = GrayImage::from_fn(size, size, |x, y| {
        let mx = (x / MODULE_PX).checked_sub(QUIET_ZONE);
        let my = (y / MODULE_PX).checked_sub(QUIET_ZONE);
        let dark = match (mx, my) {
            (Some(mx), Some(my)) if mx < modules && my < modules => {
                colors[(my * modules + mx) as usize] == Color::Dark
            }
            _ => false,
        };
        if dark { Luma([0]) } else { Luma([255]) }
    });

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| OrderError::Render(e.to_string()))?;
    Ok(bytes)
}

/// Render `text` as a QR code PNG data URL
pub fn render_data_url(text: &str) -> Result<String, OrderError> {
    let png = render_png(text)?;
    Ok(format!("{DATA_URL_PREFIX}{}", STANDARD.encode(png)))
}
