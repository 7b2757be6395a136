//! QR code placement for address confirmation

use serde::Serialize;

/// Addresses at least this long get the smaller module scale
pub const QR_SIZE_THRESHOLD: usize = 63;
/// Module scale for addresses shorter than [`QR_SIZE_THRESHOLD`]
pub const QR_SCALE_SHORT: u8 = 4;
/// Module scale for addresses of [`QR_SIZE_THRESHOLD`] characters or more
pub const QR_SCALE_LONG: u8 = 3;

/// QR centre on the default display
pub const QR_X: u32 = 120;
pub const QR_Y: u32 = 115;

/// Pixel scale of one QR module for an address of `address_len` characters.
///
/// Longer data needs more modules, so each one is drawn smaller to keep the
/// code on screen.
pub fn qr_coefficient(address_len: usize) -> u8 {
    if address_len < QR_SIZE_THRESHOLD {
        QR_SCALE_SHORT
    } else {
        QR_SCALE_LONG
    }
}

/// Where and how large the QR code is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QrPlacement {
    pub x: u32,
    pub y: u32,
    pub scale: u8,
}

impl QrPlacement {
    pub fn for_address(address: &str) -> Self {
        Self {
            x: QR_X,
            y: QR_Y,
            scale: qr_coefficient(address.chars().count()),
        }
    }
}
