//! Screen header: title, icon and colours

use serde::{Deserialize, Serialize};

/// RGB565 display colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u16);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3))
    }

    pub const FG: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BG: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const GREY: Color = Color::rgb(0x9E, 0x9E, 0x9E);
    pub const RED: Color = Color::rgb(0xF4, 0x43, 0x36);
    pub const GREEN: Color = Color::rgb(0x4C, 0xAF, 0x50);
    pub const ORANGE_ICON: Color = Color::rgb(0xF8, 0x88, 0x00);
}

/// Header icons available in firmware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    #[default]
    Default,
    Receive,
    Wrong,
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub title: String,
    pub icon: Icon,
    pub icon_color: Color,
}

impl Header {
    pub fn new(title: impl Into<String>, icon: Icon, icon_color: Color) -> Self {
        Self {
            title: title.into(),
            icon,
            icon_color,
        }
    }

    pub fn warning() -> Self {
        Self::new("Warning", Icon::Wrong, Color::RED)
    }

    pub fn success() -> Self {
        Self::new("Success", Icon::Confirm, Color::GREEN)
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new("", Icon::Default, Color::ORANGE_ICON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb565() {
        assert_eq!(Color::FG, Color(0xFFFF));
        assert_eq!(Color::BG, Color(0x0000));
        assert_eq!(Color::rgb(0xFF, 0, 0), Color(0xF800));
        assert_eq!(Color::rgb(0, 0xFF, 0), Color(0x07E0));
        assert_eq!(Color::rgb(0, 0, 0xFF), Color(0x001F));
    }
}
