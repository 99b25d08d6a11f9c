//! Accent colors

use notiwatch_core::ConnectionStatus;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb(pub u32);

impl Rgb {
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    /// Pack as RGB565 for SPI panels
    pub const fn to_rgb565(self) -> u16 {
        ((self.r() as u16 & 0xF8) << 8) | ((self.g() as u16 & 0xFC) << 3) | (self.b() as u16 >> 3)
    }
}

pub const GREEN: Rgb = Rgb(0x00FF00);
pub const YELLOW: Rgb = Rgb(0xFFFF00);
pub const BLUE: Rgb = Rgb(0x0096FF);
pub const RED: Rgb = Rgb(0xFF0000);

/// Icon color for unknown apps and the empty screen
pub const DEFAULT_APP_COLOR: Rgb = Rgb(0x666666);

pub fn status_color(status: ConnectionStatus) -> Rgb {
    match status {
        ConnectionStatus::Connected => GREEN,
        ConnectionStatus::WeakSignal => YELLOW,
        ConnectionStatus::Connecting => BLUE,
        ConnectionStatus::Disconnected => RED,
    }
}

/// Brand color for well-known apps, matched on the exact app name
pub fn app_color(app_name: &str) -> Rgb {
    match app_name {
        "WhatsApp" => Rgb(0x25D366),
        "Gmail" => Rgb(0xFF0000),
        "Messages" => Rgb(0x34C759),
        "Discord" => Rgb(0x9146FF),
        "Telegram" => Rgb(0x0088CC),
        _ => DEFAULT_APP_COLOR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color(ConnectionStatus::Connected), Rgb(0x00FF00));
        assert_eq!(status_color(ConnectionStatus::WeakSignal), Rgb(0xFFFF00));
        assert_eq!(status_color(ConnectionStatus::Connecting), Rgb(0x0096FF));
        assert_eq!(status_color(ConnectionStatus::Disconnected), Rgb(0xFF0000));
    }

    #[test]
    fn test_app_colors() {
        assert_eq!(app_color("WhatsApp"), Rgb(0x25D366));
        assert_eq!(app_color("Telegram"), Rgb(0x0088CC));
        // Exact match only
        assert_eq!(app_color("whatsapp"), DEFAULT_APP_COLOR);
        assert_eq!(app_color(""), DEFAULT_APP_COLOR);
    }

    #[test]
    fn test_channels() {
        let c = Rgb(0x0096FF);
        assert_eq!((c.r(), c.g(), c.b()), (0x00, 0x96, 0xFF));
        assert_eq!(RED.to_rgb565(), 0xF800);
        assert_eq!(GREEN.to_rgb565(), 0x07E0);
    }
}
