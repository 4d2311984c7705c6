//! Application-wide constants and compile-time configuration.
//!
//! All USB identity values, buffer sizing, and hardware pin assignments
//! live here so they can be tuned in one place.

// USB

/// USB VID/PID - the "pid.codes" open-source VID with the usbxbm PID.
/// The host-side application matches on this pair before speaking the
/// protocol.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0xb00b;

/// USB device strings. The host additionally checks the serial number,
/// so it must stay `usbxbm`.
pub const USB_MANUFACTURER: &str = "CrapLab";
pub const USB_PRODUCT: &str = "usbxbm";
pub const USB_SERIAL_NUMBER: &str = "usbxbm";

/// Maximum current drawn from the bus (mA).
pub const USB_MAX_POWER_MA: u16 = 100;

/// Control-transfer buffer size. A DATA request's whole data stage is
/// staged here before it reaches the frame receiver, so this must hold
/// one full frame of the linked panel.
#[cfg(feature = "display-st7789")]
pub const CTRL_BUF_LEN: usize = 7200; // 240 x 240 / 8
#[cfg(feature = "display-ssd1306")]
pub const CTRL_BUF_LEN: usize = 1024; // 128 x 64 / 8
#[cfg(feature = "display-nokia5110")]
pub const CTRL_BUF_LEN: usize = 512; // 84 x 48 / 8, rounded up

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types
// are selected in `main.rs`.  Adjust for your custom PCB.
//
//   SPI SCK        → P0.03
//   SPI MOSI       → P0.04
//   LCD RESET      → P0.28
//   LCD CS         → P0.29
//   LCD D/C        → P0.30
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

/// Panel reset pulse width (ms).
pub const PANEL_RESET_MS: u32 = 50;
