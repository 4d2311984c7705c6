//! SSD1306 OLED backend (the 0.96" 128x64 kind, I²C).
//!
//! 128x64 monochrome, vertical byte packing like the Nokia 5110. Every
//! I²C write is self-framing (start, address, control byte, payload,
//! stop), so pixel bytes go out as individual data transactions and
//! `frame_done` has no bus work left to do.

use embedded_hal::i2c::I2c;

use crate::display::{splash, Panel};
use crate::error::Error;
use crate::protocol::properties::PanelProperties;

/// OLED X resolution, i.e. display width, in pixels.
const X_RES: u16 = 128;
/// OLED Y resolution, i.e. display height, in pixels.
const Y_RES: u16 = 64;

/// One full frame of packed pixel bytes.
const FRAME_LEN: usize = (X_RES as usize) * (Y_RES as usize) / 8;

/// Splash content shown until the first host frame arrives.
static SPLASH: [u8; FRAME_LEN] = splash::test_card::<FRAME_LEN>(X_RES as usize);

/// OLED I²C address (7-bit, shifting is the HAL's business).
const ADDR: u8 = 0x3c;

/// Control byte: what follows are commands.
const CTRL_COMMAND: u8 = 0x00;
/// Control byte: what follows is display RAM data.
const CTRL_DATA: u8 = 0x40;

/// SSD1306 bring-up sequence, control byte included. Horizontal
/// addressing mode so the RAM pointer walks the full frame on its own.
const INIT_SEQUENCE: [u8; 29] = [
    CTRL_COMMAND,
    0xae, // display off (sleep mode)
    0x20, 0x00, // memory addressing mode: horizontal
    0xb0, // page start address 0
    0xc8, // COM output scan direction: remapped
    0x00, // low column address
    0x10, // high column address
    0x40, // start line address 0
    0x81, 0x3f, // contrast
    0xa1, // segment re-map: address 127 mapped
    0xa7, // inverse display mode
    0xa8, (Y_RES - 1) as u8, // multiplex ratio
    0xa4, // output follows RAM content
    0xd3, 0x00, // display offset 0
    0xd5, 0xf0, // clock divide ratio / oscillator frequency
    0xd9, 0x22, // pre-charge period
    0xda, 0x12, // COM pins hardware configuration
    0xdb, 0x20, // VCOMH deselect level
    0x8d, 0x14, // charge pump enable
    0xaf, // display on
];

/// Re-home the write window: page 0, columns 0..=127.
const FRAME_WINDOW: [u8; 5] = [CTRL_COMMAND, 0xb0, 0x21, 0x00, 0x7f];

/// SSD1306 OLED driver.
pub struct Ssd1306<I2C> {
    i2c: I2C,
    bus_faults: u16,
}

impl<I2C: I2c> Ssd1306<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c, bus_faults: 0 }
    }

    /// Faults seen on the bus since power-up. Diagnostics only; the
    /// session protocol has no way to report them.
    pub fn bus_faults(&self) -> u16 {
        self.bus_faults
    }

    fn fault(&mut self, e: Error) {
        self.bus_faults = self.bus_faults.saturating_add(1);
        defmt::warn!("ssd1306: bus fault {} (total {})", e, self.bus_faults);
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.i2c.write(ADDR, bytes).map_err(|_| Error::I2c)
    }

    fn try_init(&mut self) -> Result<(), Error> {
        self.write(&INIT_SEQUENCE)?;

        // Send splash screen.
        self.write(&FRAME_WINDOW)?;
        for &b in SPLASH.iter() {
            self.write(&[CTRL_DATA, b])?;
        }
        Ok(())
    }
}

impl<I2C: I2c> Panel for Ssd1306<I2C> {
    const PROPERTIES: PanelProperties = PanelProperties::new(X_RES, Y_RES, 1, "SSD1306 OLED");

    fn init(&mut self) {
        if let Err(e) = self.try_init() {
            self.fault(e);
        }
    }

    fn frame_start(&mut self) {
        if let Err(e) = self.write(&FRAME_WINDOW) {
            self.fault(e);
        }
    }

    fn send_byte(&mut self, b: u8) {
        if let Err(e) = self.write(&[CTRL_DATA, b]) {
            self.fault(e);
        }
    }

    fn frame_done(&mut self) {
        // Each data write carried its own stop condition; nothing is
        // left open on the bus.
    }
}
