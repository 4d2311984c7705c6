//! ST7789 IPS LCD backend (240x240, SPI, 16-bit color).
//!
//! The host still sends packed monochrome bytes; this backend expands
//! each incoming bit, LSB first, into one RGB565 pixel (two bus bytes):
//! all-ones for a set bit, all-zeros for a clear one. The advertised
//! `color_bits` stays 1 so the host keeps producing the packing the
//! expansion expects.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::display::Panel;
use crate::error::Error;
use crate::protocol::properties::PanelProperties;

/// LCD X resolution, i.e. display width, in pixels.
const X_RES: u16 = 240;
/// LCD Y resolution, i.e. display height, in pixels.
const Y_RES: u16 = 240;

/// The 240x240 glass sits at a 80-row offset in the controller's
/// 240x320 RAM.
const ROW_OFFSET: u16 = 80;

// ST77xx command set (the subset this backend uses).
const SWRESET: u8 = 0x01;
const SLPOUT: u8 = 0x11;
const NORON: u8 = 0x13;
const INVON: u8 = 0x21;
const DISPON: u8 = 0x29;
const CASET: u8 = 0x2a;
const RASET: u8 = 0x2b;
const RAMWR: u8 = 0x2c;
const MADCTL: u8 = 0x36;
const COLMOD: u8 = 0x3a;

/// ST7789 IPS LCD driver.
pub struct St7789<SPI, RST, CS, DC, D> {
    spi: SPI,
    rst: RST,
    cs: CS,
    dc: DC,
    delay: D,
    bus_faults: u16,
}

impl<SPI, RST, CS, DC, D> St7789<SPI, RST, CS, DC, D>
where
    SPI: SpiBus<u8>,
    RST: OutputPin,
    CS: OutputPin,
    DC: OutputPin,
    D: DelayNs,
{
    pub fn new(spi: SPI, rst: RST, cs: CS, dc: DC, delay: D) -> Self {
        Self {
            spi,
            rst,
            cs,
            dc,
            delay,
            bus_faults: 0,
        }
    }

    /// Faults seen on the bus since power-up. Diagnostics only; the
    /// session protocol has no way to report them.
    pub fn bus_faults(&self) -> u16 {
        self.bus_faults
    }

    fn fault(&mut self, e: Error) {
        self.bus_faults = self.bus_faults.saturating_add(1);
        defmt::warn!("st7789: bus fault {} (total {})", e, self.bus_faults);
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.spi.write(bytes).map_err(|_| Error::Spi)
    }

    /// Send one command byte plus its parameters.
    fn command(&mut self, cmd: u8, params: &[u8]) -> Result<(), Error> {
        self.dc.set_low().map_err(|_| Error::Pin)?;
        self.write(&[cmd])?;
        if !params.is_empty() {
            self.dc.set_high().map_err(|_| Error::Pin)?;
            self.write(params)?;
        }
        Ok(())
    }

    /// Hardware reset pulse. The ST7789 needs only a short one.
    fn reset(&mut self) -> Result<(), Error> {
        self.rst.set_low().map_err(|_| Error::Pin)?;
        self.delay.delay_ms(10);
        self.rst.set_high().map_err(|_| Error::Pin)
    }

    fn try_init(&mut self) -> Result<(), Error> {
        self.reset()?;
        self.cs.set_low().map_err(|_| Error::Pin)?;

        self.command(SWRESET, &[])?;
        self.delay.delay_ms(150);
        self.command(SLPOUT, &[])?;
        self.delay.delay_ms(10);

        self.command(COLMOD, &[0x55])?; // 16-bit color
        self.command(MADCTL, &[0x08])?; // BGR order
        self.command(INVON, &[])?;
        self.command(NORON, &[])?;
        self.command(MADCTL, &[0xc0])?; // rotation arrangements (MX | MY)

        // Paint a column-gradient pattern so the panel is visibly alive
        // before the first host frame, then switch the display on.
        self.try_frame_start()?;
        for _row in 0..Y_RES {
            for col in 0..X_RES {
                self.write(&[0x00, col as u8])?;
            }
        }
        self.command(DISPON, &[])?;

        self.spi.flush().map_err(|_| Error::Spi)?;
        self.cs.set_high().map_err(|_| Error::Pin)
    }

    fn try_frame_start(&mut self) -> Result<(), Error> {
        self.cs.set_low().map_err(|_| Error::Pin)?;

        // Full-frame write window, rows shifted by the panel offset.
        let last_col = X_RES - 1;
        let last_row = ROW_OFFSET + Y_RES - 1;
        self.command(
            CASET,
            &[0x00, 0x00, (last_col >> 8) as u8, (last_col & 0xff) as u8],
        )?;
        self.command(
            RASET,
            &[
                (ROW_OFFSET >> 8) as u8,
                (ROW_OFFSET & 0xff) as u8,
                (last_row >> 8) as u8,
                (last_row & 0xff) as u8,
            ],
        )?;

        // Initiate memory write; everything after this is pixel data.
        self.command(RAMWR, &[])?;
        self.dc.set_high().map_err(|_| Error::Pin)
    }

    fn try_send_byte(&mut self, b: u8) -> Result<(), Error> {
        for i in 0..8 {
            if (b >> i) & 0x01 != 0 {
                self.write(&[0xff, 0xff])?;
            } else {
                self.write(&[0x00, 0x00])?;
            }
        }
        Ok(())
    }

    fn try_frame_done(&mut self) -> Result<(), Error> {
        self.spi.flush().map_err(|_| Error::Spi)?;
        self.cs.set_high().map_err(|_| Error::Pin)
    }
}

impl<SPI, RST, CS, DC, D> Panel for St7789<SPI, RST, CS, DC, D>
where
    SPI: SpiBus<u8>,
    RST: OutputPin,
    CS: OutputPin,
    DC: OutputPin,
    D: DelayNs,
{
    const PROPERTIES: PanelProperties = PanelProperties::new(X_RES, Y_RES, 1, "ST7789 IPS");

    fn init(&mut self) {
        if let Err(e) = self.try_init() {
            self.fault(e);
        }
    }

    fn frame_start(&mut self) {
        if let Err(e) = self.try_frame_start() {
            self.fault(e);
        }
    }

    fn send_byte(&mut self, b: u8) {
        if let Err(e) = self.try_send_byte(b) {
            self.fault(e);
        }
    }

    fn frame_done(&mut self) {
        if let Err(e) = self.try_frame_done() {
            self.fault(e);
        }
    }
}
