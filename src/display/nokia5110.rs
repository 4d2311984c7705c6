//! Nokia 5110 LCD backend (PCD8544 controller, SPI).
//!
//! 84x48 monochrome, vertical byte packing: one data byte covers 8
//! vertically stacked pixels, bytes advance across a bank of rows. The
//! controller is driven over SPI mode 0 with a manual chip-select and a
//! data/command line; CS stays asserted for the whole frame write, which
//! is why the bus handles live here and not behind an `SpiDevice`.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use crate::config;
use crate::display::{splash, Panel};
use crate::error::Error;
use crate::protocol::properties::PanelProperties;

/// LCD X resolution, i.e. display width, in pixels.
const X_RES: u16 = 84;
/// LCD Y resolution, i.e. display height, in pixels.
const Y_RES: u16 = 48;

/// One full frame of packed pixel bytes.
const FRAME_LEN: usize = (X_RES as usize) * (Y_RES as usize) / 8;

/// Splash content shown until the first host frame arrives.
static SPLASH: [u8; FRAME_LEN] = splash::test_card::<FRAME_LEN>(X_RES as usize);

/// PCD8544 bring-up sequence: extended instruction set, Vop, temperature
/// coefficient and bias, then back to basic mode with normal display.
const INIT_SEQUENCE: [u8; 7] = [
    0x21, // function set: H=1 (extended), display on, horizontal addressing
    0xc8, // set Vop register
    0x06, // set temperature coefficient
    0x12, // set bias system
    0x20, // function set: H=0, keep display / addressing as-is
    0x08, // display blank
    0x0c, // display normal mode
];

/// Home the address pointer: X=0, Y=0.
const HOME: [u8; 2] = [0x80, 0x40];

/// Nokia 5110 LCD driver.
pub struct Nokia5110<SPI, RST, CS, DC, D> {
    spi: SPI,
    rst: RST,
    cs: CS,
    dc: DC,
    delay: D,
    bus_faults: u16,
}

impl<SPI, RST, CS, DC, D> Nokia5110<SPI, RST, CS, DC, D>
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
        defmt::warn!("nokia5110: bus fault {} (total {})", e, self.bus_faults);
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.spi.write(bytes).map_err(|_| Error::Spi)
    }

    fn command_mode(&mut self) -> Result<(), Error> {
        self.dc.set_low().map_err(|_| Error::Pin)
    }

    fn data_mode(&mut self) -> Result<(), Error> {
        self.dc.set_high().map_err(|_| Error::Pin)
    }

    /// Hardware reset pulse.
    fn reset(&mut self) -> Result<(), Error> {
        self.rst.set_low().map_err(|_| Error::Pin)?;
        self.delay.delay_ms(config::PANEL_RESET_MS);
        self.rst.set_high().map_err(|_| Error::Pin)
    }

    fn try_init(&mut self) -> Result<(), Error> {
        self.reset()?;

        self.cs.set_low().map_err(|_| Error::Pin)?;
        self.command_mode()?;
        self.write(&INIT_SEQUENCE)?;

        // Send splash screen.
        self.write(&HOME)?;
        self.data_mode()?;
        self.write(&SPLASH)?;

        self.spi.flush().map_err(|_| Error::Spi)?;
        self.cs.set_high().map_err(|_| Error::Pin)
    }

    fn try_frame_start(&mut self) -> Result<(), Error> {
        self.cs.set_low().map_err(|_| Error::Pin)?;
        self.command_mode()?;
        self.write(&HOME)?;
        self.data_mode()
    }

    fn try_frame_done(&mut self) -> Result<(), Error> {
        self.spi.flush().map_err(|_| Error::Spi)?;
        self.cs.set_high().map_err(|_| Error::Pin)
    }
}

impl<SPI, RST, CS, DC, D> Panel for Nokia5110<SPI, RST, CS, DC, D>
where
    SPI: SpiBus<u8>,
    RST: OutputPin,
    CS: OutputPin,
    DC: OutputPin,
    D: DelayNs,
{
    const PROPERTIES: PanelProperties = PanelProperties::new(X_RES, Y_RES, 1, "Nokia 5110");

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
        if let Err(e) = self.write(&[b]) {
            self.fault(e);
        }
    }

    fn frame_done(&mut self) {
        if let Err(e) = self.try_frame_done() {
            self.fault(e);
        }
    }
}
