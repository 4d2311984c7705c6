//! Unified error type for usbxbm.
//!
//! We avoid `alloc` - all variants carry no data. The session protocol
//! has no error reply channel, so these never cross the wire: backend
//! bus helpers return them internally and the capability layer swallows
//! them into a fault counter.

/// Bus-level fault inside a display backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// SPI transfer failed.
    Spi,
    /// I²C transaction to the panel failed (missing ACK, bus stuck).
    I2c,
    /// A control pin (reset, chip select, data/command) refused to toggle.
    Pin,
}
