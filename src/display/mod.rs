//! Display panel abstraction.
//!
//! Exactly one concrete backend is linked per build, selected by cargo
//! feature (`display-nokia5110`, `display-ssd1306` or `display-st7789`).
//! The protocol core drives whichever panel is linked purely through the
//! [`Panel`] trait and never interprets pixel semantics - the backend
//! alone defines how an incoming byte maps onto the glass.

pub mod splash;

#[cfg(all(feature = "display-nokia5110", feature = "display-ssd1306"))]
compile_error!("select exactly one display-* backend feature");
#[cfg(all(feature = "display-nokia5110", feature = "display-st7789"))]
compile_error!("select exactly one display-* backend feature");
#[cfg(all(feature = "display-ssd1306", feature = "display-st7789"))]
compile_error!("select exactly one display-* backend feature");

#[cfg(all(feature = "embedded", feature = "display-nokia5110"))]
pub mod nokia5110;
#[cfg(all(feature = "embedded", feature = "display-ssd1306"))]
pub mod ssd1306;
#[cfg(all(feature = "embedded", feature = "display-st7789"))]
pub mod st7789;

use crate::protocol::properties::PanelProperties;

/// Capability set a display backend implements.
///
/// Bus-level failures stay inside the backend: every operation is
/// infallible at this boundary, and a backend that hits a missing ACK or
/// a stuck ready flag swallows it (keeping a fault count for
/// diagnostics). The session protocol has no channel to report them
/// anyway.
pub trait Panel {
    /// Geometry and identity, compiled into the backend.
    const PROPERTIES: PanelProperties;

    /// Bring the panel from power-on/unknown state to an addressable
    /// state and paint the default splash content. May block for
    /// panel-specific settle delays. Also the recovery path: the session
    /// layer re-runs this when a previous session died unclean.
    fn init(&mut self);

    /// Set the write-addressing window to the full frame and leave the
    /// bus ready for a sequential run of data bytes. Must be idempotent
    /// when called without an intervening [`Panel::frame_done`].
    fn frame_start(&mut self);

    /// Forward one byte of pixel payload to the glass, exactly as
    /// received.
    fn send_byte(&mut self, b: u8);

    /// Finalize the current write transaction on the bus. Must be safe
    /// to call when zero bytes were written.
    fn frame_done(&mut self);
}
