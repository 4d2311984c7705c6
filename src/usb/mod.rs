//! USB device subsystem.
//!
//! The nRF52840's built-in USB 2.0 Full-Speed controller is driven by
//! `embassy-usb`. The device exposes no class interfaces at all - the
//! whole protocol rides on vendor-type control requests addressed to the
//! device, handled by [`vendor::VendorHandler`]:
//!
//! - IN requests (HELLO, PROPS) answer with banner/properties bytes.
//! - OUT requests (DATA, RESET, BYE) act on the session; DATA's data
//!   stage carries one raw frame for the panel.

pub mod device;
pub mod vendor;
