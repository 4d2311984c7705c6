//! usbxbm - stream bitmap frames to a small display over USB.
//!
//! The crate splits along the hardware boundary:
//!
//! - The protocol core ([`protocol`]) and the panel capability trait
//!   ([`display`]) are pure `no_std` logic: they compile and test on the
//!   host with plain `cargo test`, no embedded toolchain required.
//! - Everything that touches the nRF52840 - the USB stack glue in
//!   `usb`, the concrete panel backends, `main.rs` - sits behind the
//!   `embedded` feature and one `display-*` backend feature.
//!
//! The protocol itself is deliberately small: HELLO opens a session and
//! returns an identity banner, PROPS reports the panel geometry, DATA
//! streams one raw frame which is forwarded byte-for-byte to the panel,
//! RESET restores the splash, BYE closes the session. Invalid requests
//! are silently ignored - the link has no error reply channel.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod display;
pub mod error;
pub mod protocol;

#[cfg(all(
    feature = "embedded",
    any(
        feature = "display-nokia5110",
        feature = "display-ssd1306",
        feature = "display-st7789"
    )
))]
pub mod usb;
