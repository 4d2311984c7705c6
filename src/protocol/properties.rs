//! Panel properties record as exposed to the host.
//!
//! Wire layout (little-endian, packed, 25 bytes):
//! ```text
//! Byte 0-1:  width in pixels (u16)
//! Byte 2-3:  height in pixels (u16)
//! Byte 4:    color bits
//! Byte 5-24: identifier string, NUL-padded to 20 bytes
//! ```
//! Hosts unpack this with `struct.unpack("= H H B 20s")`; the layout must
//! never be reordered or padded differently.

/// Length of the NUL-padded identifier field.
pub const NAME_LEN: usize = 20;

/// Encoded size of the record on the wire.
pub const WIRE_LEN: usize = 25;

/// Static description of the linked display panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelProperties {
    /// Panel width in pixels.
    pub width: u16,
    /// Panel height in pixels.
    pub height: u16,
    /// Number of color bits per pixel.
    pub color_bits: u8,
    /// Identifier string, NUL-padded.
    pub name: [u8; NAME_LEN],
}

impl PanelProperties {
    /// Build a record at compile time. `name` longer than the field is
    /// truncated to [`NAME_LEN`] bytes.
    pub const fn new(width: u16, height: u16, color_bits: u8, name: &str) -> Self {
        let src = name.as_bytes();
        let mut buf = [0u8; NAME_LEN];
        let mut i = 0;
        while i < src.len() && i < NAME_LEN {
            buf[i] = src[i];
            i += 1;
        }
        Self {
            width,
            height,
            color_bits,
            name: buf,
        }
    }

    /// Serialise into the fixed wire layout.
    pub fn encode(&self) -> [u8; WIRE_LEN] {
        let mut buf = [0u8; WIRE_LEN];
        buf[0..2].copy_from_slice(&self.width.to_le_bytes());
        buf[2..4].copy_from_slice(&self.height.to_le_bytes());
        buf[4] = self.color_bits;
        buf[5..].copy_from_slice(&self.name);
        buf
    }

    /// Identifier with the NUL padding stripped.
    pub fn name_str(&self) -> &str {
        let end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(NAME_LEN);
        core::str::from_utf8(&self.name[..end]).unwrap_or("")
    }

    /// Bytes in one full frame at this geometry (8 pixels per byte for
    /// the monochrome packing every current host uses).
    pub const fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize / 8
    }
}
