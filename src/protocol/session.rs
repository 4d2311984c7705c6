//! Session state machine.
//!
//! Owns the Idle/Ready lifecycle, the frame receiver and the linked
//! panel; every state mutation in the device flows through
//! [`Session::handle_command`] or [`Session::deliver`], both called from
//! the single transport execution context. There is no second writer.

use crate::display::Panel;
use crate::protocol::properties::{self, PanelProperties};
use crate::protocol::transfer::{FrameTransfer, TransferStatus};
use crate::protocol::{Command, BANNER, HELLO_INDEX, HELLO_VALUE};

/// Connection lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Waiting for a new connection.
    Idle,
    /// Session established, ready to receive image data.
    Ready,
}

/// Reply to a single control request.
///
/// There is deliberately no error variant: a request that fails its
/// precondition is answered with [`Reply::Empty`], indistinguishable
/// from an unknown request. The host tracks session state itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// The identity banner, fixed size.
    Banner(&'static [u8]),
    /// The encoded panel properties record.
    Properties([u8; properties::WIRE_LEN]),
    /// A data stage of the declared length follows this request.
    AcceptData,
    /// Empty response - also the silent rejection path.
    Empty,
}

/// The device-side protocol endpoint: state machine plus the one linked
/// panel.
pub struct Session<P: Panel> {
    state: SessionState,
    transfer: FrameTransfer,
    panel: P,
}

impl<P: Panel> Session<P> {
    /// Wrap an already-initialized panel. The session starts in Idle, as
    /// after device power-up.
    pub fn new(panel: P) -> Self {
        Self {
            state: SessionState::Idle,
            transfer: FrameTransfer::idle(),
            panel,
        }
    }

    /// Handle one parsed control request.
    pub fn handle_command(&mut self, command: Command) -> Reply {
        match command {
            Command::Hello { value, index } => {
                if value != HELLO_VALUE || index != HELLO_INDEX {
                    return Reply::Empty;
                }

                // Not Idle means a previous session died without a
                // proper BYE; re-initialize the panel before answering.
                if self.state != SessionState::Idle {
                    self.panel.init();
                }

                self.state = SessionState::Ready;
                Reply::Banner(BANNER)
            }

            Command::QueryProperties => {
                if self.state != SessionState::Ready {
                    return Reply::Empty;
                }
                Reply::Properties(P::PROPERTIES.encode())
            }

            Command::Data { length } => {
                if self.state != SessionState::Ready {
                    return Reply::Empty;
                }

                self.transfer.begin(length);
                self.panel.frame_start();
                // A zero-length frame has no data stage to wait for; it
                // completes on the spot.
                self.transfer.deliver(&mut self.panel, &[]);
                Reply::AcceptData
            }

            Command::Reset => {
                if self.state == SessionState::Ready {
                    self.panel.init();
                }
                Reply::Empty
            }

            Command::Bye => {
                self.state = SessionState::Idle;
                Reply::Empty
            }

            Command::Unknown => Reply::Empty,
        }
    }

    /// Feed one fragment of a DATA request's data stage to the frame
    /// receiver.
    pub fn deliver(&mut self, fragment: &[u8]) -> TransferStatus {
        self.transfer.deliver(&mut self.panel, fragment)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Properties of the linked panel.
    pub fn properties(&self) -> PanelProperties {
        P::PROPERTIES
    }

    #[cfg(test)]
    pub(crate) fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }
}
