//! Vendor control-request handler - the USB face of the session
//! protocol.
//!
//! Every vendor request addressed to the device is ACKed, never
//! STALLed: an invalid or unknown request gets an empty reply and no
//! state change, which is the protocol's silent-rejection contract.

use defmt::{debug, info};
use embassy_usb::control::{InResponse, OutResponse, Recipient, Request, RequestType};
use embassy_usb::Handler;

use crate::display::Panel;
use crate::protocol::session::{Reply, Session};
use crate::protocol::transfer::TransferStatus;
use crate::protocol::Command;

/// Bridges USB control transfers to the [`Session`] state machine.
pub struct VendorHandler<P: Panel> {
    session: Session<P>,
}

impl<P: Panel> VendorHandler<P> {
    /// Wrap an initialized panel. Call once; the handler owns the
    /// session for the life of the device.
    pub fn new(panel: P) -> Self {
        Self {
            session: Session::new(panel),
        }
    }

    fn parse(req: &Request) -> Command {
        Command::parse(req.request, req.value, req.index, req.length)
    }

    fn is_ours(req: &Request) -> bool {
        req.request_type == RequestType::Vendor && req.recipient == Recipient::Device
    }
}

impl<P: Panel> Handler for VendorHandler<P> {
    fn control_out(&mut self, req: Request, data: &[u8]) -> Option<OutResponse> {
        if !Self::is_ours(&req) {
            return None;
        }

        let command = Self::parse(&req);
        match self.session.handle_command(command) {
            Reply::AcceptData => {
                // The control pipe stages the whole data stage at once,
                // so this one fragment completes the frame.
                if self.session.deliver(data) == TransferStatus::Complete {
                    debug!("usb: frame received ({} bytes)", data.len());
                }
            }
            _ => {
                if command == Command::Bye {
                    info!("usb: session closed");
                }
            }
        }
        Some(OutResponse::Accepted)
    }

    fn control_in<'a>(&'a mut self, req: Request, buf: &'a mut [u8]) -> Option<InResponse<'a>> {
        if !Self::is_ours(&req) {
            return None;
        }

        let command = Self::parse(&req);
        match self.session.handle_command(command) {
            Reply::Banner(banner) => {
                info!("usb: session opened");
                let n = banner.len().min(buf.len());
                buf[..n].copy_from_slice(&banner[..n]);
                Some(InResponse::Accepted(&buf[..n]))
            }
            Reply::Properties(record) => {
                let n = record.len().min(buf.len());
                buf[..n].copy_from_slice(&record[..n]);
                Some(InResponse::Accepted(&buf[..n]))
            }
            // A DATA request on the IN direction has no data stage to
            // read from; the host gets an empty reply.
            _ => Some(InResponse::Accepted(&[])),
        }
    }
}
