//! Integration tests for the usbxbm session protocol.
//!
//! Drives a full host session - open, query, stream frames, close -
//! against the state machine with a logging panel standing in for the
//! glass, the way the transport layer drives it on the device.

use std::cell::RefCell;
use std::rc::Rc;

use usbxbm::display::Panel;
use usbxbm::protocol::properties::PanelProperties;
use usbxbm::protocol::session::{Reply, Session};
use usbxbm::protocol::transfer::TransferStatus;
use usbxbm::protocol::{Command, BANNER, BYE, DATA, HELLO, HELLO_INDEX, HELLO_VALUE, PROPS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Event {
    Init,
    FrameStart,
    Byte(u8),
    FrameDone,
}

/// Event log shared between the test and the panel it hands out.
#[derive(Clone, Default)]
struct Log(Rc<RefCell<Vec<Event>>>);

impl Log {
    fn panel(&self) -> LoggingPanel {
        LoggingPanel { log: self.clone() }
    }

    fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    fn count(&self, probe: fn(&Event) -> bool) -> usize {
        self.0.borrow().iter().filter(|e| probe(e)).count()
    }

    fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

struct LoggingPanel {
    log: Log,
}

impl Panel for LoggingPanel {
    const PROPERTIES: PanelProperties = PanelProperties::new(84, 48, 1, "Nokia 5110");

    fn init(&mut self) {
        self.log.0.borrow_mut().push(Event::Init);
    }

    fn frame_start(&mut self) {
        self.log.0.borrow_mut().push(Event::FrameStart);
    }

    fn send_byte(&mut self, b: u8) {
        self.log.0.borrow_mut().push(Event::Byte(b));
    }

    fn frame_done(&mut self) {
        self.log.0.borrow_mut().push(Event::FrameDone);
    }
}

fn hello(session: &mut Session<LoggingPanel>) -> Reply {
    session.handle_command(Command::parse(HELLO, HELLO_VALUE, HELLO_INDEX, 0))
}

#[test]
fn full_session_scenario() {
    let log = Log::default();
    let mut session = Session::new(log.panel());

    // HELLO with the magic pair answers with the identity banner.
    assert_eq!(hello(&mut session), Reply::Banner(BANNER));
    assert_eq!(BANNER, b"RUDY usbxbm 1.0\0");

    // PROPS reports the panel geometry, bit-exact.
    let reply = session.handle_command(Command::parse(PROPS, 0, 0, 0));
    let Reply::Properties(wire) = reply else {
        panic!("expected properties record, got {reply:?}");
    };
    assert_eq!(u16::from_le_bytes([wire[0], wire[1]]), 84);
    assert_eq!(u16::from_le_bytes([wire[2], wire[3]]), 48);
    assert_eq!(wire[4], 1);
    assert_eq!(&wire[5..15], b"Nokia 5110");

    // One full frame, delivered in 63 chunks of 8 bytes - the transfer
    // granularity of a low-speed control pipe.
    let frame: Vec<u8> = (0..504u16).map(|i| i as u8).collect();
    assert_eq!(
        session.handle_command(Command::parse(DATA, 0, 0, 504)),
        Reply::AcceptData
    );
    for (i, chunk) in frame.chunks(8).enumerate() {
        let status = session.deliver(chunk);
        if i < 62 {
            assert_eq!(status, TransferStatus::NeedMore);
        } else {
            assert_eq!(status, TransferStatus::Complete);
        }
    }

    // Exactly 504 pixel-byte writes, in order, then one frame_done.
    let events = log.events();
    assert_eq!(log.count(|e| matches!(e, Event::Byte(_))), 504);
    assert_eq!(log.count(|e| matches!(e, Event::FrameDone)), 1);
    assert_eq!(events.last(), Some(&Event::FrameDone));
    assert_eq!(events[0], Event::FrameStart);
    assert_eq!(events[1], Event::Byte(0));

    // BYE ends the session: properties go silent until the next HELLO.
    session.handle_command(Command::parse(BYE, 0, 0, 0));
    assert_eq!(
        session.handle_command(Command::parse(PROPS, 0, 0, 0)),
        Reply::Empty
    );
}

#[test]
fn successive_frames_reuse_the_session() {
    let log = Log::default();
    let mut session = Session::new(log.panel());
    hello(&mut session);

    for _ in 0..3 {
        session.handle_command(Command::parse(DATA, 0, 0, 504));
        for chunk in vec![0x5a; 504].chunks(64) {
            session.deliver(chunk);
        }
    }

    assert_eq!(log.count(|e| matches!(e, Event::Byte(_))), 3 * 504);
    assert_eq!(log.count(|e| matches!(e, Event::FrameStart)), 3);
    assert_eq!(log.count(|e| matches!(e, Event::FrameDone)), 3);
}

#[test]
fn dead_session_recovery_on_second_hello() {
    let log = Log::default();
    let mut session = Session::new(log.panel());

    // Host opens a session and dies mid-frame (no BYE).
    hello(&mut session);
    session.handle_command(Command::parse(DATA, 0, 0, 504));
    session.deliver(&[0u8; 100]);

    log.clear();

    // The next HELLO re-initializes the panel before acknowledging, so
    // the abandoned frame cannot leave stale addressing state behind.
    assert_eq!(hello(&mut session), Reply::Banner(BANNER));
    assert_eq!(log.events().first(), Some(&Event::Init));

    // And the revived session streams a frame normally.
    session.handle_command(Command::parse(DATA, 0, 0, 4));
    assert_eq!(session.deliver(&[1, 2, 3, 4]), TransferStatus::Complete);
    assert_eq!(log.count(|e| matches!(e, Event::FrameDone)), 1);
}
