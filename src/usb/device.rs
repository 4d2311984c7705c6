//! USB device bring-up.
//!
//! Initialises the Embassy USB stack on the nRF52840 hardware USB
//! peripheral. There are no class functions; the vendor handler
//! registered by `main` services the whole protocol.

use crate::config;
use defmt::info;
use embassy_nrf::usb::vbus_detect::HardwareVbusDetect;
use embassy_nrf::usb::Driver;
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_usb::{Builder, Config, Handler, UsbDevice};
use static_cell::StaticCell;

bind_interrupts!(struct Irqs {
    USBD => embassy_nrf::usb::InterruptHandler<peripherals::USBD>;
    CLOCK_POWER => embassy_nrf::usb::vbus_detect::InterruptHandler;
});

/// The concrete USB driver type for this board.
pub type UsbDriver = Driver<'static, peripherals::USBD, HardwareVbusDetect>;

static USB_CONFIG_DESC: StaticCell<[u8; 64]> = StaticCell::new();
static USB_BOS_DESC: StaticCell<[u8; 64]> = StaticCell::new();
static USB_MSOS_DESC: StaticCell<[u8; 64]> = StaticCell::new();
static USB_CTRL_BUF: StaticCell<[u8; config::CTRL_BUF_LEN]> = StaticCell::new();

/// Initialise the USB stack and create the device.
///
/// Must be called exactly once.  All static buffers are consumed here.
/// `handler` services the vendor control requests; it must outlive the
/// device, hence `'static`.
pub fn init(
    usbd: peripherals::USBD,
    handler: &'static mut dyn Handler,
) -> UsbDevice<'static, UsbDriver> {
    // Create the low-level USB driver with hardware VBUS detection.
    let driver = Driver::new(usbd, Irqs, HardwareVbusDetect::new(Irqs));

    // USB device-level configuration.
    let mut usb_config = Config::new(config::USB_VID, config::USB_PID);
    usb_config.manufacturer = Some(config::USB_MANUFACTURER);
    usb_config.product = Some(config::USB_PRODUCT);
    usb_config.serial_number = Some(config::USB_SERIAL_NUMBER);
    usb_config.max_power = config::USB_MAX_POWER_MA;
    usb_config.max_packet_size_0 = 64;

    // Allocate static descriptor buffers. The control buffer must hold
    // a whole frame's data stage (see `config::CTRL_BUF_LEN`).
    let config_desc = USB_CONFIG_DESC.init([0u8; 64]);
    let bos_desc = USB_BOS_DESC.init([0u8; 64]);
    let msos_desc = USB_MSOS_DESC.init([0u8; 64]);
    let ctrl_buf = USB_CTRL_BUF.init([0u8; config::CTRL_BUF_LEN]);

    // Build the USB device.
    let mut builder = Builder::new(
        driver,
        usb_config,
        config_desc,
        bos_desc,
        msos_desc,
        ctrl_buf,
    );

    builder.handler(handler);

    let device = builder.build();

    info!("USB device initialised");

    device
}

/// Run the USB device stack - must be spawned as a dedicated Embassy
/// task (or awaited as the main task's only job).
///
/// This handles enumeration, suspend/resume, and control servicing.
pub async fn run(mut device: UsbDevice<'static, UsbDriver>) -> ! {
    info!("USB device task started");
    device.run().await
}
