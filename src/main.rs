//! usbxbm firmware entry point.
//!
//! Brings up the linked display panel (splash first, so the device is
//! visibly alive before any host shows up), then hands the USB
//! peripheral to the vendor-request handler and services it forever.
//! Everything runs in the one main task; the protocol has no second
//! writer by construction.

#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use panic_probe as _;

use embassy_executor::Spawner;
use embassy_nrf::peripherals;
use static_cell::StaticCell;

#[cfg(any(feature = "display-nokia5110", feature = "display-st7789"))]
use embassy_time::Delay;

use usbxbm::display::Panel;
use usbxbm::usb::device;
use usbxbm::usb::vendor::VendorHandler;

#[cfg(any(feature = "display-nokia5110", feature = "display-st7789"))]
use embassy_nrf::{
    bind_interrupts,
    gpio::{Level, Output, OutputDrive},
    spim,
};

#[cfg(feature = "display-ssd1306")]
use embassy_nrf::{bind_interrupts, twim};

#[cfg(any(feature = "display-nokia5110", feature = "display-st7789"))]
bind_interrupts!(struct BusIrqs {
    SPIM3 => spim::InterruptHandler<peripherals::SPI3>;
});

#[cfg(feature = "display-ssd1306")]
bind_interrupts!(struct BusIrqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

#[cfg(feature = "display-nokia5110")]
type ActivePanel = usbxbm::display::nokia5110::Nokia5110<
    spim::Spim<'static, peripherals::SPI3>,
    Output<'static>,
    Output<'static>,
    Output<'static>,
    Delay,
>;

#[cfg(feature = "display-ssd1306")]
type ActivePanel = usbxbm::display::ssd1306::Ssd1306<twim::Twim<'static, peripherals::TWISPI0>>;

#[cfg(feature = "display-st7789")]
type ActivePanel = usbxbm::display::st7789::St7789<
    spim::Spim<'static, peripherals::SPI3>,
    Output<'static>,
    Output<'static>,
    Output<'static>,
    Delay,
>;

static HANDLER: StaticCell<VendorHandler<ActivePanel>> = StaticCell::new();

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());

    info!("usbxbm starting");

    #[cfg(feature = "display-nokia5110")]
    let mut panel: ActivePanel = {
        let mut bus_config = spim::Config::default();
        bus_config.frequency = spim::Frequency::M4;
        let spi = spim::Spim::new_txonly(p.SPI3, BusIrqs, p.P0_03, p.P0_04, bus_config);
        let rst = Output::new(p.P0_28, Level::High, OutputDrive::Standard);
        let cs = Output::new(p.P0_29, Level::High, OutputDrive::Standard);
        let dc = Output::new(p.P0_30, Level::Low, OutputDrive::Standard);
        usbxbm::display::nokia5110::Nokia5110::new(spi, rst, cs, dc, Delay)
    };

    #[cfg(feature = "display-ssd1306")]
    let mut panel: ActivePanel = {
        let mut bus_config = twim::Config::default();
        bus_config.frequency = twim::Frequency::K400;
        let i2c = twim::Twim::new(p.TWISPI0, BusIrqs, p.P0_26, p.P0_27, bus_config);
        usbxbm::display::ssd1306::Ssd1306::new(i2c)
    };

    #[cfg(feature = "display-st7789")]
    let mut panel: ActivePanel = {
        let mut bus_config = spim::Config::default();
        bus_config.frequency = spim::Frequency::M8;
        let spi = spim::Spim::new_txonly(p.SPI3, BusIrqs, p.P0_03, p.P0_04, bus_config);
        let rst = Output::new(p.P0_28, Level::High, OutputDrive::Standard);
        let cs = Output::new(p.P0_29, Level::High, OutputDrive::Standard);
        let dc = Output::new(p.P0_30, Level::Low, OutputDrive::Standard);
        usbxbm::display::st7789::St7789::new(spi, rst, cs, dc, Delay)
    };

    // Panel first: splash content must be up before enumeration makes
    // the device discoverable.
    panel.init();
    info!(
        "panel ready: {} ({}x{})",
        ActivePanel::PROPERTIES.name_str(),
        ActivePanel::PROPERTIES.width,
        ActivePanel::PROPERTIES.height
    );

    let handler = HANDLER.init(VendorHandler::new(panel));
    let usb = device::init(p.USBD, handler);

    // Poll USB forever.
    device::run(usb).await
}
