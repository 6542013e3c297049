//! Driver for the 2.13" V2 black/white e-paper panel (122x250, SSD1675-class
//! controller) over SPI.
//!
//! Built on the [`embedded-hal`](https://github.com/rust-embedded/embedded-hal)
//! 1.0 traits: an [`SpiDevice`](embedded_hal::spi::SpiDevice) that owns chip
//! select, two output pins (data/command, reset), one input pin (busy) and a
//! delay.
//!
//! ### Usage
//!
//! 1. pick a refresh protocol with [`Epd2in13::full_update`] (slow, clean) or,
//!    after that, [`Epd2in13::partial_update`] (fast, ghosts over time)
//! 1. draw into a [`Canvas`], preferably with
//!    [`embedded_graphics`](https://github.com/embedded-graphics/embedded-graphics)
//! 1. hand it to [`Epd2in13::print_image`], or blank the panel with
//!    [`Epd2in13::clear`]
//! 1. [`Epd2in13::sleep`] when done; only `full_update` wakes the panel again
//!
//! ```no_run
//! # use embedded_hal::{delay::DelayNs, digital::{InputPin, OutputPin}, spi::SpiDevice};
//! # fn run<SPI: SpiDevice, BSY: InputPin, DC: OutputPin, RST: OutputPin, D: DelayNs>(
//! #     spi: SPI, busy: BSY, dc: DC, rst: RST, delay: D,
//! # ) -> Result<(), epd2in13_v2::Error> {
//! use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, primitives::*};
//! use epd2in13_v2::{Canvas, Epd2in13};
//!
//! let mut epd = Epd2in13::new(spi, busy, dc, rst, delay);
//! epd.full_update()?;
//! epd.clear(0xFF)?;
//!
//! let mut canvas = Canvas::landscape();
//! Circle::new(Point::new(10, 10), 60)
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 3))
//!     .draw(&mut canvas)
//!     .ok();
//! epd.print_image(&canvas)?;
//! epd.sleep()?;
//! # Ok(())
//! # }
//! ```
#![deny(missing_docs)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

mod cmd;
pub mod config;
pub mod driver;
pub mod error;
mod flag;
pub mod geometry;
pub mod image;
mod interface;
pub mod lut;
pub mod packer;
pub mod pins;
pub mod state;

pub use config::Config;
pub use driver::Epd2in13;
pub use error::{DisplayError, Error};
pub use geometry::PanelGeometry;
pub use image::{Canvas, SourceImage};
pub use packer::{Orientation, PixelBuffer};
pub use pins::Pins;
pub use state::{DriverState, RefreshMode};

/// Display width, pixels horizontally
pub const WIDTH: u16 = 122;

/// Display height, pixels vertically
pub const HEIGHT: u16 = 250;

/// The one panel this driver supports
pub const GEOMETRY: PanelGeometry = PanelGeometry::new(WIDTH, HEIGHT);

/// Bytes per row in controller RAM
pub const LINE_WIDTH: usize = GEOMETRY.line_width();
