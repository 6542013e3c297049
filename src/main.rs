use anyhow::{anyhow, Context};
use clap::{Arg, ArgAction, Command};
use env_logger::Env;
use log::info;

use embedded_graphics::mono_font::iso_8859_15::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;

use linux_embedded_hal::gpio_cdev::{Chip, LineRequestFlags};
use linux_embedded_hal::spidev::{SpiModeFlags, SpidevOptions};
use linux_embedded_hal::{CdevPin, Delay, SpidevDevice};

use epd2in13_v2::{Canvas, Config, Epd2in13, Pins};

/// Request one GPIO line and wrap it as an embedded-hal pin
fn request_pin(
    chip: &mut Chip,
    offset: u32,
    flags: LineRequestFlags,
    label: &str,
) -> anyhow::Result<CdevPin> {
    let handle = chip
        .get_line(offset)
        .with_context(|| format!("GPIO line {offset} ({label})"))?
        .request(flags, 0, label)
        .with_context(|| format!("requesting GPIO line {offset} ({label})"))?;
    CdevPin::new(handle).map_err(|e| anyhow!("GPIO line {offset} ({label}): {e:?}"))
}

/// Landscape banner: frame, title, subtitle
fn draw_banner(canvas: &mut Canvas, title: &str, subtitle: &str) {
    let large = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
    let small = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

    let _ = Rectangle::new(Point::new(2, 2), canvas.size() - Size::new(4, 4))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 2))
        .draw(canvas);
    let _ = Text::new(title, Point::new(12, 40), large).draw(canvas);
    let _ = Text::new(subtitle, Point::new(12, 70), small).draw(canvas);
}

fn main() -> anyhow::Result<()> {
    let matches = Command::new(env!("CARGO_BIN_NAME"))
        .about("Draw a banner on a 2.13\" V2 e-paper panel")
        .arg(
            Arg::new("spi")
                .long("spi")
                .help("SPI device")
                .default_value(Pins::SPI_DEVICE),
        )
        .arg(
            Arg::new("gpiochip")
                .long("gpiochip")
                .help("GPIO character device")
                .default_value(Pins::GPIO_CHIP),
        )
        .arg(
            Arg::new("rst")
                .long("rst")
                .help("Reset line offset")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("dc")
                .long("dc")
                .help("Data/command line offset")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("busy")
                .long("busy")
                .help("Busy line offset")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("busy-timeout")
                .long("busy-timeout")
                .help("Give up on the busy line after this many milliseconds")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("text")
                .short('t')
                .long("text")
                .help("Banner title")
                .default_value("Hello, e-paper"),
        )
        .arg(
            Arg::new("partial")
                .short('p')
                .long("partial")
                .help("Number of partial refreshes to run after the banner")
                .value_parser(clap::value_parser!(u32))
                .default_value("0"),
        )
        .arg(
            Arg::new("debug")
                .short('d')
                .long("debug")
                .help("Debug logging")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    let debug_enabled = matches.get_flag("debug");
    env_logger::Builder::from_env(Env::default().default_filter_or(if debug_enabled {
        "debug"
    } else {
        "info"
    }))
    .format_timestamp_secs()
    .init();

    let spi_path = matches.get_one::<String>("spi").context("missing --spi")?;
    let chip_path = matches
        .get_one::<String>("gpiochip")
        .context("missing --gpiochip")?;
    let arg = |name: &str, fallback: u32| -> u32 {
        matches.get_one::<u32>(name).copied().unwrap_or(fallback)
    };
    let title = matches.get_one::<String>("text").context("missing --text")?;
    let partial_rounds = arg("partial", 0);

    info!("Opening {} at {} Hz", spi_path, Pins::SPI_HZ);
    let mut spi =
        SpidevDevice::open(spi_path).map_err(|e| anyhow!("opening {spi_path}: {e:?}"))?;
    let options = SpidevOptions::new()
        .bits_per_word(8)
        .max_speed_hz(Pins::SPI_HZ)
        .mode(SpiModeFlags::SPI_MODE_0)
        .build();
    spi.0
        .configure(&options)
        .with_context(|| format!("configuring {spi_path}"))?;

    let mut chip = Chip::new(chip_path).with_context(|| format!("opening {chip_path}"))?;
    let rst = request_pin(
        &mut chip,
        arg("rst", Pins::RST),
        LineRequestFlags::OUTPUT,
        "epd-rst",
    )?;
    let dc = request_pin(
        &mut chip,
        arg("dc", Pins::DC),
        LineRequestFlags::OUTPUT,
        "epd-dc",
    )?;
    let busy = request_pin(
        &mut chip,
        arg("busy", Pins::BSY),
        LineRequestFlags::INPUT,
        "epd-busy",
    )?;

    let defaults = Config::default();
    let config = defaults.with_busy_timeout_ms(arg("busy-timeout", defaults.busy_timeout_ms));
    let mut epd = Epd2in13::with_config(spi, busy, dc, rst, Delay, config);

    epd.full_update()?;
    epd.clear(0xFF)?;

    let mut canvas = Canvas::landscape();
    draw_banner(
        &mut canvas,
        title,
        concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION")),
    );
    epd.print_image(&canvas)?;

    if partial_rounds > 0 {
        epd.partial_update()?;
        for round in 1..=partial_rounds {
            canvas.clear_all();
            draw_banner(
                &mut canvas,
                title,
                &format!("partial refresh {round}/{partial_rounds}"),
            );
            epd.print_image(&canvas)?;
        }
    }

    epd.sleep()?;
    info!("Done, panel is asleep");
    Ok(())
}
