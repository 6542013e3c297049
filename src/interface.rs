//! Display interface using SPI
use crate::config::Config;
use crate::error::{DisplayError, Error};
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

/// Bytes per SPI transaction when streaming frames
const CHUNK_SIZE: usize = 64;

/// The four-wire connection to the panel controller.
///
/// Chip select is owned by the [`SpiDevice`], every [`cmd`](Self::cmd) and
/// [`data`](Self::data) call is one framed transaction.
pub struct DisplayInterface<SPI, BSY, DC, RST, DELAY> {
    /// SPI device
    spi: SPI,
    /// High for busy, wait until display is ready!
    busy: BSY,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Reseting
    rst: RST,
    /// Delay provider for reset and busy polling
    pub(crate) delay: DELAY,
    config: Config,
}

impl<SPI, BSY, DC, RST, DELAY> DisplayInterface<SPI, BSY, DC, RST, DELAY> {
    /// Wrap the peripherals, nothing is sent yet
    pub fn new(spi: SPI, busy: BSY, dc: DC, rst: RST, delay: DELAY, config: Config) -> Self {
        DisplayInterface {
            spi,
            busy,
            dc,
            rst,
            delay,
            config,
        }
    }

    /// Timing in use
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give the peripherals back
    pub fn release(self) -> (SPI, BSY, DC, RST, DELAY) {
        (self.spi, self.busy, self.dc, self.rst, self.delay)
    }
}

impl<SPI, BSY, DC, RST, DELAY> DisplayInterface<SPI, BSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    RST: OutputPin,
    DC: OutputPin,
    BSY: InputPin,
    DELAY: DelayNs,
{
    /// Basic function for sending commands
    pub(crate) fn cmd(&mut self, command: u8) -> Result<(), Error> {
        // low for commands
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;

        match self.spi.write(&[command]) {
            Ok(_) => Ok(()),
            Err(e) => {
                log::error!("SPI write error for command 0x{:02X}: {:?}", command, e);
                Err(DisplayError::BusWriteError.into())
            }
        }
    }

    /// Basic function for sending an array of u8-values of data over spi
    ///
    /// Large payloads go out in chunks, in order.
    pub(crate) fn data(&mut self, data: &[u8]) -> Result<(), Error> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;

        for chunk in data.chunks(CHUNK_SIZE) {
            self.spi.write(chunk).map_err(|e| {
                log::error!("SPI write error after data: {:?}", e);
                DisplayError::BusWriteError
            })?;
        }
        Ok(())
    }

    /// Basic function for sending a command and the data belonging to it.
    pub(crate) fn cmd_with_data(&mut self, command: u8, data: &[u8]) -> Result<(), Error> {
        self.cmd(command)?;
        self.data(data)
    }

    /// Send the same byte of data `repetitions` times, used to fill the frame
    pub(crate) fn data_x_times(&mut self, val: u8, repetitions: usize) -> Result<(), Error> {
        // high for data
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;

        let buffer = [val; CHUNK_SIZE];
        let full_chunks = repetitions / CHUNK_SIZE;
        let remainder = repetitions % CHUNK_SIZE;

        for _ in 0..full_chunks {
            self.spi
                .write(&buffer)
                .map_err(|_| DisplayError::BusWriteError)?;
        }
        if remainder > 0 {
            self.spi
                .write(&buffer[..remainder])
                .map_err(|_| DisplayError::BusWriteError)?;
        }

        log::debug!("Sent 0x{:02X} x {}", val, repetitions);
        Ok(())
    }

    /// Poll the busy line until the controller releases it.
    ///
    /// Sleeps `busy_poll_ms` (at least 1 ms) between reads and fails with
    /// [`Error::BusyTimeout`] once `busy_timeout_ms` have passed.
    pub(crate) fn wait_until_idle(&mut self) -> Result<(), Error> {
        let Config {
            busy_poll_ms,
            busy_timeout_ms,
            ..
        } = self.config;
        // a zero interval would never reach the timeout
        let busy_poll_ms = busy_poll_ms.max(1);
        let mut waited_ms: u32 = 0;

        while self.busy.is_high().map_err(|_| Error::BusyPin)? {
            if waited_ms >= busy_timeout_ms {
                log::error!("Busy pin still HIGH after {} ms", waited_ms);
                return Err(Error::BusyTimeout { waited_ms });
            }
            self.delay.delay_ms(busy_poll_ms);
            waited_ms = waited_ms.saturating_add(busy_poll_ms);
        }

        if waited_ms > 0 {
            log::debug!("Panel idle after {} ms", waited_ms);
        }
        Ok(())
    }

    /// Hardware reset: high, low, high with a dwell after each edge
    pub(crate) fn reset(&mut self) -> Result<(), Error> {
        let dwell = self.config.reset_pulse_ms;
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(dwell);
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(dwell);
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        self.delay.delay_ms(dwell);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    type MockInterface = DisplayInterface<SpiMock<u8>, PinMock, PinMock, PinMock, NoopDelay>;

    fn interface(
        spi: &[SpiTransaction<u8>],
        busy: &[PinTransaction],
        dc: &[PinTransaction],
        rst: &[PinTransaction],
        config: Config,
    ) -> MockInterface {
        DisplayInterface::new(
            SpiMock::new(spi),
            PinMock::new(busy),
            PinMock::new(dc),
            PinMock::new(rst),
            NoopDelay::new(),
            config,
        )
    }

    fn done(interface: MockInterface) {
        let (mut spi, mut busy, mut dc, mut rst, _) = interface.release();
        spi.done();
        busy.done();
        dc.done();
        rst.done();
    }

    #[test]
    fn command_then_data_toggle_dc() {
        let spi = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x11]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x01]),
            SpiTransaction::transaction_end(),
        ];
        let dc = [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];
        let mut interface = interface(&spi, &[], &dc, &[], Config::default());

        interface.cmd_with_data(0x11, &[0x01]).unwrap();
        done(interface);
    }

    #[test]
    fn reset_pulses_high_low_high() {
        let rst = [
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];
        let mut interface = interface(&[], &[], &[], &rst, Config::default());

        interface.reset().unwrap();
        done(interface);
    }

    #[test]
    fn waits_while_busy_is_high() {
        let busy = [
            PinTransaction::get(PinState::High),
            PinTransaction::get(PinState::High),
            PinTransaction::get(PinState::Low),
        ];
        let mut interface = interface(&[], &busy, &[], &[], Config::default());

        interface.wait_until_idle().unwrap();
        done(interface);
    }

    #[test]
    fn busy_wait_gives_up() {
        let config = Config::default()
            .with_busy_poll_ms(100)
            .with_busy_timeout_ms(200);
        // reads at 0, 100 and 200 ms, the last one trips the timeout
        let busy = [
            PinTransaction::get(PinState::High),
            PinTransaction::get(PinState::High),
            PinTransaction::get(PinState::High),
        ];
        let mut interface = interface(&[], &busy, &[], &[], config);

        assert_eq!(
            interface.wait_until_idle(),
            Err(Error::BusyTimeout { waited_ms: 200 })
        );
        done(interface);
    }

    #[test]
    fn zero_poll_interval_still_times_out() {
        let config = Config {
            busy_poll_ms: 0,
            busy_timeout_ms: 3,
            ..Config::default()
        };
        // polls at 0, 1, 2 and 3 ms
        let busy = vec![PinTransaction::get(PinState::High); 4];
        let mut interface = interface(&[], &busy, &[], &[], config);

        assert_eq!(
            interface.wait_until_idle(),
            Err(Error::BusyTimeout { waited_ms: 3 })
        );
        done(interface);
    }

    #[test]
    fn repeated_fill_is_chunked_in_order() {
        let spi = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0xAA; CHUNK_SIZE]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0xAA; 6]),
            SpiTransaction::transaction_end(),
        ];
        let dc = [PinTransaction::set(PinState::High)];
        let mut interface = interface(&spi, &[], &dc, &[], Config::default());

        interface.data_x_times(0xAA, CHUNK_SIZE + 6).unwrap();
        done(interface);
    }
}
