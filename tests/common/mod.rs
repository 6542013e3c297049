//! Recording fakes for the embedded-hal traits.
//!
//! Every byte written over SPI is logged as a command or data event according
//! to the level of the data/command pin at the time of the write, so tests can
//! compare whole byte streams without caring how the driver chunks them.
//!
//! The unit tests in `src/interface.rs` use `embedded-hal-mock`, which checks
//! SPI transactions and pin edges one by one. That suits single primitives,
//! but a full init sequence would need every chunk boundary and DC edge
//! spelled out, so the driver-level tests record tagged bytes instead.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, InputPin, OutputPin};
use embedded_hal::spi::{self, Operation, SpiDevice};

use epd2in13_v2::{Config, Epd2in13};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Command(u8),
    Data(u8),
    Reset(bool),
    DelayMs(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault;

impl spi::Error for Fault {
    fn kind(&self) -> spi::ErrorKind {
        spi::ErrorKind::Other
    }
}

impl digital::Error for Fault {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

#[derive(Clone, Default)]
pub struct Recorder {
    events: Rc<RefCell<Vec<Event>>>,
    dc_high: Rc<Cell<bool>>,
    /// Number of busy reads that still report busy
    busy_reads: Rc<Cell<usize>>,
    stuck_busy: Rc<Cell<bool>>,
    /// Fail the SPI write that would log this many bus bytes
    fail_at_byte: Rc<Cell<Option<usize>>>,
    bus_bytes: Rc<Cell<usize>>,
}

impl Recorder {
    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Only the command and data bytes
    pub fn bus(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, Event::Command(_) | Event::Data(_)))
            .collect()
    }

    pub fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn take_bus(&self) -> Vec<Event> {
        self.take()
            .into_iter()
            .filter(|e| matches!(e, Event::Command(_) | Event::Data(_)))
            .collect()
    }

    pub fn busy_for(&self, reads: usize) {
        self.busy_reads.set(reads);
    }

    pub fn stuck_busy(&self, stuck: bool) {
        self.stuck_busy.set(stuck);
    }

    pub fn fail_at_byte(&self, index: usize) {
        self.bus_bytes.set(0);
        self.fail_at_byte.set(Some(index));
    }

    pub fn heal(&self) {
        self.fail_at_byte.set(None);
    }
}

pub struct FakeSpi(Recorder);
pub struct FakeDc(Recorder);
pub struct FakeRst(Recorder);
pub struct FakeBusy(Recorder);
pub struct FakeDelay(Recorder);

impl spi::ErrorType for FakeSpi {
    type Error = Fault;
}

impl SpiDevice for FakeSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), Fault> {
        for op in operations.iter() {
            if let Operation::Write(bytes) = op {
                for &byte in bytes.iter() {
                    let count = self.0.bus_bytes.get();
                    if self.0.fail_at_byte.get() == Some(count) {
                        return Err(Fault);
                    }
                    self.0.bus_bytes.set(count + 1);
                    let event = if self.0.dc_high.get() {
                        Event::Data(byte)
                    } else {
                        Event::Command(byte)
                    };
                    self.0.push(event);
                }
            }
        }
        Ok(())
    }
}

impl digital::ErrorType for FakeDc {
    type Error = Fault;
}

impl OutputPin for FakeDc {
    fn set_low(&mut self) -> Result<(), Fault> {
        self.0.dc_high.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Fault> {
        self.0.dc_high.set(true);
        Ok(())
    }
}

impl digital::ErrorType for FakeRst {
    type Error = Fault;
}

impl OutputPin for FakeRst {
    fn set_low(&mut self) -> Result<(), Fault> {
        self.0.push(Event::Reset(false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Fault> {
        self.0.push(Event::Reset(true));
        Ok(())
    }
}

impl digital::ErrorType for FakeBusy {
    type Error = Fault;
}

impl InputPin for FakeBusy {
    fn is_high(&mut self) -> Result<bool, Fault> {
        if self.0.stuck_busy.get() {
            return Ok(true);
        }
        let left = self.0.busy_reads.get();
        if left > 0 {
            self.0.busy_reads.set(left - 1);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn is_low(&mut self) -> Result<bool, Fault> {
        self.is_high().map(|busy| !busy)
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.push(Event::DelayMs(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(Event::DelayMs(ms));
    }
}

pub type FakeEpd = Epd2in13<FakeSpi, FakeBusy, FakeDc, FakeRst, FakeDelay>;

pub fn epd_with_config(config: Config) -> (FakeEpd, Recorder) {
    let recorder = Recorder::default();
    let epd = Epd2in13::with_config(
        FakeSpi(recorder.clone()),
        FakeBusy(recorder.clone()),
        FakeDc(recorder.clone()),
        FakeRst(recorder.clone()),
        FakeDelay(recorder.clone()),
        config,
    );
    (epd, recorder)
}

pub fn epd() -> (FakeEpd, Recorder) {
    epd_with_config(Config::default())
}

/// `command` followed by its data bytes
pub fn cmd(command: u8, data: &[u8]) -> Vec<Event> {
    let mut events = vec![Event::Command(command)];
    events.extend(data.iter().map(|b| Event::Data(*b)));
    events
}
