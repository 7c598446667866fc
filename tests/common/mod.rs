//! Shared hardware doubles for integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use uln2003_stepper::{CoilPattern, StepperDriver};

/// Every pin write as `(pin index, level)`, in order.
pub type WriteLog = Rc<RefCell<Vec<(usize, bool)>>>;

/// Output pin that appends its writes to a shared log.
pub struct RecordingPin {
    index: usize,
    log: WriteLog,
}

impl ErrorType for RecordingPin {
    type Error = Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.index, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.index, true));
        Ok(())
    }
}

/// Delay that only counts what it was asked to wait.
#[derive(Clone, Default)]
pub struct CountingDelay {
    pub calls: Rc<Cell<u32>>,
    pub total_ms: Rc<Cell<u64>>,
}

impl DelayNs for CountingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls.set(self.calls.get() + 1);
        self.total_ms.set(self.total_ms.get() + u64::from(ns) / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.calls.set(self.calls.get() + 1);
        self.total_ms.set(self.total_ms.get() + u64::from(ms));
    }
}

/// Delay backed by `std::thread::sleep`.
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

/// Driver on recording pins, plus handles to inspect what it did.
pub struct Rig {
    pub driver: StepperDriver<RecordingPin, CountingDelay>,
    pub log: WriteLog,
    pub delay: CountingDelay,
}

impl Rig {
    pub fn new(pattern: [u8; 4]) -> Self {
        let log: WriteLog = Rc::default();
        let pins = [0, 1, 2, 3].map(|index| RecordingPin {
            index,
            log: log.clone(),
        });
        let delay = CountingDelay::default();
        let driver = StepperDriver::from_pins(pins, delay.clone(), CoilPattern::from_bits(pattern))
            .expect("valid pattern");
        Self { driver, log, delay }
    }

    /// Number of complete four-pin coil writes so far.
    pub fn coil_writes(&self) -> usize {
        self.log.borrow().len() / 4
    }

    /// Levels of the most recent coil write.
    pub fn last_write(&self) -> Option<[bool; 4]> {
        let log = self.log.borrow();
        let tail = log.len().checked_sub(4).map(|start| &log[start..])?;
        let mut levels = [false; 4];
        for (i, &(index, level)) in tail.iter().enumerate() {
            assert_eq!(index, i, "pins written out of order");
            levels[index] = level;
        }
        Some(levels)
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}
