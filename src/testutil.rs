//! Scripted peripherals for the in-crate tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::climate::ClimateSensor;
use crate::noise::{AnalogInput, MonotonicClock};
use crate::types::ClimateSample;

/// Error a scripted climate sensor fails with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClimateFault;

/// A climate sensor that replays a fixed script of results.
///
/// Panics when read past the end of its script; tests size the script to
/// the exact number of reads they expect.
pub struct ScriptedClimate {
    script: Vec<Result<ClimateSample, ClimateFault>>,
    pub reads: usize,
}

impl ScriptedClimate {
    pub fn new(script: &[Result<ClimateSample, ClimateFault>]) -> Self {
        Self {
            script: script.to_vec(),
            reads: 0,
        }
    }
}

impl ClimateSensor for ScriptedClimate {
    type Error = ClimateFault;

    fn measure(&mut self) -> Result<ClimateSample, ClimateFault> {
        let next = self.script[self.reads];
        self.reads += 1;
        next
    }
}

/// An analog channel that replays fixed 16-bit samples.
pub struct ScriptedMic {
    script: Vec<u16>,
    next: usize,
}

impl ScriptedMic {
    pub fn new(script: &[u16]) -> Self {
        Self {
            script: script.to_vec(),
            next: 0,
        }
    }
}

impl AnalogInput for ScriptedMic {
    fn read_u16(&mut self) -> u16 {
        let sample = self.script[self.next];
        self.next += 1;
        sample
    }
}

/// A clock that replays fixed millisecond timestamps.
pub struct TickSequence {
    script: Vec<u32>,
    next: usize,
}

impl TickSequence {
    pub fn new(script: &[u32]) -> Self {
        Self {
            script: script.to_vec(),
            next: 0,
        }
    }
}

impl MonotonicClock for TickSequence {
    fn ticks_ms(&mut self) -> u32 {
        let tick = self.script[self.next];
        self.next += 1;
        tick
    }
}

/// A delay that records how long it was asked to sleep.
///
/// Clones share the record, so one handle can go into the device under
/// test while the test keeps another for asserting.
#[derive(Clone, Default)]
pub struct SharedDelay {
    slept: Rc<RefCell<Vec<u32>>>,
}

impl SharedDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every millisecond sleep requested so far, in order.
    pub fn slept_ms(&self) -> Vec<u32> {
        self.slept.borrow().clone()
    }
}

impl DelayNs for SharedDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.slept.borrow_mut().push(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.slept.borrow_mut().push(ms);
    }
}

/// An output pin that records its transitions into a shared log.
///
/// The log is shared between pins so ordering across the whole pin set
/// stays visible to the test.
#[derive(Clone)]
pub struct RecordingPin {
    name: &'static str,
    log: Rc<RefCell<Vec<(&'static str, bool)>>>,
}

impl RecordingPin {
    pub fn new(name: &'static str, log: &Rc<RefCell<Vec<(&'static str, bool)>>>) -> Self {
        Self {
            name,
            log: Rc::clone(log),
        }
    }
}

impl ErrorType for RecordingPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for RecordingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.name, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.name, true));
        Ok(())
    }
}
