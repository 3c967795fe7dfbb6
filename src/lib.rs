//! Driver for the Pimoroni Enviro Urban sensing front end.
//!
//! The board pairs a PMS5003I particulate sensor behind switched power
//! rails with a BME280-class climate sensor and an analog MEMS
//! microphone. [`Urban`] owns the lot through the `embedded-hal` traits
//! plus two small local traits for the analog channel and the
//! millisecond clock, and turns one blocking acquisition pass into a
//! formatted [`SensorReading`].
//!
//! An acquisition runs in a fixed order. The climate sensor is read
//! twice with a short settle in between, the particulate sensor is
//! powered up, given five seconds of airflow and read over the bus, and
//! the microphone is sampled for half a second to get a peak-to-peak
//! sound level. Any failure aborts the whole pass; the particulate
//! rails are switched off again on every exit path.
//!
//! Enable the `defmt` or `log` feature to route the driver's progress
//! messages into the matching ecosystem; with neither, logging compiles
//! away entirely.

#![cfg_attr(not(test), no_std)]

// This must come first so the rest of the crate sees its macros.
mod fmt;

pub mod climate;
pub mod noise;
pub mod particulate;
pub mod power;
pub mod station;
#[cfg(test)]
mod testutil;
pub mod types;

pub use crate::climate::{ClimateSensor, CLIMATE_SETTLE_MS};
pub use crate::noise::{AnalogInput, MonotonicClock};
pub use crate::particulate::{Measure, MeasureKind, ParticulateFrame, FRAME_LEN, PMS5003I_ADDR};
pub use crate::power::SensorPower;
pub use crate::station::{Urban, AIRFLOW_SETTLE_MS, MIC_SAMPLE_TIME_MS};
pub use crate::types::{ClimateSample, SensorReading};

/// Errors surfaced by an acquisition pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E, CE> {
    /// The particulate sensor's bus transaction failed.
    Bus(E),
    /// The climate sensor failed to deliver a sample.
    Climate(CE),
}
