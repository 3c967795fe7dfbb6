use core::fmt::Write;

use heapless::String;

use crate::particulate::{Measure, ParticulateFrame};

/// Capacity of one formatted reading, in bytes.
const VALUE_LEN: usize = 16;

/// One formatted measurement with its unit suffix, e.g. `"24.50 °C"`.
pub type Value = String<VALUE_LEN>;

/// One measurement from the climate sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClimateSample {
    /// Ambient temperature [°C]
    pub temperature: f32,
    /// Barometric pressure [Pa]
    pub pressure: f32,
    /// Relative humidity [%]
    pub humidity: f32,
}

/// One full set of formatted readings.
///
/// Field order is the order downstream consumers expect the readings in;
/// [`SensorReading::iter`] yields them in exactly this order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SensorReading {
    /// Ambient temperature, two decimals [°C]
    pub temperature: Value,
    /// Relative humidity, two decimals [%]
    pub humidity: Value,
    /// Barometric pressure, two decimals [hPa]
    pub pressure: Value,
    /// Peak-to-peak sound level, three decimals [dB]
    pub noise: Value,
    /// Mass concentration PM1.0 [µg/m³]
    pub pm1: Value,
    /// Mass concentration PM2.5 [µg/m³]
    pub pm2_5: Value,
    /// Mass concentration PM10 [µg/m³]
    pub pm10: Value,
}

impl SensorReading {
    /// Formats one acquisition's worth of measurements.
    ///
    /// Pressure arrives in the climate sensor's raw unit and is scaled to
    /// hectopascals here. Values wider than a field's capacity are
    /// truncated rather than reported as an error.
    pub fn assemble(climate: &ClimateSample, frame: &ParticulateFrame, noise_db: f32) -> Self {
        let mut reading = SensorReading::default();
        write!(reading.temperature, "{:.2} °C", climate.temperature).ok();
        write!(reading.humidity, "{:.2} %", climate.humidity).ok();
        write!(reading.pressure, "{:.2} hPa", climate.pressure / 100.0).ok();
        write!(reading.noise, "{:.3} dB", noise_db).ok();
        write!(reading.pm1, "{} µg/m³", frame.value(Measure::Pm1)).ok();
        write!(reading.pm2_5, "{} µg/m³", frame.value(Measure::Pm2_5)).ok();
        write!(reading.pm10, "{} µg/m³", frame.value(Measure::Pm10)).ok();
        reading
    }

    /// The readings, labelled, in reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        [
            ("temperature", self.temperature.as_str()),
            ("humidity", self.humidity.as_str()),
            ("pressure", self.pressure.as_str()),
            ("noise", self.noise.as_str()),
            ("pm1", self.pm1.as_str()),
            ("pm2_5", self.pm2_5.as_str()),
            ("pm10", self.pm10.as_str()),
        ]
        .into_iter()
    }
}
