//! The assembled sensing front end and its acquisition routine.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

use crate::climate::{self, ClimateSensor};
use crate::noise::{self, AnalogInput, MonotonicClock};
use crate::particulate::{self, ParticulateFrame};
use crate::power::SensorPower;
use crate::types::{ClimateSample, SensorReading};
use crate::Error;

/// Airflow settling time after the particulate sensor powers up [ms].
pub const AIRFLOW_SETTLE_MS: u32 = 5_000;
/// Length of the microphone sampling window [ms].
pub const MIC_SAMPLE_TIME_MS: u32 = 500;

/// The Enviro Urban sensing front end.
///
/// Owns the climate sensor, the particulate sensor's bus and power lines,
/// the microphone channel and the board's timing sources. One call to
/// [`Urban::take_reading`] runs the whole acquisition routine and hands
/// back a formatted [`SensorReading`].
///
/// The routine blocks for the airflow settle and the microphone window,
/// so a full reading takes a little over
/// `AIRFLOW_SETTLE_MS + MIC_SAMPLE_TIME_MS` to come back. It must not be
/// re-entered; the bus, rails and channel are owned for the whole call.
pub struct Urban<C, I2C, MIC, CLK, BST, EN, RST, D> {
    climate: C,
    bus: I2C,
    mic: MIC,
    clock: CLK,
    power: SensorPower<BST, EN, RST>,
    delay: D,
}

impl<C, I2C, MIC, CLK, BST, EN, RST, D> Urban<C, I2C, MIC, CLK, BST, EN, RST, D>
where
    C: ClimateSensor,
    I2C: I2c,
    MIC: AnalogInput,
    CLK: MonotonicClock,
    BST: OutputPin,
    EN: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    /// Wires up the front end from its peripherals and the already
    /// constructed power lines.
    pub fn new(
        climate: C,
        bus: I2C,
        mic: MIC,
        clock: CLK,
        power: SensorPower<BST, EN, RST>,
        delay: D,
    ) -> Self {
        Urban {
            climate,
            bus,
            mic,
            clock,
            power,
            delay,
        }
    }

    /// Takes a settled climate sample.
    pub fn climate_sample(&mut self) -> Result<ClimateSample, Error<I2C::Error, C::Error>> {
        climate::fresh_sample(&mut self.climate, &mut self.delay).map_err(Error::Climate)
    }

    /// Powers the particulate sensor, waits for airflow to stabilise and
    /// reads one measurement block. The rails are dropped again whether
    /// or not the read succeeds.
    pub fn particulate_frame(&mut self) -> Result<ParticulateFrame, Error<I2C::Error, C::Error>> {
        debug!("starting particulate sensor");
        let rails = self.power.power_on();

        debug!("waiting {} ms for airflow", AIRFLOW_SETTLE_MS);
        self.delay.delay_ms(AIRFLOW_SETTLE_MS);

        debug!("reading particulate frame");
        let frame = particulate::read_frame(&mut self.bus).map_err(Error::Bus);
        drop(rails);
        frame
    }

    /// Measures the peak-to-peak sound level over `window_ms` [dB].
    pub fn noise_peak_to_peak(&mut self, window_ms: u32) -> f32 {
        debug!("sampling microphone for {} ms", window_ms);
        noise::peak_to_peak(&mut self.mic, &mut self.clock, window_ms)
    }

    /// Runs one full acquisition and formats the result.
    ///
    /// Climate first, then the particulate block inside its power cycle,
    /// then the microphone window. Any failure aborts the reading; a
    /// partially filled [`SensorReading`] is never produced.
    pub fn take_reading(&mut self) -> Result<SensorReading, Error<I2C::Error, C::Error>> {
        let climate = self.climate_sample()?;
        let frame = self.particulate_frame()?;
        let noise_db = self.noise_peak_to_peak(MIC_SAMPLE_TIME_MS);
        Ok(SensorReading::assemble(&climate, &frame, noise_db))
    }

    /// Tears the front end apart into the peripherals it was built from.
    pub fn release(self) -> (C, I2C, MIC, CLK, SensorPower<BST, EN, RST>, D) {
        (
            self.climate,
            self.bus,
            self.mic,
            self.clock,
            self.power,
            self.delay,
        )
    }
}
