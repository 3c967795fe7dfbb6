//! Climate sensing over a BME280-class digital sensor.

use embedded_hal::delay::DelayNs;

use crate::types::ClimateSample;

/// Wait between the discarded read and the real one [ms].
pub const CLIMATE_SETTLE_MS: u32 = 100;

/// A combined temperature, pressure and humidity sensor.
///
/// Implemented over whatever concrete driver the board wires up; the
/// acquisition routine only needs one blocking measurement at a time.
pub trait ClimateSensor {
    type Error;

    /// Reads the sensor's current measurement registers.
    fn measure(&mut self) -> Result<ClimateSample, Self::Error>;
}

impl<T: ClimateSensor + ?Sized> ClimateSensor for &mut T {
    type Error = T::Error;

    fn measure(&mut self) -> Result<ClimateSample, Self::Error> {
        T::measure(self)
    }
}

/// Takes a climate sample the sensor has had time to refresh.
///
/// The sensor hands back whatever it converted last, not a synchronous
/// fresh sample. The first read flushes the stale registers, then a new
/// conversion is given [`CLIMATE_SETTLE_MS`] to complete before the read
/// that is returned. Always two reads, never more.
pub fn fresh_sample<C, D>(sensor: &mut C, delay: &mut D) -> Result<ClimateSample, C::Error>
where
    C: ClimateSensor,
    D: DelayNs,
{
    sensor.measure()?;
    delay.delay_ms(CLIMATE_SETTLE_MS);
    sensor.measure()
}
