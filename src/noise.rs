//! Microphone sampling and sound level conversion.

use libm::log10f;

/// ADC reference voltage [V].
const ADC_REFERENCE_VOLTS: f32 = 3.3;
/// Full-scale value of a 16-bit analog read.
const ADC_FULL_SCALE: f32 = 65535.0;
/// Voltage the microphone output idles at, half the reference [V].
const MIC_BIAS_VOLTS: f32 = 1.65;
/// Sensitivity correction for the microphone and amplifier pair [dB].
const MIC_SENSITIVITY_DB: f32 = 42.0;
/// Floor applied before the logarithm so a zero read stays finite [V].
const MIN_MIC_VOLTS: f32 = 1e-6;

/// A single analog input channel.
pub trait AnalogInput {
    /// Reads the channel, scaled to the full 16-bit range.
    fn read_u16(&mut self) -> u16;
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    fn read_u16(&mut self) -> u16 {
        T::read_u16(self)
    }
}

/// A free-running millisecond counter.
pub trait MonotonicClock {
    /// Milliseconds since an arbitrary epoch; wraps at `u32::MAX`.
    fn ticks_ms(&mut self) -> u32;
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &mut T {
    fn ticks_ms(&mut self) -> u32 {
        T::ticks_ms(self)
    }
}

/// Converts a microphone voltage to a sound level [dB].
///
/// Inputs below [`MIN_MIC_VOLTS`] are clamped so the logarithm never sees
/// zero. The offset is the empirical sensitivity of this microphone and
/// amplifier combination.
pub fn voltage_to_db(volts: f32) -> f32 {
    20.0 * log10f(volts.max(MIN_MIC_VOLTS)) + MIC_SENSITIVITY_DB
}

/// Measures the peak-to-peak sound level over a window [dB].
///
/// Polls the microphone as fast as the channel allows until `window_ms`
/// of wall-clock time has elapsed, converting every sample to a sound
/// level and tracking the extremes. Both extremes start at the level of
/// the nominal mid-rail bias, so a flat input reports `0.0`, as does a
/// window short enough to fit no sample at all.
///
/// The returned difference of two dB levels is itself reported in dB.
/// Strictly that makes it a ratio, but downstream consumers rely on the
/// dB label, so it stays.
pub fn peak_to_peak<M, C>(mic: &mut M, clock: &mut C, window_ms: u32) -> f32
where
    M: AnalogInput,
    C: MonotonicClock,
{
    let idle = voltage_to_db(MIC_BIAS_VOLTS);
    let mut quietest = idle;
    let mut loudest = idle;

    let start = clock.ticks_ms();
    while clock.ticks_ms().wrapping_sub(start) < window_ms {
        let volts = f32::from(mic.read_u16()) * ADC_REFERENCE_VOLTS / ADC_FULL_SCALE;
        let level = voltage_to_db(volts);
        quietest = quietest.min(level);
        loudest = loudest.max(level);
    }

    loudest - quietest
}
