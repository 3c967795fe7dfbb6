//! PMS5003I particulate matter sensor: raw frame access and decoding.

use embedded_hal::i2c::I2c;

/// I2C address of the particulate sensor.
pub const PMS5003I_ADDR: u8 = 0x12;

/// Size of the sensor's measurement block, in bytes.
pub const FRAME_LEN: usize = 32;

/// Register the measurement block is read from.
const DATA_REGISTER: u8 = 0x00;

/// One quantity reported by the particulate sensor.
///
/// The discriminant is the word index of the quantity inside the
/// measurement block; each word is a big-endian 16-bit counter.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Measure {
    /// Mass concentration PM1.0, factory calibration [µg/m³]
    Pm1 = 2,
    /// Mass concentration PM2.5, factory calibration [µg/m³]
    Pm2_5 = 3,
    /// Mass concentration PM10, factory calibration [µg/m³]
    Pm10 = 4,
    /// Mass concentration PM1.0 under atmospheric conditions [µg/m³]
    Pm1Atmospheric = 5,
    /// Mass concentration PM2.5 under atmospheric conditions [µg/m³]
    Pm2_5Atmospheric = 6,
    /// Mass concentration PM10 under atmospheric conditions [µg/m³]
    Pm10Atmospheric = 7,
    /// Particles of 0.3 µm and larger [per litre]
    Particles0_3 = 8,
    /// Particles of 0.5 µm and larger [per litre]
    Particles0_5 = 9,
    /// Particles of 1 µm and larger [per litre]
    Particles1 = 10,
    /// Particles of 2.5 µm and larger [per litre]
    Particles2_5 = 11,
    /// Particles of 5 µm and larger [per litre]
    Particles5 = 12,
    /// Particles of 10 µm and larger [per litre]
    Particles10 = 13,
}

impl Measure {
    /// Word index of this quantity inside the measurement block.
    pub fn word(self) -> usize {
        self as usize
    }

    /// What kind of quantity this is, which fixes its unit scaling.
    pub fn kind(self) -> MeasureKind {
        match self {
            Measure::Pm1 | Measure::Pm2_5 | Measure::Pm10 => MeasureKind::MassConcentration,
            Measure::Pm1Atmospheric | Measure::Pm2_5Atmospheric | Measure::Pm10Atmospheric => {
                MeasureKind::AtmosphericMassConcentration
            }
            _ => MeasureKind::ParticleCount,
        }
    }
}

/// The three families of particulate quantities.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasureKind {
    /// Mass per volume, factory calibration [µg/m³]
    MassConcentration,
    /// Mass per volume, compensated for ambient conditions [µg/m³]
    AtmosphericMassConcentration,
    /// Number of particles per volume [per litre]
    ParticleCount,
}

impl MeasureKind {
    /// Multiplier taking an on-wire value to the reported unit.
    ///
    /// The sensor counts particles per decilitre; readings are per litre.
    pub fn scale(self) -> u32 {
        match self {
            MeasureKind::MassConcentration | MeasureKind::AtmosphericMassConcentration => 1,
            MeasureKind::ParticleCount => 10,
        }
    }
}

/// One raw measurement block from the particulate sensor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParticulateFrame([u8; FRAME_LEN]);

impl ParticulateFrame {
    /// Decodes one quantity from the block, scaled to its reported unit.
    pub fn value(&self, measure: Measure) -> u32 {
        let at = measure.word() * 2;
        let raw = u16::from_be_bytes([self.0[at], self.0[at + 1]]);
        u32::from(raw) * measure.kind().scale()
    }

    /// The undecoded block contents.
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }
}

impl From<[u8; FRAME_LEN]> for ParticulateFrame {
    fn from(block: [u8; FRAME_LEN]) -> Self {
        ParticulateFrame(block)
    }
}

/// Pulls one measurement block from the particulate sensor.
///
/// The sensor must already be powered and past its airflow settling time;
/// power sequencing belongs to the caller (see [`crate::Urban`] for the
/// managed version).
pub fn read_frame<I2C: I2c>(bus: &mut I2C) -> Result<ParticulateFrame, I2C::Error> {
    let mut block = [0u8; FRAME_LEN];
    bus.write_read(PMS5003I_ADDR, &[DATA_REGISTER], &mut block)?;
    Ok(ParticulateFrame(block))
}
