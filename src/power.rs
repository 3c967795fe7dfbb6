//! Switched power rails for the particulate sensor.

use embedded_hal::digital::OutputPin;

/// The particulate sensor's boost converter, enable line and reset line.
///
/// Pin faults are swallowed; the lines are plain board-level GPIOs with
/// no failure mode worth propagating.
pub struct SensorPower<BST, EN, RST> {
    boost: BST,
    enable: EN,
    reset: RST,
}

impl<BST, EN, RST> SensorPower<BST, EN, RST>
where
    BST: OutputPin,
    EN: OutputPin,
    RST: OutputPin,
{
    /// Takes the three lines, parks the rails and holds the sensor out
    /// of reset.
    pub fn new(mut boost: BST, mut enable: EN, mut reset: RST) -> Self {
        boost.set_low().ok();
        enable.set_low().ok();
        reset.set_high().ok();
        SensorPower {
            boost,
            enable,
            reset,
        }
    }

    /// Switches both rails. The boost converter rises first and falls
    /// last so the sensor never sees an enabled rail without its supply.
    pub fn set(&mut self, on: bool) {
        if on {
            self.boost.set_high().ok();
            self.enable.set_high().ok();
        } else {
            self.enable.set_low().ok();
            self.boost.set_low().ok();
        }
    }

    /// Raises the rails for the lifetime of the returned guard.
    pub(crate) fn power_on(&mut self) -> PowerGuard<'_, BST, EN, RST> {
        self.set(true);
        PowerGuard(self)
    }

    /// Gives the lines back, leaving them in whatever state they hold.
    pub fn release(self) -> (BST, EN, RST) {
        (self.boost, self.enable, self.reset)
    }
}

/// Drops the rails when it goes out of scope, on every exit path.
pub(crate) struct PowerGuard<'a, BST, EN, RST>(&'a mut SensorPower<BST, EN, RST>)
where
    BST: OutputPin,
    EN: OutputPin,
    RST: OutputPin;

impl<BST, EN, RST> Drop for PowerGuard<'_, BST, EN, RST>
where
    BST: OutputPin,
    EN: OutputPin,
    RST: OutputPin,
{
    fn drop(&mut self) {
        self.0.set(false);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    use crate::testutil::RecordingPin;

    use super::*;

    type PinLog = Rc<RefCell<Vec<(&'static str, bool)>>>;

    fn rig(log: &PinLog) -> SensorPower<RecordingPin, RecordingPin, RecordingPin> {
        SensorPower::new(
            RecordingPin::new("boost", log),
            RecordingPin::new("enable", log),
            RecordingPin::new("reset", log),
        )
    }

    #[test]
    fn construction_parks_the_rails_and_deasserts_reset() {
        let log = PinLog::default();
        let _power = rig(&log);

        assert_eq!(
            log.borrow().as_slice(),
            [("boost", false), ("enable", false), ("reset", true)]
        );
    }

    #[test]
    fn boost_rises_first_and_falls_last() {
        let log = PinLog::default();
        let mut power = rig(&log);
        log.borrow_mut().clear();

        power.set(true);
        power.set(false);

        assert_eq!(
            log.borrow().as_slice(),
            [
                ("boost", true),
                ("enable", true),
                ("enable", false),
                ("boost", false)
            ]
        );
    }

    #[test]
    fn guard_drops_the_rails_when_it_leaves_scope() {
        let log = PinLog::default();
        let mut power = rig(&log);
        log.borrow_mut().clear();

        {
            let _rails = power.power_on();
            assert_eq!(
                log.borrow().as_slice(),
                [("boost", true), ("enable", true)]
            );
        }

        assert_eq!(
            log.borrow()[2..],
            [("enable", false), ("boost", false)]
        );
    }

    #[test]
    fn release_hands_the_lines_back() {
        let log = PinLog::default();
        let power = rig(&log);
        let (mut boost, _enable, _reset) = power.release();
        log.borrow_mut().clear();

        boost.set_high().ok();
        assert_eq!(log.borrow().as_slice(), [("boost", true)]);
    }
}
