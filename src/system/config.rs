//! Button Configuration
//!
//! Integrator bounds, hysteresis thresholds and timing constants used by the
//! button monitor, plus [`ButtonConfig`] for buttons that need different values
//! (e.g. a touch pad in a noisy environment).
//!
//! # Integrator
//! Every tick the integrator moves one step towards the raw input: up while the
//! input is asserted, down otherwise. A press is recognized once it rises above
//! [`SIGMA_THRESH_HI`], a release once it falls below [`SIGMA_THRESH_LO`].
//! With the default [`TICK_PERIOD`] this is a debounce window of roughly 54 ms
//! on press and 66 ms on release from a fully saturated integrator.

use crate::system::error::Error;
use embassy_time::Duration;

/// Lower bound of the integrator
pub const SIGMA_MIN: u8 = 0;

/// Upper bound of the integrator
pub const SIGMA_MAX: u8 = 12;

/// Integrator value that has to be exceeded to register a press
pub const SIGMA_THRESH_HI: u8 = 8;

/// Integrator value that has to be undercut to register a release
pub const SIGMA_THRESH_LO: u8 = 2;

/// Press duration from which a release is classified as a long click
pub const LONG_CLICK_TIME: Duration = Duration::from_millis(1000);

/// Press duration after which a hold event fires while still pressed
pub const HOLD_TIME: Duration = Duration::from_millis(1500);

/// Maximum gap between two clicks for a consumer to treat them as a double click.
/// Reserved: the monitor itself never produces double clicks.
pub const DOUBLE_CLICK_THRESH: Duration = Duration::from_millis(50);

/// Period of the system tick driving the monitors
pub const TICK_PERIOD: Duration = Duration::from_millis(6);

/// Per-button thresholds and timings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Lower bound of the integrator
    pub sigma_min: u8,
    /// Upper bound of the integrator
    pub sigma_max: u8,
    /// Press threshold, must be exceeded
    pub sigma_thresh_hi: u8,
    /// Release threshold, must be undercut
    pub sigma_thresh_lo: u8,
    /// Press duration classifying a release as long click
    pub long_click_time: Duration,
    /// Press duration after which hold fires
    pub hold_time: Duration,
}

impl ButtonConfig {
    /// Configuration built from the crate constants
    pub const DEFAULT: ButtonConfig = ButtonConfig {
        sigma_min: SIGMA_MIN,
        sigma_max: SIGMA_MAX,
        sigma_thresh_hi: SIGMA_THRESH_HI,
        sigma_thresh_lo: SIGMA_THRESH_LO,
        long_click_time: LONG_CLICK_TIME,
        hold_time: HOLD_TIME,
    };

    /// Checks that the thresholds form a usable hysteresis band.
    ///
    /// Both thresholds have to be reachable from inside the integrator range:
    /// `sigma_min < sigma_thresh_lo < sigma_thresh_hi < sigma_max`.
    /// Timings are not checked, a hold time below the long click time is legal.
    pub fn validate(&self) -> Result<(), Error> {
        if self.sigma_min < self.sigma_thresh_lo
            && self.sigma_thresh_lo < self.sigma_thresh_hi
            && self.sigma_thresh_hi < self.sigma_max
        {
            Ok(())
        } else {
            Err(Error::InvalidConfig)
        }
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(SIGMA_MIN, 0);
        assert_eq!(SIGMA_MAX, 12);
        assert_eq!(SIGMA_THRESH_HI, 8);
        assert_eq!(SIGMA_THRESH_LO, 2);
        assert_eq!(LONG_CLICK_TIME.as_millis(), 1000);
        assert_eq!(HOLD_TIME.as_millis(), 1500);
        assert_eq!(DOUBLE_CLICK_THRESH.as_millis(), 50);
        assert_eq!(TICK_PERIOD.as_millis(), 6);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(ButtonConfig::default(), ButtonConfig::DEFAULT);
        assert_eq!(ButtonConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let config = ButtonConfig {
            sigma_thresh_hi: 2,
            sigma_thresh_lo: 8,
            ..ButtonConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(Error::InvalidConfig));
    }

    #[test]
    fn test_unreachable_high_threshold_rejected() {
        // The integrator can never exceed its own maximum
        let config = ButtonConfig {
            sigma_thresh_hi: 12,
            ..ButtonConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(Error::InvalidConfig));
    }

    #[test]
    fn test_unreachable_low_threshold_rejected() {
        // The integrator can never drop below its own minimum
        let config = ButtonConfig {
            sigma_min: 2,
            ..ButtonConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(Error::InvalidConfig));
    }
}
