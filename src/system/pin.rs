//! Pin Input
//!
//! The monitor only cares whether a button is asserted (pressed or touched).
//! How that maps onto the electrical level depends on the wiring.

/// Describes which electrical level means "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Button connects the pin to ground, pin idles high through a pull-up.
    /// Touch pads read low while touched as well.
    #[default]
    Low,
    /// Button connects the pin to voltage, pin idles low through a pull-down.
    High,
}

impl ActiveLevel {
    /// Converts a raw level reading into "asserted"
    pub const fn is_asserted(self, is_high: bool) -> bool {
        match self {
            ActiveLevel::Low => !is_high,
            ActiveLevel::High => is_high,
        }
    }
}

/// Source of the current, already normalized, state of a button input
pub trait PinSource {
    /// Returns true while the input is asserted
    fn is_asserted(&mut self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_low() {
        assert!(ActiveLevel::Low.is_asserted(false));
        assert!(!ActiveLevel::Low.is_asserted(true));
    }

    #[test]
    fn test_active_high() {
        assert!(ActiveLevel::High.is_asserted(true));
        assert!(!ActiveLevel::High.is_asserted(false));
    }

    #[test]
    fn test_default_is_active_low() {
        assert_eq!(ActiveLevel::default(), ActiveLevel::Low);
    }
}
