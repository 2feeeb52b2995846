//! Error Types
//!
//! Errors raised while setting up button monitors. The per-tick state machine
//! itself cannot fail, so everything here happens at construction time.

use core::fmt;

/// Errors that can occur when creating or registering a button monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A component with the same identity is already registered
    AlreadyRegistered,
    /// The scheduler has no free slot left
    RegistryFull,
    /// Thresholds do not form a reachable hysteresis band
    ///
    /// See [`ButtonConfig::validate()`](crate::system::config::ButtonConfig::validate).
    InvalidConfig,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AlreadyRegistered => write!(f, "Component already registered"),
            Error::RegistryFull => write!(f, "Registry full"),
            Error::InvalidConfig => write!(f, "Invalid button configuration"),
        }
    }
}

impl core::error::Error for Error {}
