//! Hardware Resource Management
//!
//! Assigns the button pins and adapts embassy's GPIO and time driver to the
//! pin and clock interfaces of the monitor.
//!
//! # Wiring
//! Buttons connect their pin to ground when pressed. The internal pull-up keeps
//! the pin high while released, so the buttons are active-low.

use assign_resources::assign_resources;
use button_monitor::system::pin::{ActiveLevel, PinSource};
use button_monitor::system::scheduler::Clock;
use embassy_rp::gpio::Input;
use embassy_rp::peripherals;
use embassy_time::Instant;

assign_resources! {
    /// Push buttons
    buttons: ButtonResources {
        btn_a: PIN_12,
        btn_b: PIN_13,
    },
}

/// A GPIO input read as a button
pub struct GpioPin {
    input: Input<'static>,
    active: ActiveLevel,
}

impl GpioPin {
    pub fn new(input: Input<'static>, active: ActiveLevel) -> Self {
        Self { input, active }
    }
}

impl PinSource for GpioPin {
    fn is_asserted(&mut self) -> bool {
        self.active.is_asserted(self.input.is_high())
    }
}

/// Clock backed by the embassy time driver
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
