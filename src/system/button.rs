//! Button Monitor
//!
//! Debounces a button or touch pad and turns its state changes into events.
//!
//! Each tick the raw input is integrated into a bounded counter (`sigma`), a
//! lazy follower of the input: a single stray sample moves it by one step only,
//! so only sustained changes cross the hysteresis band and flip the debounced
//! state. The same mechanism debounces mechanical switches and desensitizes
//! touch pads to mains noise.
//!
//! # Events
//! - `Down`: `sigma` rose above the high threshold, in every configuration
//! - `Up`: `sigma` fell below the low threshold, in every configuration
//! - `Click` / `LongClick`: follows `Up` with [`EventConfiguration::All`],
//!   depending on how long the button was pressed
//! - `Hold`: once per press when the button stays pressed for the hold time.
//!   Not gated by the event configuration.
//!
//! # Concurrency
//! [`ButtonMonitor::on_tick`] is expected to run from a single tick task at a
//! fixed period, never re-entrantly. The monitor has no interior mutability:
//! reading [`ButtonMonitor::is_pressed`] or changing the configuration from
//! elsewhere requires access to the monitor, which on the single-threaded
//! embassy executor means going through the task that owns it. No lock is
//! taken. A host with preemptive access to a monitor must wrap it in a mutex
//! as a whole.

use crate::system::config::ButtonConfig;
use crate::system::error::Error;
use crate::system::event::{ButtonEvent, ButtonEventKind, ButtonId, EventConfiguration, EventSink};
use crate::system::pin::PinSource;
use crate::system::scheduler::{Scheduler, TickListener};
use embassy_time::{Duration, Instant};
use heapless::Vec;

/// Most events a single tick produces: `Up` followed by its classification, or
/// `Down` followed by `Hold` when the hold time is zero
pub const MAX_EVENTS_PER_TICK: usize = 2;

/// Events produced by one tick, in emission order
pub type TickEvents = Vec<ButtonEvent, MAX_EVENTS_PER_TICK>;

/// Debounced state machine for a single button
///
/// Registers its identity with the scheduler on creation and deregisters when
/// dropped.
pub struct ButtonMonitor<'r> {
    id: ButtonId,
    scheduler: &'r dyn Scheduler,
    config: ButtonConfig,
    configuration: EventConfiguration,
    /// Integration of samples over time
    sigma: u8,
    pressed: bool,
    hold_triggered: bool,
    /// Time of the last press edge
    press_start: Instant,
}

impl<'r> ButtonMonitor<'r> {
    /// Creates a monitor with the default thresholds and timings.
    ///
    /// # Errors
    ///
    /// Fails if `scheduler` refuses the registration of `id`.
    pub fn new(
        id: ButtonId,
        configuration: EventConfiguration,
        scheduler: &'r dyn Scheduler,
    ) -> Result<Self, Error> {
        Self::with_config(id, configuration, ButtonConfig::DEFAULT, scheduler)
    }

    /// Creates a monitor with custom thresholds and timings.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfig`] if `config` does not validate, otherwise any
    /// error of the registration.
    pub fn with_config(
        id: ButtonId,
        configuration: EventConfiguration,
        config: ButtonConfig,
        scheduler: &'r dyn Scheduler,
    ) -> Result<Self, Error> {
        config.validate()?;
        scheduler.register(id)?;
        Ok(Self {
            id,
            scheduler,
            config,
            configuration,
            sigma: config.sigma_min,
            pressed: false,
            hold_triggered: false,
            press_start: Instant::from_ticks(0),
        })
    }

    pub fn id(&self) -> ButtonId {
        self.id
    }

    /// Tests if this button is currently pressed (debounced).
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Current integrator value
    pub fn sigma(&self) -> u8 {
        self.sigma
    }

    pub fn event_configuration(&self) -> EventConfiguration {
        self.configuration
    }

    /// Changes which events this button generates, starting with the next tick.
    pub fn set_event_configuration(&mut self, configuration: EventConfiguration) {
        self.configuration = configuration;
    }

    /// Switches between simple and all events, returns the new configuration.
    pub fn toggle_event_configuration(&mut self) -> EventConfiguration {
        self.configuration = self.configuration.toggled();
        self.configuration
    }

    /// Feeds one sample into the state machine.
    ///
    /// `raw_asserted` is the normalized input (true while pressed or touched),
    /// `now` the monotonic time of this tick.
    ///
    /// Expects to be called at a fixed period of a few milliseconds: the
    /// debounce window is a number of samples, so a slow or irregular tick
    /// rate stretches it accordingly.
    pub fn on_tick(&mut self, raw_asserted: bool, now: Instant) -> TickEvents {
        let mut events = TickEvents::new();

        if raw_asserted {
            if self.sigma < self.config.sigma_max {
                self.sigma += 1;
            }
        } else if self.sigma > self.config.sigma_min {
            self.sigma -= 1;
        }

        // off -> on
        if self.sigma > self.config.sigma_thresh_hi && !self.pressed {
            self.pressed = true;
            self.press_start = now;
            self.push(&mut events, ButtonEventKind::Down);
        }

        // on -> off
        if self.sigma < self.config.sigma_thresh_lo && self.pressed {
            self.pressed = false;
            self.hold_triggered = false;
            self.push(&mut events, ButtonEventKind::Up);

            if self.configuration == EventConfiguration::All {
                let kind = if self.pressed_for(now) >= self.config.long_click_time {
                    ButtonEventKind::LongClick
                } else {
                    ButtonEventKind::Click
                };
                self.push(&mut events, kind);
            }
        }

        if self.pressed
            && !self.hold_triggered
            && self.pressed_for(now) >= self.config.hold_time
        {
            self.hold_triggered = true;
            self.push(&mut events, ButtonEventKind::Hold);
        }

        events
    }

    fn pressed_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.press_start)
    }

    fn push(&self, events: &mut TickEvents, kind: ButtonEventKind) {
        // Press and release edges are exclusive within a tick and hold never
        // follows a release, so at most `Down` + `Hold` or `Up` + classification.
        let pushed = events.push(ButtonEvent::new(self.id, kind)).is_ok();
        debug_assert!(pushed, "more than {MAX_EVENTS_PER_TICK} events in one tick");
    }
}

impl Drop for ButtonMonitor<'_> {
    fn drop(&mut self) {
        self.scheduler.deregister(self.id);
    }
}

/// A physical button: the pin it is wired to and the monitor debouncing it
pub struct Button<'r, P: PinSource> {
    pin: P,
    monitor: ButtonMonitor<'r>,
}

impl<'r, P: PinSource> Button<'r, P> {
    pub fn new(pin: P, monitor: ButtonMonitor<'r>) -> Self {
        Self { pin, monitor }
    }

    pub fn monitor(&self) -> &ButtonMonitor<'r> {
        &self.monitor
    }

    pub fn monitor_mut(&mut self) -> &mut ButtonMonitor<'r> {
        &mut self.monitor
    }
}

impl<P: PinSource> TickListener for Button<'_, P> {
    fn id(&self) -> ButtonId {
        self.monitor.id()
    }

    fn system_tick(&mut self, now: Instant, sink: &mut dyn EventSink) {
        let asserted = self.pin.is_asserted();
        for event in self.monitor.on_tick(asserted, now) {
            sink.emit(event);
        }
    }
}
