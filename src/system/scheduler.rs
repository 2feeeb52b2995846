//! Tick Scheduling
//!
//! Components that need to run on every system tick register their identity
//! with a [`Scheduler`]. The [`ComponentRegistry`] keeps track of those
//! identities and drives the registered [`TickListener`]s.
//!
//! The registry never owns the components. It holds identities only, so a
//! component that is dropped simply disappears from the set (see the `Drop`
//! implementation of [`ButtonMonitor`](crate::system::button::ButtonMonitor)).
//!
//! # Access Pattern
//! ```rust,ignore
//! static REGISTRY: ComponentRegistry<4> = ComponentRegistry::new();
//!
//! let monitor = ButtonMonitor::new(ButtonId::A, EventConfiguration::All, &REGISTRY)?;
//! let mut a = Button::new(pin_a, monitor);
//! let mut ticker = Ticker::every(TICK_PERIOD);
//! loop {
//!     ticker.next().await;
//!     REGISTRY.tick(&clock, &mut [&mut a], &mut sink);
//! }
//! ```

use crate::system::error::Error;
use crate::system::event::{ButtonId, EventSink};
use core::cell::RefCell;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::Instant;
use heapless::Vec;

/// Monotonic time source
pub trait Clock {
    fn now(&self) -> Instant;
}

/// A component invoked once per system tick
pub trait TickListener {
    /// Identity the listener registered with
    fn id(&self) -> ButtonId;

    /// Periodic callback, `now` is the time of the current tick
    fn system_tick(&mut self, now: Instant, sink: &mut dyn EventSink);
}

/// Registration side of the tick scheduler
pub trait Scheduler {
    fn register(&self, id: ButtonId) -> Result<(), Error>;

    /// Removes `id`, does nothing if it was not registered
    fn deregister(&self, id: ButtonId);
}

/// Fixed-capacity set of registered component identities
///
/// The set is protected by a critical-section mutex so it can live in a
/// `static` and be shared by reference between the components registering
/// themselves and the task driving the ticks.
pub struct ComponentRegistry<const N: usize> {
    ids: Mutex<CriticalSectionRawMutex, RefCell<Vec<ButtonId, N>>>,
}

impl<const N: usize> ComponentRegistry<N> {
    pub const fn new() -> Self {
        Self {
            ids: Mutex::new(RefCell::new(Vec::new())),
        }
    }

    pub fn is_registered(&self, id: ButtonId) -> bool {
        self.ids.lock(|ids| ids.borrow().contains(&id))
    }

    /// Number of registered components
    pub fn len(&self) -> usize {
        self.ids.lock(|ids| ids.borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs one system tick.
    ///
    /// Reads the clock once so every listener sees the same timestamp, then
    /// calls [`TickListener::system_tick`] on each listener whose identity is
    /// currently registered. Returns the number of listeners ticked.
    pub fn tick(
        &self,
        clock: &impl Clock,
        listeners: &mut [&mut dyn TickListener],
        sink: &mut dyn EventSink,
    ) -> usize {
        let now = clock.now();
        let mut ticked = 0;
        for listener in listeners.iter_mut() {
            if self.is_registered(listener.id()) {
                listener.system_tick(now, sink);
                ticked += 1;
            }
        }
        ticked
    }
}

impl<const N: usize> Default for ComponentRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Scheduler for ComponentRegistry<N> {
    fn register(&self, id: ButtonId) -> Result<(), Error> {
        self.ids.lock(|ids| {
            let mut ids = ids.borrow_mut();
            if ids.contains(&id) {
                return Err(Error::AlreadyRegistered);
            }
            ids.push(id).map_err(|_| Error::RegistryFull)
        })
    }

    fn deregister(&self, id: ButtonId) {
        self.ids.lock(|ids| {
            ids.borrow_mut().retain(|registered| *registered != id);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::event::{ButtonEvent, ButtonEventKind};

    struct FixedClock(Instant);

    impl Clock for FixedClock {
        fn now(&self) -> Instant {
            self.0
        }
    }

    /// Emits one `Down` per tick and remembers the last timestamp
    struct Recorder {
        id: ButtonId,
        last_tick: Option<Instant>,
    }

    impl Recorder {
        fn new(id: ButtonId) -> Self {
            Self {
                id,
                last_tick: None,
            }
        }
    }

    impl TickListener for Recorder {
        fn id(&self) -> ButtonId {
            self.id
        }

        fn system_tick(&mut self, now: Instant, sink: &mut dyn EventSink) {
            self.last_tick = Some(now);
            sink.emit(ButtonEvent::new(self.id, ButtonEventKind::Down));
        }
    }

    #[derive(Default)]
    struct Collect(std::vec::Vec<ButtonEvent>);

    impl EventSink for Collect {
        fn emit(&mut self, event: ButtonEvent) {
            self.0.push(event);
        }
    }

    #[test]
    fn test_register_and_deregister() {
        let registry = ComponentRegistry::<4>::new();
        assert!(registry.is_empty());

        assert_eq!(registry.register(ButtonId::A), Ok(()));
        assert_eq!(registry.register(ButtonId::B), Ok(()));
        assert_eq!(registry.len(), 2);
        assert!(registry.is_registered(ButtonId::A));

        registry.deregister(ButtonId::A);
        assert!(!registry.is_registered(ButtonId::A));
        assert!(registry.is_registered(ButtonId::B));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let registry = ComponentRegistry::<4>::new();
        registry.register(ButtonId::C).unwrap();
        assert_eq!(
            registry.register(ButtonId::C),
            Err(Error::AlreadyRegistered)
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_full() {
        let registry = ComponentRegistry::<2>::new();
        registry.register(ButtonId::A).unwrap();
        registry.register(ButtonId::B).unwrap();
        assert_eq!(registry.register(ButtonId::C), Err(Error::RegistryFull));

        // Freeing a slot makes room again
        registry.deregister(ButtonId::A);
        assert_eq!(registry.register(ButtonId::C), Ok(()));
    }

    #[test]
    fn test_deregister_unknown_is_noop() {
        let registry = ComponentRegistry::<2>::new();
        registry.register(ButtonId::A).unwrap();
        registry.deregister(ButtonId::D);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_tick_skips_unregistered_listeners() {
        let registry = ComponentRegistry::<4>::new();
        registry.register(ButtonId::A).unwrap();

        let mut a = Recorder::new(ButtonId::A);
        let mut b = Recorder::new(ButtonId::B);
        let clock = FixedClock(Instant::from_millis(42));
        let mut sink = Collect::default();

        let ticked = registry.tick(&clock, &mut [&mut a, &mut b], &mut sink);

        assert_eq!(ticked, 1);
        assert_eq!(a.last_tick, Some(Instant::from_millis(42)));
        assert_eq!(b.last_tick, None);
        assert_eq!(
            sink.0,
            [ButtonEvent::new(ButtonId::A, ButtonEventKind::Down)]
        );
    }
}
