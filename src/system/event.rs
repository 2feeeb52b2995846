//! Button Events
//!
//! Defines the events produced by button monitors and the sink they are
//! delivered to.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;

/// Button identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    A,
    B,
    C,
    D,
}

/// Kinds of button events
///
/// Discriminants are the wire values handed to event consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ButtonEventKind {
    /// Debounced press edge
    Down = 1,
    /// Debounced release edge
    Up = 2,
    /// Released before the long click time
    Click = 3,
    /// Released at or after the long click time
    LongClick = 4,
    /// Still pressed after the hold time, once per press
    Hold = 5,
    /// Reserved for consumers correlating consecutive clicks, never emitted by a monitor
    DoubleClick = 6,
}

impl ButtonEventKind {
    /// Wire value of this event kind
    pub const fn value(self) -> u8 {
        self as u8
    }
}

/// An event emitted by a button monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    /// Button that produced the event
    pub source: ButtonId,
    /// What happened
    pub kind: ButtonEventKind,
}

impl ButtonEvent {
    pub const fn new(source: ButtonId, kind: ButtonEventKind) -> Self {
        Self { source, kind }
    }
}

/// Which events a button monitor generates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventConfiguration {
    /// Only `Down` and `Up`, click classification is left to another service
    Simple,
    /// `Down` and `Up` plus `Click` and `LongClick`
    #[default]
    All,
}

impl EventConfiguration {
    /// The other configuration
    pub const fn toggled(self) -> Self {
        match self {
            EventConfiguration::Simple => EventConfiguration::All,
            EventConfiguration::All => EventConfiguration::Simple,
        }
    }
}

/// Receiver of button events
///
/// Delivery is fire and forget, the monitor never waits for an acknowledgement.
pub trait EventSink {
    fn emit(&mut self, event: ButtonEvent);
}

/// Event sink feeding an embassy-sync channel
///
/// Uses `try_send` so the tick never blocks. Events that do not fit into the
/// channel are dropped and counted.
pub struct ChannelSink<'ch, M: RawMutex, const N: usize> {
    sender: Sender<'ch, M, ButtonEvent, N>,
    dropped: u32,
}

impl<'ch, M: RawMutex, const N: usize> ChannelSink<'ch, M, N> {
    pub fn new(sender: Sender<'ch, M, ButtonEvent, N>) -> Self {
        Self { sender, dropped: 0 }
    }

    /// Number of events lost because the channel was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Returns the drop counter and resets it
    pub fn take_dropped(&mut self) -> u32 {
        core::mem::take(&mut self.dropped)
    }
}

impl<M: RawMutex, const N: usize> EventSink for ChannelSink<'_, M, N> {
    fn emit(&mut self, event: ButtonEvent) {
        if self.sender.try_send(event).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
    use embassy_sync::channel::Channel;

    #[test]
    fn test_event_kind_values() {
        assert_eq!(ButtonEventKind::Down.value(), 1);
        assert_eq!(ButtonEventKind::Up.value(), 2);
        assert_eq!(ButtonEventKind::Click.value(), 3);
        assert_eq!(ButtonEventKind::LongClick.value(), 4);
        assert_eq!(ButtonEventKind::Hold.value(), 5);
        assert_eq!(ButtonEventKind::DoubleClick.value(), 6);
    }

    #[test]
    fn test_default_configuration_is_all() {
        assert_eq!(EventConfiguration::default(), EventConfiguration::All);
    }

    #[test]
    fn test_configuration_toggle() {
        assert_eq!(
            EventConfiguration::All.toggled(),
            EventConfiguration::Simple
        );
        assert_eq!(
            EventConfiguration::Simple.toggled(),
            EventConfiguration::All
        );
    }

    #[test]
    fn test_channel_sink_delivers_in_order() {
        let channel: Channel<CriticalSectionRawMutex, ButtonEvent, 4> = Channel::new();
        let mut sink = ChannelSink::new(channel.sender());

        sink.emit(ButtonEvent::new(ButtonId::A, ButtonEventKind::Up));
        sink.emit(ButtonEvent::new(ButtonId::A, ButtonEventKind::Click));

        let receiver = channel.receiver();
        assert_eq!(
            receiver.try_receive().ok(),
            Some(ButtonEvent::new(ButtonId::A, ButtonEventKind::Up))
        );
        assert_eq!(
            receiver.try_receive().ok(),
            Some(ButtonEvent::new(ButtonId::A, ButtonEventKind::Click))
        );
        assert!(receiver.try_receive().is_err());
        assert_eq!(sink.dropped(), 0);
    }

    #[test]
    fn test_channel_sink_counts_dropped_events() {
        let channel: Channel<CriticalSectionRawMutex, ButtonEvent, 1> = Channel::new();
        let mut sink = ChannelSink::new(channel.sender());

        sink.emit(ButtonEvent::new(ButtonId::B, ButtonEventKind::Down));
        sink.emit(ButtonEvent::new(ButtonId::B, ButtonEventKind::Hold));
        sink.emit(ButtonEvent::new(ButtonId::B, ButtonEventKind::Up));
        assert_eq!(sink.dropped(), 2);

        // First event survived, the rest never entered the channel
        assert_eq!(
            channel.try_receive().ok(),
            Some(ButtonEvent::new(ButtonId::B, ButtonEventKind::Down))
        );
        assert!(channel.try_receive().is_err());

        assert_eq!(sink.take_dropped(), 2);
        assert_eq!(sink.dropped(), 0);
    }
}
