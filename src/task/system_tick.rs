//! System Tick
//!
//! Samples all buttons at a fixed rate and publishes their events.
//!
//! The tick task owns the buttons. Other tasks receive events through
//! [`wait()`] and switch a button's event configuration through
//! [`request_configuration_toggle()`], which is applied before the next tick.
//! The configuration itself only lives in the button's monitor.

use crate::task::resources::{ButtonResources, EmbassyClock, GpioPin};
use button_monitor::system::button::{Button, ButtonMonitor};
use button_monitor::system::config::TICK_PERIOD;
use button_monitor::system::event::{ButtonEvent, ButtonId, ChannelSink, EventConfiguration};
use button_monitor::system::pin::ActiveLevel;
use button_monitor::system::scheduler::ComponentRegistry;
use defmt::{info, warn};
use embassy_rp::gpio::{Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Ticker;

/// Maximum number of components driven by the tick
const MAX_COMPONENTS: usize = 4;

/// Components currently driven by the tick
static REGISTRY: ComponentRegistry<MAX_COMPONENTS> = ComponentRegistry::new();

/// Button events, consumed by the orchestrator
static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, ButtonEvent, 16> = Channel::new();

/// Buttons waiting for their event configuration to be switched
static TOGGLE_REQUESTS: Channel<CriticalSectionRawMutex, ButtonId, 4> = Channel::new();

/// Receives the next button event
pub async fn wait() -> ButtonEvent {
    EVENT_CHANNEL.receiver().receive().await
}

/// Asks the tick task to switch a button between simple and all events.
///
/// Returns false if the request queue is full, the configuration stays as it is.
pub fn request_configuration_toggle(id: ButtonId) -> bool {
    match TOGGLE_REQUESTS.try_send(id) {
        Ok(()) => true,
        Err(_) => {
            warn!("Configuration toggle for button {} dropped", id);
            false
        }
    }
}

/// Button sampling task
///
/// Runs every [`TICK_PERIOD`] for the lifetime of the firmware.
#[embassy_executor::task]
pub async fn system_tick(r: ButtonResources) {
    let mut button_a = Button::new(
        GpioPin::new(Input::new(r.btn_a, Pull::Up), ActiveLevel::Low),
        ButtonMonitor::new(ButtonId::A, EventConfiguration::All, &REGISTRY).unwrap(),
    );
    let mut button_b = Button::new(
        GpioPin::new(Input::new(r.btn_b, Pull::Up), ActiveLevel::Low),
        ButtonMonitor::new(ButtonId::B, EventConfiguration::All, &REGISTRY).unwrap(),
    );
    info!("System tick started with {} buttons", REGISTRY.len());

    let clock = EmbassyClock;
    let mut sink = ChannelSink::new(EVENT_CHANNEL.sender());
    let mut ticker = Ticker::every(TICK_PERIOD);

    loop {
        ticker.next().await;

        while let Ok(id) = TOGGLE_REQUESTS.try_receive() {
            for button in [&mut button_a, &mut button_b] {
                let monitor = button.monitor_mut();
                if monitor.id() == id {
                    let configuration = monitor.toggle_event_configuration();
                    info!("Button {} event configuration: {}", id, configuration);
                }
            }
        }

        REGISTRY.tick(&clock, &mut [&mut button_a, &mut button_b], &mut sink);

        let dropped = sink.take_dropped();
        if dropped > 0 {
            warn!("Event channel full, dropped {} button events", dropped);
        }
    }
}
