//! Orchestrator Module
//!
//! Receives button events from the system tick and reacts to them.

use crate::task::system_tick;
use button_monitor::system::event::{ButtonEvent, ButtonEventKind, ButtonId};
use defmt::{debug, info};

/// Main orchestrator task
///
/// Listens for button events and runs the matching button actions.
#[embassy_executor::task]
pub async fn orchestrate() {
    info!("Orchestrator started");
    loop {
        let event = system_tick::wait().await;
        handle_button_event(event);
    }
}

/// Handles a single button event
///
/// # Actions
/// - Any edge is logged
/// - Click and long click are logged with their button
/// - Holding A switches B between simple and all events
fn handle_button_event(event: ButtonEvent) {
    match (event.source, event.kind) {
        (id, ButtonEventKind::Down | ButtonEventKind::Up) => {
            debug!("Button {} {}", id, event.kind);
        }
        (id, ButtonEventKind::Click) => {
            info!("Button {} clicked", id);
        }
        (id, ButtonEventKind::LongClick) => {
            info!("Button {} long clicked", id);
        }
        (ButtonId::A, ButtonEventKind::Hold) => {
            if system_tick::request_configuration_toggle(ButtonId::B) {
                info!("Button A held, switching button B events");
            }
        }
        (id, ButtonEventKind::Hold) => {
            info!("Button {} held", id);
        }
        // Never produced by the monitors
        (_, ButtonEventKind::DoubleClick) => (),
    }
}
