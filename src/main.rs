//! Button monitor firmware entry point
//!
//! Initializes the system and spawns the tick and orchestrator tasks.
//!
//! # Button Controls
//!
//! - **A**: click / long click logged, hold switches B between simple and all events
//! - **B**: click / long click logged, or only press and release in simple mode

#![no_std]
#![no_main]

use crate::task::{orchestrate::orchestrate, system_tick::system_tick};
use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use task::resources::{AssignedResources, ButtonResources};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Task implementations
mod task;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());

    // Split the resources into separate groups for each task
    let r = split_resources!(p);

    // Consumer first, the tick starts producing events right away
    spawner.spawn(orchestrate()).unwrap();
    spawner.spawn(system_tick(r.buttons)).unwrap();
}
