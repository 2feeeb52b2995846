//! Button monitor library - debounced button and touch pad events.
//!
//! Contains the state machine and its collaborators as plain, host-testable
//! code. The firmware binary (`main.rs`) wires it to the RP2350 GPIOs, the
//! embassy clock and a fixed-rate ticker.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the standard
//! test framework while the firmware runs as `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]

/// Debouncing state machine and its collaborators
pub mod system;
