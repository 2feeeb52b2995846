//! Core components for button monitoring
pub mod button;
pub mod config;
pub mod error;
pub mod event;
pub mod pin;
pub mod scheduler;
