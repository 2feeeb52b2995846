pub mod orchestrate;
pub mod resources;
pub mod system_tick;
