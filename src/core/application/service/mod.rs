pub mod capability_gate;
pub mod command_service;
pub mod guest_aggregator;
