//! Background services

pub mod status_sweep;

pub use status_sweep::{StatusSweeper, SweepReport};
