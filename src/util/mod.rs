//! Process-level helpers.

pub mod signal;

pub use signal::install_interrupt_handler;
