//! Freeblock - block and unblock websites by editing the hosts file.
//!
//! Blocking points a domain's entry at `0.0.0.0` and keeps the previous
//! address as a trailing comment; unblocking puts that address back. An
//! inline `#freeblock:HH-HH` comment forbids unblocking during those hours.

pub mod actions;
pub mod cli;
pub mod config;
pub mod error;
pub mod hosts;
pub mod platform;
pub mod reconcile;

pub use error::{Error, Result, TimingViolation};
