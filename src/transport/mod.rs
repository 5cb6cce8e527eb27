//! # Transport Layer
//!
//! Synchronous system-bus transport: one blocking method call per
//! command invocation, no pipelining, no application-level timeout.

pub mod bus;

pub use bus::{BusTransport, Transport};
