//! # Utility Modules
//!
//! Supporting utilities for console logging and flash-device discovery.
//!
//! ## Components
//! - **Logging**: timestamped console output, severity-routed between
//!   standard output and standard error
//! - **MTD**: locates the pnor flash partition in the kernel's listing

pub mod logging;
pub mod mtd;
