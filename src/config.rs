//! # Configuration Management
//!
//! Bus endpoint settings for the control client.
//!
//! The daemon's bus name, object path, interface, and method are fixed
//! constants shared with the daemon and almost never change. Overrides
//! exist so a renamed daemon, a test harness, or a non-BMC host can still
//! be driven without rebuilding.
//!
//! ## Configuration Sources
//! - Built-in defaults (the daemon's well-known names)
//! - TOML files via `from_file()`
//! - Environment overrides via `from_env()`

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ControlError, Result};

/// Well-known bus name of the mbox daemon.
pub const DBUS_NAME: &str = "org.openbmc.mboxd";

/// Object path the daemon exports its control interface on.
pub const DOBJ_NAME: &str = "/org/openbmc/mboxd";

/// Method carrying one (command, args) exchange.
pub const DBUS_METHOD: &str = "cmd";

/// Partition listing scanned for the pnor flash device.
pub const MTD_LISTING: &str = "/proc/mtd";

/// Bus endpoint configuration for one client run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BusConfig {
    /// Destination bus name the daemon owns.
    pub destination: String,

    /// Object path of the control interface.
    pub path: String,

    /// Interface name; matches the bus name for this daemon.
    pub interface: String,

    /// Method name for the command exchange.
    pub method: String,

    /// Partition listing consulted by MTD discovery.
    pub mtd_listing: String,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            destination: DBUS_NAME.to_string(),
            path: DOBJ_NAME.to_string(),
            interface: DBUS_NAME.to_string(),
            method: DBUS_METHOD.to_string(),
            mtd_listing: MTD_LISTING.to_string(),
        }
    }
}

impl BusConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| ControlError::Config(format!("failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| ControlError::Config(format!("failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ControlError::Config(format!("failed to parse TOML: {e}")))
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(name) = std::env::var("MBOXCTL_BUS_NAME") {
            config.destination = name;
        }

        if let Ok(path) = std::env::var("MBOXCTL_OBJECT_PATH") {
            config.path = path;
        }

        if let Ok(interface) = std::env::var("MBOXCTL_INTERFACE") {
            config.interface = interface;
        }

        if let Ok(listing) = std::env::var("MBOXCTL_MTD_LISTING") {
            config.mtd_listing = listing;
        }

        config
    }
}
