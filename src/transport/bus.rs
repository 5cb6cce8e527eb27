//! # Bus Transport
//!
//! Carries one request/reply exchange over the host's system D-Bus.
//!
//! The connection is acquired once per process run and dropped at exit.
//! Each call is strictly synchronous: the calling thread suspends until
//! the daemon replies or the bus reports a delivery failure. No
//! application-level timeout is imposed beyond the bus default.

use tracing::debug;
use zbus::blocking::Connection;

use crate::config::BusConfig;
use crate::core::message::{Message, RawReply};
use crate::error::{ControlError, Result};

/// Request/reply seam between command handlers and the bus.
///
/// Handlers borrow a transport for the duration of one exchange; tests
/// substitute an in-memory implementation.
pub trait Transport {
    /// Perform one blocking call and return the undecoded reply body.
    fn call(&self, msg: &Message) -> Result<RawReply>;
}

/// Transport backed by the host system bus.
pub struct BusTransport {
    connection: Connection,
    config: BusConfig,
}

impl BusTransport {
    /// Connect to the system bus.
    ///
    /// Acquired exactly once per process run; the connection is released
    /// when the transport drops at process exit.
    pub fn system(config: BusConfig) -> Result<Self> {
        let connection = Connection::system().map_err(ControlError::Connect)?;
        Ok(Self { connection, config })
    }
}

impl Transport for BusTransport {
    fn call(&self, msg: &Message) -> Result<RawReply> {
        debug!(command = %msg.command(), args = msg.args().len(), "calling daemon");

        // Request body is (command byte, argument byte array), reply body
        // is (status byte, argument byte array): signature "yay" both ways.
        let reply = self
            .connection
            .call_method(
                Some(self.config.destination.as_str()),
                self.config.path.as_str(),
                Some(self.config.interface.as_str()),
                self.config.method.as_str(),
                &(msg.command().code(), msg.args()),
            )
            .map_err(ControlError::Call)?;

        let (status, args): (u8, Vec<u8>) =
            reply.body().deserialize().map_err(ControlError::Reply)?;

        debug!(status, args = args.len(), "daemon replied");

        Ok(RawReply { status, args })
    }
}
