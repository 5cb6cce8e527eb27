//! # Wire Codec
//!
//! Builds request messages and decodes reply bodies for the daemon's
//! control method.
//!
//! ## Wire Format
//! ```text
//! request:  [command(1)] [args(N)]    N fixed per command
//! reply:    [status(1)]  [args(M)]    M >= expected, extra bytes ignored
//! ```
//!
//! Both sides of the exchange are byte-exact constants shared with the
//! daemon; an incompatible change here breaks both ends at once.

use std::fmt;

use crate::error::{ControlError, Result};
use crate::protocol::response::ResponseCode;

/// Control commands understood by the daemon (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Status,
    Reset,
    Suspend,
    Resume,
    FlashModified,
}

impl Command {
    /// Wire command byte.
    pub fn code(self) -> u8 {
        match self {
            Self::Ping => 0x00,
            Self::Status => 0x01,
            Self::Reset => 0x02,
            Self::Suspend => 0x03,
            Self::Resume => 0x04,
            Self::FlashModified => 0x05,
        }
    }

    /// Fixed number of request argument bytes.
    pub fn request_arity(self) -> usize {
        match self {
            Self::Resume => 1,
            _ => 0,
        }
    }

    /// Fixed number of reply argument bytes the daemon must return.
    /// Longer replies are tolerated, shorter ones are malformed.
    pub fn reply_arity(self) -> usize {
        match self {
            Self::Status => 1,
            _ => 0,
        }
    }

    /// Human-readable command name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ping => "ping",
            Self::Status => "status",
            Self::Reset => "reset",
            Self::Suspend => "suspend",
            Self::Resume => "resume",
            Self::FlashModified => "flash-modified",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One request message, built immediately before a bus call and dropped
/// once the call returns. Holds the invariant that the argument count
/// matches the command's fixed arity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    command: Command,
    args: Vec<u8>,
}

impl Message {
    /// Build a request, enforcing the command's argument arity.
    pub fn new(command: Command, args: Vec<u8>) -> Result<Self> {
        if args.len() != command.request_arity() {
            return Err(ControlError::ArityMismatch {
                command: command.name(),
                expected: command.request_arity(),
                got: args.len(),
            });
        }
        Ok(Self { command, args })
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn args(&self) -> &[u8] {
        &self.args
    }
}

/// Undecoded reply body: the status byte plus whatever argument bytes
/// the daemon sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawReply {
    pub status: u8,
    pub args: Vec<u8>,
}

/// Decode a reply against the caller's expected argument count.
///
/// Accepts at least `expected` argument bytes: longer replies are
/// silently truncated, shorter replies fail as malformed.
pub fn decode(expected: usize, reply: RawReply) -> Result<(ResponseCode, Vec<u8>)> {
    if reply.args.len() < expected {
        return Err(ControlError::MalformedResponse {
            expected,
            got: reply.args.len(),
        });
    }

    let mut args = reply.args;
    args.truncate(expected);

    Ok((ResponseCode::from_code(reply.status), args))
}
