//! # Response Interpretation
//!
//! Typed views over the single bytes the daemon sends back: the status
//! byte of every reply, the run-state byte of a status reply, and the
//! flash-modified byte of a resume request.
//!
//! The daemon's judgment is authoritative: error codes are mapped to
//! display text and exit codes, never retried or second-guessed.

use std::fmt;
use std::str::FromStr;

/// Status byte of a daemon reply (closed set).
///
/// The wire value for success is `0`; nonzero values are error kinds.
/// Codes outside the known range keep their raw byte so the process exit
/// code still identifies the failure by magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Success,
    InternalError,
    InvalidRequest,
    Rejected,
    HardwareError,
    Unknown(u8),
}

impl ResponseCode {
    /// Map a wire status byte to a response kind.
    pub fn from_code(code: u8) -> Self {
        match code {
            0x00 => Self::Success,
            0x01 => Self::InternalError,
            0x02 => Self::InvalidRequest,
            0x03 => Self::Rejected,
            0x04 => Self::HardwareError,
            other => Self::Unknown(other),
        }
    }

    /// The wire status byte.
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0x00,
            Self::InternalError => 0x01,
            Self::InvalidRequest => 0x02,
            Self::Rejected => 0x03,
            Self::HardwareError => 0x04,
            Self::Unknown(code) => code,
        }
    }

    /// Process exit code: the negation of the wire value, so success
    /// stays 0 and each failure kind keeps a distinct magnitude.
    pub fn exit_code(self) -> i32 {
        -i32::from(self.code())
    }

    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "Success",
            Self::InternalError => "Failed - Internal Error",
            Self::InvalidRequest => "Failed - Invalid Command or Request",
            Self::Rejected => "Failed - Request Rejected by Daemon",
            Self::HardwareError => "Failed - BMC Hardware Error",
            Self::Unknown(_) => "Failed - Unknown Error",
        })
    }
}

/// Daemon run state, carried as the one argument byte of a status reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonStatus {
    Active,
    Suspended,
}

impl DaemonStatus {
    /// Wire value reported while the daemon is serving flash access.
    pub const ACTIVE: u8 = 0x01;
    /// Wire value reported while flash access is inhibited.
    pub const SUSPENDED: u8 = 0x00;

    /// Any byte other than the active value reads as suspended.
    pub fn from_code(code: u8) -> Self {
        if code == Self::ACTIVE {
            Self::Active
        } else {
            Self::Suspended
        }
    }
}

impl fmt::Display for DaemonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "Active",
            Self::Suspended => "Suspended",
        })
    }
}

/// Whether flash content changed while the daemon was suspended, carried
/// as the one argument byte of a resume request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFlag {
    FlashModified,
    FlashNotModified,
}

impl ResumeFlag {
    /// Wire value of the resume argument byte.
    pub fn code(self) -> u8 {
        match self {
            Self::FlashModified => 0x01,
            Self::FlashNotModified => 0x00,
        }
    }
}

impl FromStr for ResumeFlag {
    type Err = String;

    /// Strict allow-list: exactly "0" or "1". Anything else is a usage
    /// error, never silently treated as "not modified".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::FlashNotModified),
            "1" => Ok(Self::FlashModified),
            other => Err(format!("resume argument must be 0 or 1, got {other:?}")),
        }
    }
}
