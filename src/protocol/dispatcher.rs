//! # Command Dispatch
//!
//! Parses the command-line selection into the closed command set and
//! runs exactly one request/response exchange against the daemon.
//!
//! Each recognized flag maps to one handler; each handler builds one
//! request, performs one blocking call, decodes the reply, prints the
//! outcome, and returns the process exit code (the negation of the
//! daemon's response code). Usage errors never reach the transport.

use clap::{ArgGroup, Parser};
use tracing::error;

use crate::core::message::{decode, Command, Message};
use crate::error::Result;
use crate::protocol::response::{DaemonStatus, ResumeFlag};
use crate::transport::Transport;

/// Control the mbox daemon bridging host flash access.
#[derive(Debug, Parser)]
#[command(name = "mboxctl", version, about)]
#[command(group(
    ArgGroup::new("command").required(true).args([
        "ping",
        "status",
        "reset",
        "point_to_flash",
        "suspend",
        "resume",
        "flash_modified",
    ]),
))]
pub struct Cli {
    /// Ping the daemon
    #[arg(long)]
    ping: bool,

    /// Check status of the daemon
    #[arg(long)]
    status: bool,

    /// Hard reset the daemon state
    #[arg(long)]
    reset: bool,

    /// Point the lpc mapping back to flash (alias of --reset)
    #[arg(long)]
    point_to_flash: bool,

    /// Suspend the daemon to inhibit flash accesses
    #[arg(long)]
    suspend: bool,

    /// Resume the daemon; whether flash was modified (0 - no | 1 - yes)
    #[arg(long, value_name = "MODIFIED")]
    resume: Option<ResumeFlag>,

    /// Tell the daemon to discard its cache
    #[arg(long)]
    flash_modified: bool,
}

impl Cli {
    /// Collapse the selection flags into the closed command set.
    ///
    /// The argument group guarantees exactly one flag is set, so the
    /// final arm can only be flash-modified.
    pub fn command(&self) -> ControlCommand {
        if self.ping {
            ControlCommand::Ping
        } else if self.status {
            ControlCommand::Status
        } else if self.reset || self.point_to_flash {
            ControlCommand::Reset
        } else if self.suspend {
            ControlCommand::Suspend
        } else if let Some(flag) = self.resume {
            ControlCommand::Resume(flag)
        } else {
            ControlCommand::FlashModified
        }
    }
}

/// One variant per daemon operation; `--point-to-flash` parses to Reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    Ping,
    Status,
    Reset,
    Suspend,
    Resume(ResumeFlag),
    FlashModified,
}

/// Run one command against the daemon and return the process exit code.
///
/// Transport failures propagate as errors for the caller to log and map;
/// daemon-reported failures come back as a negative exit code with their
/// outcome already printed.
pub fn execute(command: ControlCommand, transport: &dyn Transport) -> Result<i32> {
    match command {
        ControlCommand::Ping => simple(transport, Command::Ping, "Ping"),
        ControlCommand::Status => handle_status(transport),
        ControlCommand::Reset => simple(transport, Command::Reset, "Reset"),
        ControlCommand::Suspend => simple(transport, Command::Suspend, "Suspend"),
        ControlCommand::Resume(flag) => handle_resume(transport, flag),
        ControlCommand::FlashModified => {
            simple(transport, Command::FlashModified, "Flash Modified")
        }
    }
}

/// Zero-argument request, zero-argument reply, one line of output.
fn simple(transport: &dyn Transport, command: Command, label: &str) -> Result<i32> {
    let msg = Message::new(command, Vec::new())?;
    let reply = transport.call(&msg)?;
    let (code, _) = decode(command.reply_arity(), reply)?;

    println!("{label}: {code}");
    Ok(code.exit_code())
}

fn handle_status(transport: &dyn Transport) -> Result<i32> {
    let msg = Message::new(Command::Status, Vec::new())?;
    let reply = transport.call(&msg)?;
    let (code, args) = decode(Command::Status.reply_arity(), reply)?;

    if !code.is_success() {
        error!(code = code.code(), "status command failed");
        return Ok(code.exit_code());
    }

    println!("Daemon Status: {}", DaemonStatus::from_code(args[0]));
    Ok(code.exit_code())
}

fn handle_resume(transport: &dyn Transport, flag: ResumeFlag) -> Result<i32> {
    let msg = Message::new(Command::Resume, vec![flag.code()])?;
    let reply = transport.call(&msg)?;
    let (code, _) = decode(Command::Resume.reply_arity(), reply)?;

    println!("Resume: {code}");
    Ok(code.exit_code())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::cell::RefCell;
    use std::io;
    use std::sync::Arc;

    use super::*;
    use crate::core::message::RawReply;
    use crate::error::ControlError;

    /// In-memory transport recording every request it sees.
    struct MockTransport {
        status: u8,
        args: Vec<u8>,
        fail: bool,
        calls: RefCell<Vec<Message>>,
    }

    impl MockTransport {
        fn replying(status: u8, args: &[u8]) -> Self {
            Self {
                status,
                args: args.to_vec(),
                fail: false,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                status: 0,
                args: Vec::new(),
                fail: true,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for MockTransport {
        fn call(&self, msg: &Message) -> Result<RawReply> {
            self.calls.borrow_mut().push(msg.clone());
            if self.fail {
                return Err(ControlError::Call(zbus::Error::InputOutput(Arc::new(
                    io::Error::from(io::ErrorKind::ConnectionRefused),
                ))));
            }
            Ok(RawReply {
                status: self.status,
                args: self.args.clone(),
            })
        }
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_ping_success_exits_zero() {
        let transport = MockTransport::replying(0x00, &[]);
        let rc = execute(ControlCommand::Ping, &transport).unwrap();
        assert_eq!(rc, 0);

        let calls = transport.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].command().code(), 0x00);
        assert!(calls[0].args().is_empty());
    }

    #[test]
    fn test_status_reads_one_state_byte() {
        let transport = MockTransport::replying(0x00, &[DaemonStatus::ACTIVE]);
        let rc = execute(ControlCommand::Status, &transport).unwrap();
        assert_eq!(rc, 0);

        let transport = MockTransport::replying(0x00, &[DaemonStatus::SUSPENDED]);
        let rc = execute(ControlCommand::Status, &transport).unwrap();
        assert_eq!(rc, 0);
    }

    #[test]
    fn test_status_without_state_byte_is_malformed() {
        let transport = MockTransport::replying(0x00, &[]);
        let err = execute(ControlCommand::Status, &transport).unwrap_err();
        assert!(matches!(
            err,
            ControlError::MalformedResponse {
                expected: 1,
                got: 0,
            }
        ));
    }

    #[test]
    fn test_status_error_reply_without_state_byte_is_malformed() {
        // The at-least-one-byte policy applies before the status check.
        let transport = MockTransport::replying(0x03, &[]);
        let err = execute(ControlCommand::Status, &transport).unwrap_err();
        assert!(matches!(err, ControlError::MalformedResponse { .. }));
    }

    #[test]
    fn test_status_error_reply_keeps_daemon_exit_code() {
        let transport = MockTransport::replying(0x01, &[0x00]);
        let rc = execute(ControlCommand::Status, &transport).unwrap();
        assert_eq!(rc, -1);
    }

    #[test]
    fn test_resume_sends_flash_modified_byte() {
        let transport = MockTransport::replying(0x00, &[]);
        let rc = execute(
            ControlCommand::Resume(ResumeFlag::FlashModified),
            &transport,
        )
        .unwrap();
        assert_eq!(rc, 0);

        let calls = transport.calls.borrow();
        assert_eq!(calls[0].command().code(), 0x04);
        assert_eq!(calls[0].args(), &[0x01]);
    }

    #[test]
    fn test_resume_not_modified_byte() {
        let transport = MockTransport::replying(0x00, &[]);
        execute(
            ControlCommand::Resume(ResumeFlag::FlashNotModified),
            &transport,
        )
        .unwrap();
        assert_eq!(transport.calls.borrow()[0].args(), &[0x00]);
    }

    #[test]
    fn test_daemon_error_becomes_negative_exit_code() {
        let transport = MockTransport::replying(0x03, &[]);
        let rc = execute(ControlCommand::Suspend, &transport).unwrap();
        assert_eq!(rc, -3);
    }

    #[test]
    fn test_transport_failure_maps_to_internal_error() {
        let transport = MockTransport::failing();
        let err = execute(ControlCommand::Ping, &transport).unwrap_err();
        assert_eq!(err.exit_code(), -1);
    }

    #[test]
    fn test_every_flag_selects_its_command() {
        assert_eq!(parse(&["mboxctl", "--ping"]).command(), ControlCommand::Ping);
        assert_eq!(
            parse(&["mboxctl", "--status"]).command(),
            ControlCommand::Status
        );
        assert_eq!(
            parse(&["mboxctl", "--reset"]).command(),
            ControlCommand::Reset
        );
        assert_eq!(
            parse(&["mboxctl", "--suspend"]).command(),
            ControlCommand::Suspend
        );
        assert_eq!(
            parse(&["mboxctl", "--resume", "1"]).command(),
            ControlCommand::Resume(ResumeFlag::FlashModified)
        );
        assert_eq!(
            parse(&["mboxctl", "--resume", "0"]).command(),
            ControlCommand::Resume(ResumeFlag::FlashNotModified)
        );
        assert_eq!(
            parse(&["mboxctl", "--flash-modified"]).command(),
            ControlCommand::FlashModified
        );
    }

    #[test]
    fn test_point_to_flash_aliases_reset() {
        assert_eq!(
            parse(&["mboxctl", "--point-to-flash"]).command(),
            ControlCommand::Reset
        );
    }

    #[test]
    fn test_selection_is_required_and_exclusive() {
        assert!(Cli::try_parse_from(["mboxctl"]).is_err());
        assert!(Cli::try_parse_from(["mboxctl", "--ping", "--status"]).is_err());
        assert!(Cli::try_parse_from(["mboxctl", "--bogus"]).is_err());
    }

    #[test]
    fn test_resume_argument_is_strictly_validated() {
        assert!(Cli::try_parse_from(["mboxctl", "--resume"]).is_err());
        assert!(Cli::try_parse_from(["mboxctl", "--resume", "2"]).is_err());
        assert!(Cli::try_parse_from(["mboxctl", "--resume", "yes"]).is_err());
    }
}
