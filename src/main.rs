//! Binary entry point: parse the selection, open the bus connection,
//! run one command, exit with its code.

use clap::error::ErrorKind;
use clap::Parser;
use tracing::error;

use mboxctl::config::BusConfig;
use mboxctl::protocol::dispatcher::{self, Cli};
use mboxctl::protocol::response::ResponseCode;
use mboxctl::transport::BusTransport;
use mboxctl::utils::logging;

fn main() {
    logging::init();

    // Usage errors exit before any bus contact.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            std::process::exit(0);
        }
        Err(err) => {
            let _ = err.print();
            std::process::exit(ResponseCode::InvalidRequest.exit_code());
        }
    };

    let transport = match BusTransport::system(BusConfig::from_env()) {
        Ok(transport) => transport,
        Err(err) => {
            error!(error = %err, "failed to init dbus");
            std::process::exit(err.exit_code());
        }
    };

    let rc = match dispatcher::execute(cli.command(), &transport) {
        Ok(rc) => rc,
        Err(err) => {
            error!(error = %err, "command failed");
            err.exit_code()
        }
    };

    std::process::exit(rc);
}
