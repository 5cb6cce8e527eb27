//! Flash-partition discovery.
//!
//! The kernel lists MTD partitions one per line, e.g.
//! `mtd4: 02000000 00010000 "pnor"`; the device node for a partition is
//! `/dev/<name before the colon>`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::MTD_LISTING;

/// Substring identifying the flash partition of interest.
const PNOR_PART: &str = "pnor";

/// Locate the pnor flash partition in the system MTD listing.
///
/// Returns `None` when the listing is unreadable, empty, or has no
/// matching partition.
pub fn find_pnor_device() -> Option<String> {
    find_pnor_device_in(MTD_LISTING)
}

/// Locate the pnor flash partition in the listing at `listing`.
pub fn find_pnor_device_in<P: AsRef<Path>>(listing: P) -> Option<String> {
    let file = File::open(listing).ok()?;
    scan(BufReader::new(file))
}

fn is_pnor_part(line: &str) -> bool {
    line.to_ascii_lowercase().contains(PNOR_PART)
}

fn scan<R: BufRead>(mut reader: R) -> Option<String> {
    let mut line = String::new();

    loop {
        line.clear();
        let read = reader.read_line(&mut line).ok()?;
        if read == 0 {
            return None;
        }

        // A line without its trailing newline was cut short; stop rather
        // than match against a partial partition name.
        let stripped = line.strip_suffix('\n')?;

        if is_pnor_part(stripped) {
            let (name, _) = stripped.split_once(':')?;
            return Some(format!("/dev/{name}"));
        }
    }
}
