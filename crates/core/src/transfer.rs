//! Transfer executor: pushes one encoded command through the device.
//!
//! Every write is a SET_REPORT control transfer, and the mouse acknowledges
//! each one with a 20-byte report on the interrupt-in endpoint. That
//! acknowledgement read is mandatory; skipping it leaves the report queued
//! and desynchronizes later commands.

use tracing::{debug, trace};

use crate::command::Command;
use crate::error::Result;
use crate::transport::{UsbPort, REPORT_LEN};

/// Per-command transfer options.
#[derive(Debug, Clone, Copy, Default)]
pub struct SendOptions {
    /// Send the onboard-memory bypass report ahead of the command.
    pub bypass_onboard_memory: bool,
    /// Drain stale effect reports before and after the command.
    pub flush_read_buffer: bool,
}

/// Send one command, with its mandatory acknowledgement reads.
pub fn send_command(port: &mut dyn UsbPort, command: &Command, options: &SendOptions) -> Result<()> {
    if options.flush_read_buffer {
        drain_stale_reports(port);
    }

    if options.bypass_onboard_memory {
        let bypass = Command::bypass_onboard_memory();
        write_and_ack(port, &bypass)?;
    }

    write_and_ack(port, command)?;

    if command.needs_apply() {
        let apply = Command::apply_triple();
        write_and_ack(port, &apply)?;
    }

    if options.flush_read_buffer {
        drain_stale_reports(port);
    }

    Ok(())
}

/// Read queued reports off the interrupt endpoint until it runs dry.
///
/// The endpoint only signals "empty" by erroring (usually a timeout), so any
/// read failure here is the normal end of the buffer, not a fault. Returns
/// how many reports were discarded.
pub fn drain_stale_reports(port: &mut dyn UsbPort) -> usize {
    let mut buf = [0u8; REPORT_LEN];
    let mut count = 0;
    while port.read_report(&mut buf).is_ok() {
        count += 1;
    }
    if count > 0 {
        debug!(count, "drained stale reports");
    }
    count
}

fn write_and_ack(port: &mut dyn UsbPort, command: &Command) -> Result<()> {
    trace!(
        w_value = format_args!("0x{:04X}", command.w_value()),
        payload = %command.to_hex(),
        "TX report"
    );
    port.write_report(command.w_value(), command.payload())?;

    let mut ack = [0u8; REPORT_LEN];
    let n = port.read_report(&mut ack)?;
    trace!(report = format_args!("{:02x?}", &ack[..n]), "RX ack");
    Ok(())
}
