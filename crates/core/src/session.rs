//! Exclusive USB session with the mouse.
//!
//! The lighting protocol lives on HID interface 1, which the kernel's
//! generic HID driver normally owns. Opening a session detaches that driver
//! and claims the interface; closing releases it and hands the interface
//! back. Dropping an open session restores the kernel driver too, so a
//! failed transfer never leaves the mouse detached.

use std::time::Duration;

use rusb::{DeviceHandle, GlobalContext};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::transport::UsbPort;

/// HID interface carrying the vendor protocol.
pub const CONTROL_INTERFACE: u8 = 1;

/// Interrupt-in endpoint the mouse acknowledges reports on.
pub const INTERRUPT_IN_ENDPOINT: u8 = 0x82;

/// HID SET_REPORT class request.
const HID_SET_REPORT: u8 = 0x09;

/// Control transfer timeout.
const WRITE_TIMEOUT: Duration = Duration::from_secs(2);

/// Interrupt read timeout. Also what ends the stale-report drain loop.
const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// An open, claimed handle to one mouse.
pub struct DeviceSession {
    handle: DeviceHandle<GlobalContext>,
    interface: u8,
    reattach: bool,
    released: bool,
}

impl DeviceSession {
    /// Find the device by vendor/product ID and claim its control interface.
    ///
    /// Detaches the kernel driver first when one is bound to the interface;
    /// `close` (or drop) reattaches it.
    pub fn open(vid: u16, pid: u16) -> Result<Self> {
        let handle = rusb::open_device_with_vid_pid(vid, pid)
            .ok_or(Error::DeviceNotFound { vid, pid })?;

        let mut session = Self {
            handle,
            interface: CONTROL_INTERFACE,
            reattach: false,
            released: false,
        };

        let kernel_attached = match session.handle.kernel_driver_active(session.interface) {
            Ok(active) => active,
            // Platforms without kernel-driver management (e.g. Windows).
            Err(rusb::Error::NotSupported) => false,
            Err(e) => return Err(e.into()),
        };

        if kernel_attached {
            session.handle.detach_kernel_driver(session.interface)?;
            session.reattach = true;
            debug!(interface = session.interface, "detached kernel driver");
        }

        session.handle.claim_interface(session.interface)?;
        info!(
            vid = format_args!("0x{vid:04X}"),
            pid = format_args!("0x{pid:04X}"),
            interface = session.interface,
            "device session open"
        );

        Ok(session)
    }

    /// Release the interface and reattach the kernel driver.
    pub fn close(mut self) -> Result<()> {
        self.teardown()
    }

    fn teardown(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        self.handle.release_interface(self.interface)?;
        if self.reattach {
            self.handle.attach_kernel_driver(self.interface)?;
            debug!(interface = self.interface, "reattached kernel driver");
        }
        Ok(())
    }
}

impl Drop for DeviceSession {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        if self.handle.release_interface(self.interface).is_err() {
            warn!(interface = self.interface, "failed to release interface");
        }
        if self.reattach && self.handle.attach_kernel_driver(self.interface).is_err() {
            warn!(interface = self.interface, "failed to reattach kernel driver");
        }
    }
}

impl UsbPort for DeviceSession {
    fn write_report(&mut self, w_value: u16, data: &[u8]) -> Result<()> {
        let request_type = rusb::request_type(
            rusb::Direction::Out,
            rusb::RequestType::Class,
            rusb::Recipient::Interface,
        );
        self.handle.write_control(
            request_type,
            HID_SET_REPORT,
            w_value,
            self.interface as u16,
            data,
            WRITE_TIMEOUT,
        )?;
        Ok(())
    }

    fn read_report(&mut self, buf: &mut [u8]) -> Result<usize> {
        Ok(self
            .handle
            .read_interrupt(INTERRUPT_IN_ENDPOINT, buf, READ_TIMEOUT)?)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;

    // Hardware-free checks only; open() needs a live device.

    #[test]
    fn not_found_error_carries_both_ids() {
        let err = Error::DeviceNotFound {
            vid: crate::LOGITECH_VID,
            pid: crate::pids::G203_PRODIGY,
        };
        assert_eq!(err.to_string(), "device 046d:c084 not found");
    }
}
