//! USB port abstraction for device communication.
//!
//! Provides a trait-based seam so that the real device session and mock
//! ports used in tests share the same interface.

use crate::error::Result;

/// Size of every report the mouse sends back, in bytes.
pub const REPORT_LEN: usize = 20;

/// Abstraction over the mouse's control-out / interrupt-in report channel.
pub trait UsbPort {
    /// Write one output report via a SET_REPORT control transfer.
    fn write_report(&mut self, w_value: u16, data: &[u8]) -> Result<()>;

    /// Blocking read of one report from the interrupt-in endpoint.
    ///
    /// Returns the number of bytes read; times out with an error when the
    /// device has nothing queued.
    fn read_report(&mut self, buf: &mut [u8]) -> Result<usize>;
}

/// A scriptable mock port for testing.
///
/// Records every write and replays a queued sequence of reports. A queued
/// `Timeout` entry (and an exhausted queue) behaves like the real interrupt
/// endpoint running dry.
#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::error::Error;
    use std::collections::VecDeque;

    #[derive(Default)]
    pub struct MockPort {
        /// Every write issued, as (wValue, payload) pairs in order.
        pub writes: Vec<(u16, Vec<u8>)>,
        reads: VecDeque<Option<[u8; REPORT_LEN]>>,
        /// When set, the next write fails with a pipe error.
        pub fail_next_write: bool,
    }

    impl MockPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue a report for the next read.
        pub fn queue_report(&mut self, report: [u8; REPORT_LEN]) {
            self.reads.push_back(Some(report));
        }

        /// Queue an all-zero acknowledgement report.
        pub fn queue_ack(&mut self) {
            self.queue_report([0u8; REPORT_LEN]);
        }

        /// Queue a timeout: the read at this position fails as if the
        /// endpoint had nothing more to deliver.
        pub fn queue_timeout(&mut self) {
            self.reads.push_back(None);
        }

        /// Payloads written so far, rendered as lowercase hex.
        pub fn written_hex(&self) -> Vec<String> {
            self.writes
                .iter()
                .map(|(_, data)| data.iter().map(|b| format!("{b:02x}")).collect())
                .collect()
        }
    }

    impl UsbPort for MockPort {
        fn write_report(&mut self, w_value: u16, data: &[u8]) -> Result<()> {
            if self.fail_next_write {
                self.fail_next_write = false;
                return Err(Error::Usb(rusb::Error::Pipe));
            }
            self.writes.push((w_value, data.to_vec()));
            Ok(())
        }

        fn read_report(&mut self, buf: &mut [u8]) -> Result<usize> {
            match self.reads.pop_front() {
                Some(Some(report)) => {
                    let n = report.len().min(buf.len());
                    buf[..n].copy_from_slice(&report[..n]);
                    Ok(n)
                }
                Some(None) | None => Err(Error::Usb(rusb::Error::Timeout)),
            }
        }
    }
}
