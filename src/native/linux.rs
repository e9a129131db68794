use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::os::fd::AsRawFd;
use std::path::Path;
use std::time::Duration;

use crate::port::{ExtensionPort, TransportError, CONVERSION_DELAY_US, I2C_ADDRESS};

mod ioctl {
    // linux/i2c-dev.h
    nix::ioctl_write_int_bad!(set_slave_address, 0x0703);
}

/// Controller on a Linux i2c-dev bus such as `/dev/i2c-1`.
#[derive(Debug)]
pub struct LinuxPort {
    bus: File,
    conversion_delay: Duration,
}

impl LinuxPort {
    /// Opens the bus and selects the default controller address.
    ///
    /// # Errors
    ///
    /// This function will return an error if the bus can not be opened or the address not selected.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TransportError> {
        Self::open_with_address(path, I2C_ADDRESS)
    }

    /// Opens the bus and selects `address`.
    ///
    /// # Errors
    ///
    /// This function will return an error if the bus can not be opened or the address not selected.
    pub fn open_with_address(path: impl AsRef<Path>, address: u8) -> Result<Self, TransportError> {
        let bus = OpenOptions::new().read(true).write(true).open(path.as_ref())?;

        // SAFETY: the descriptor belongs to `bus`, which is open for the whole call.
        unsafe { ioctl::set_slave_address(bus.as_raw_fd(), address.into()) }?;
        log::debug!("Opened {} at address {address:#04x}", path.as_ref().display());

        Ok(Self {
            bus,
            conversion_delay: Duration::from_micros(CONVERSION_DELAY_US.into()),
        })
    }

    /// Changes the wait between setting the register pointer and reading.
    pub fn set_conversion_delay(&mut self, delay: Duration) {
        self.conversion_delay = delay;
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        let written = self.bus.write(bytes)?;
        if written == bytes.len() {
            Ok(())
        } else {
            Err(TransportError::Nack)
        }
    }
}

impl ExtensionPort for LinuxPort {
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), TransportError> {
        self.write_all(&[register, value])
    }

    fn read_data(&mut self, pointer: u8, buffer: &mut [u8]) -> Result<(), TransportError> {
        self.write_all(&[pointer])?;
        std::thread::sleep(self.conversion_delay);

        let bytes_read = self.bus.read(buffer)?;
        if bytes_read == buffer.len() {
            Ok(())
        } else {
            Err(TransportError::Nack)
        }
    }
}
