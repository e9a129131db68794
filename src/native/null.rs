use std::path::Path;

use crate::port::{ExtensionPort, TransportError};

fn unsupported() -> TransportError {
    static WARNING_PRINTED: std::sync::Once = std::sync::Once::new();
    WARNING_PRINTED.call_once(|| {
        log::warn!("This platform has no native I2C support, use HalPort instead.");
    });
    TransportError::Io(std::io::ErrorKind::Unsupported)
}

/// Stand-in for platforms without an i2c-dev interface. Opening always fails.
#[derive(Debug)]
pub struct NullPort;

impl NullPort {
    /// # Errors
    ///
    /// Always fails, this platform has no native bus.
    pub fn open(_path: impl AsRef<Path>) -> Result<Self, TransportError> {
        Err(unsupported())
    }

    /// # Errors
    ///
    /// Always fails, this platform has no native bus.
    pub fn open_with_address(_path: impl AsRef<Path>, _address: u8) -> Result<Self, TransportError> {
        Err(unsupported())
    }

    pub fn set_conversion_delay(&mut self, _delay: std::time::Duration) {}
}

impl ExtensionPort for NullPort {
    fn write_register(&mut self, _register: u8, _value: u8) -> Result<(), TransportError> {
        Err(unsupported())
    }

    fn read_data(&mut self, _pointer: u8, _buffer: &mut [u8]) -> Result<(), TransportError> {
        Err(unsupported())
    }
}
