use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, I2c};

use crate::port::{ExtensionPort, TransportError, CONVERSION_DELAY_US, I2C_ADDRESS};

/// [`ExtensionPort`] on top of any `embedded-hal` I2C bus.
#[derive(Debug)]
pub struct HalPort<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    conversion_delay_us: u32,
}

impl<I2C: I2c, D: DelayNs> HalPort<I2C, D> {
    /// Creates a port talking to the default controller address.
    pub const fn new(i2c: I2C, delay: D) -> Self {
        Self {
            i2c,
            delay,
            address: I2C_ADDRESS,
            conversion_delay_us: CONVERSION_DELAY_US,
        }
    }

    #[must_use]
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Changes the wait between setting the register pointer and reading.
    /// Slow hosts (AVR class) need around 200 µs.
    #[must_use]
    pub fn with_conversion_delay_us(mut self, delay_us: u32) -> Self {
        self.conversion_delay_us = delay_us;
        self
    }

    /// Gives back the bus and the delay.
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }
}

impl<I2C: I2c, D: DelayNs> ExtensionPort for HalPort<I2C, D> {
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), TransportError> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(|e| e.kind().into())
    }

    fn read_data(&mut self, pointer: u8, buffer: &mut [u8]) -> Result<(), TransportError> {
        self.i2c
            .write(self.address, &[pointer])
            .map_err(|e| TransportError::from(e.kind()))?;
        self.delay.delay_us(self.conversion_delay_us);
        self.i2c
            .read(self.address, buffer)
            .map_err(|e| e.kind().into())
    }
}
