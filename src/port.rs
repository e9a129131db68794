/// I2C address shared by all extension controllers.
pub const I2C_ADDRESS: u8 = 0x52;
/// Time the controller needs between receiving a register pointer and answering a read.
pub const CONVERSION_DELAY_US: u32 = 175;

/// Failure reported by an [`ExtensionPort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// The controller did not acknowledge.
    Nack,
    ArbitrationLoss,
    Bus,
    Io(std::io::ErrorKind),
    Other,
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nack => f.write_str("no acknowledge"),
            Self::ArbitrationLoss => f.write_str("bus arbitration lost"),
            Self::Bus => f.write_str("bus error"),
            Self::Io(kind) => write!(f, "i/o error: {kind}"),
            Self::Other => f.write_str("transport error"),
        }
    }
}

impl From<embedded_hal::i2c::ErrorKind> for TransportError {
    fn from(kind: embedded_hal::i2c::ErrorKind) -> Self {
        use embedded_hal::i2c::ErrorKind;
        match kind {
            ErrorKind::NoAcknowledge(_) => Self::Nack,
            ErrorKind::ArbitrationLoss => Self::ArbitrationLoss,
            ErrorKind::Bus => Self::Bus,
            _ => Self::Other,
        }
    }
}

impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> Self {
        // i2c-dev reports a missing acknowledge as ENXIO or EREMOTEIO
        match e.raw_os_error() {
            Some(6 | 121) => Self::Nack,
            _ => Self::Io(e.kind()),
        }
    }
}

#[cfg(target_os = "linux")]
impl From<nix::Error> for TransportError {
    fn from(e: nix::Error) -> Self {
        Self::from(std::io::Error::from(e))
    }
}

/// Byte level access to the controller, provided by the platform.
///
/// Calls are blocking and must not overlap; the session holds the port mutably for
/// the whole of each operation.
pub trait ExtensionPort {
    /// Writes `value` into the controller register `register`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write was not acknowledged.
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), TransportError>;

    /// Fills `buffer` with the registers starting at `pointer`.
    ///
    /// # Errors
    ///
    /// Returns an error if the pointer write or the read failed.
    fn read_data(&mut self, pointer: u8, buffer: &mut [u8]) -> Result<(), TransportError>;

    /// Starts the controller in unencrypted mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the controller did not acknowledge.
    fn initialize(&mut self) -> Result<(), TransportError> {
        // https://www.wiibrew.org/wiki/Wiimote/Extension_Controllers#The_New_Way
        self.write_register(0xF0, 0x55)?;
        self.write_register(0xFB, 0x00)
    }
}

impl<P: ExtensionPort + ?Sized> ExtensionPort for &mut P {
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), TransportError> {
        (**self).write_register(register, value)
    }

    fn read_data(&mut self, pointer: u8, buffer: &mut [u8]) -> Result<(), TransportError> {
        (**self).read_data(pointer, buffer)
    }

    fn initialize(&mut self) -> Result<(), TransportError> {
        (**self).initialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors() {
        let nack = std::io::Error::from_raw_os_error(121);
        assert_eq!(TransportError::from(nack), TransportError::Nack);

        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "no bus");
        assert_eq!(
            TransportError::from(missing),
            TransportError::Io(std::io::ErrorKind::NotFound)
        );
    }

    #[test]
    fn test_hal_errors() {
        use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
        assert_eq!(
            TransportError::from(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)),
            TransportError::Nack
        );
        assert_eq!(
            TransportError::from(ErrorKind::ArbitrationLoss),
            TransportError::ArbitrationLoss
        );
        assert_eq!(TransportError::from(ErrorKind::Overrun), TransportError::Other);
    }
}
