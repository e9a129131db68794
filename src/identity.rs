/// Register pointer of the identification bytes.
pub const IDENTITY_POINTER: u8 = 0xFA;
/// Number of identification bytes.
pub const IDENTITY_SIZE: usize = 6;

/// Kind of controller found on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerType {
    /// Nothing answered the identification request.
    NoController,
    /// Something answered, but its identification is not a known controller.
    UnknownController,
    Nunchuk,
    ClassicController,
    GuitarController,
    DrumController,
    DjTurntable,
}

impl ControllerType {
    #[must_use]
    pub const fn is_connected(self) -> bool {
        !matches!(self, Self::NoController)
    }
}

impl std::fmt::Display for ControllerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::NoController => "no controller",
            Self::UnknownController => "unknown controller",
            Self::Nunchuk => "nunchuk",
            Self::ClassicController => "classic controller",
            Self::GuitarController => "guitar controller",
            Self::DrumController => "drum controller",
            Self::DjTurntable => "DJ turntable",
        };
        f.write_str(name)
    }
}

/// Classifies the identification bytes read from [`IDENTITY_POINTER`].
#[must_use]
pub const fn identify_controller(id: &[u8; IDENTITY_SIZE]) -> ControllerType {
    // https://www.wiibrew.org/wiki/Wiimote/Extension_Controllers#Identification
    match *id {
        [_, _, 0xA4, 0x20, 0x00, 0x00] => ControllerType::Nunchuk,
        [_, _, 0xA4, 0x20, 0x01, 0x01] => ControllerType::ClassicController,
        // Guitar Hero and DJ Hero controllers share one family id
        [0x00, 0x00, 0xA4, 0x20, 0x01, 0x03] => ControllerType::GuitarController,
        [0x01, 0x00, 0xA4, 0x20, 0x01, 0x03] => ControllerType::DrumController,
        [0x03, 0x00, 0xA4, 0x20, 0x01, 0x03] => ControllerType::DjTurntable,
        _ => ControllerType::UnknownController,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identify_known_controllers() {
        assert_eq!(
            identify_controller(&[0x00, 0x00, 0xA4, 0x20, 0x00, 0x00]),
            ControllerType::Nunchuk
        );
        assert_eq!(
            identify_controller(&[0x01, 0x00, 0xA4, 0x20, 0x01, 0x01]),
            ControllerType::ClassicController
        );
        assert_eq!(
            identify_controller(&[0x00, 0x00, 0xA4, 0x20, 0x01, 0x03]),
            ControllerType::GuitarController
        );
        assert_eq!(
            identify_controller(&[0x01, 0x00, 0xA4, 0x20, 0x01, 0x03]),
            ControllerType::DrumController
        );
        assert_eq!(
            identify_controller(&[0x03, 0x00, 0xA4, 0x20, 0x01, 0x03]),
            ControllerType::DjTurntable
        );
    }

    #[test]
    fn test_identify_unknown() {
        // 0x02 is not a Guitar Hero sub-kind
        assert_eq!(
            identify_controller(&[0x02, 0x00, 0xA4, 0x20, 0x01, 0x03]),
            ControllerType::UnknownController
        );
        // family id needs byte 1 cleared
        assert_eq!(
            identify_controller(&[0x00, 0x01, 0xA4, 0x20, 0x01, 0x03]),
            ControllerType::UnknownController
        );
        // bad magic
        assert_eq!(
            identify_controller(&[0x00, 0x00, 0xA6, 0x20, 0x00, 0x00]),
            ControllerType::UnknownController
        );
        // balance board
        assert_eq!(
            identify_controller(&[0x00, 0x00, 0xA4, 0x20, 0x04, 0x02]),
            ControllerType::UnknownController
        );
    }
}
