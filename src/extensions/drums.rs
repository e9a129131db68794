use std::fmt;

use crate::bitfield::{BitMap, ByteMap, ControlField};
use crate::control_data::ControlData;
use crate::extensions::classic;

pub const JOY_X: ByteMap = classic::LEFT_JOY_X;
pub const JOY_Y: ByteMap = classic::LEFT_JOY_Y;

pub const DRUM_RED: BitMap = BitMap::new(5, 6);
pub const DRUM_BLUE: BitMap = BitMap::new(5, 3);
pub const DRUM_GREEN: BitMap = BitMap::new(5, 4);
pub const CYMBAL_YELLOW: BitMap = BitMap::new(5, 5);
pub const CYMBAL_ORANGE: BitMap = BitMap::new(5, 7);
pub const BASS_PEDAL: BitMap = BitMap::new(5, 2);

pub const VELOCITY: ByteMap = ByteMap::new(3, 3, 5, 5);
pub const VELOCITY_ID: ByteMap = ByteMap::new(2, 5, 1, 1);
pub const VELOCITY_AVAILABLE: BitMap = BitMap::new(2, 6);

/// Hardest hit the velocity sensor reports.
pub const VELOCITY_MAX: u8 = 7;

/// Pad a velocity reading belongs to, as the 5 bit id the controller sends.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrumVelocityId {
    None = 0x1F,
    Red = 0x19,
    Blue = 0x0F,
    Green = 0x12,
    Yellow = 0x11,
    Orange = 0x0E,
    Pedal = 0x1B,
}

impl DrumVelocityId {
    /// Converts a raw id. Unknown ids read as [`DrumVelocityId::None`].
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            0x19 => Self::Red,
            0x0F => Self::Blue,
            0x12 => Self::Green,
            0x11 => Self::Yellow,
            0x0E => Self::Orange,
            0x1B => Self::Pedal,
            _ => Self::None,
        }
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for DrumVelocityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Red => "Red",
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Orange => "Orange",
            Self::Pedal => "Pedal",
        };
        f.write_str(name)
    }
}

controller_view! {
    /// Guitar Hero World Tour drum kit. Pads, cymbals and the bass pedal report a
    /// pressed state, and the most recent hit also reports its velocity.
    DrumController
}

control_bytes!(DrumController {
    joy_x, set_joy_x => JOY_X;
    joy_y, set_joy_y => JOY_Y;
});

control_bits!(DrumController {
    drum_red, set_drum_red => DRUM_RED;
    drum_blue, set_drum_blue => DRUM_BLUE;
    drum_green, set_drum_green => DRUM_GREEN;
    cymbal_yellow, set_cymbal_yellow => CYMBAL_YELLOW;
    cymbal_orange, set_cymbal_orange => CYMBAL_ORANGE;
    bass_pedal, set_bass_pedal => BASS_PEDAL;
    button_plus, set_button_plus => classic::BUTTON_PLUS;
    button_minus, set_button_minus => classic::BUTTON_MINUS;
    velocity_available, set_velocity_available => VELOCITY_AVAILABLE;
});

impl<T: AsRef<ControlData>> DrumController<T> {
    #[must_use]
    pub fn velocity_id(&self) -> DrumVelocityId {
        DrumVelocityId::from_raw(VELOCITY_ID.decode(self.data.as_ref()))
    }

    /// Velocity of the last hit, 0 (none) to 7 (hardest).
    #[must_use]
    pub fn velocity(&self) -> u8 {
        if self.velocity_available() {
            VELOCITY_MAX - VELOCITY.decode(self.data.as_ref())
        } else {
            0
        }
    }

    /// Velocity of the last hit if it came from `id`, otherwise 0.
    #[must_use]
    pub fn velocity_for(&self, id: DrumVelocityId) -> u8 {
        if self.velocity_id() == id {
            self.velocity()
        } else {
            0
        }
    }

    #[must_use]
    pub fn velocity_red(&self) -> u8 {
        self.velocity_for(DrumVelocityId::Red)
    }

    #[must_use]
    pub fn velocity_blue(&self) -> u8 {
        self.velocity_for(DrumVelocityId::Blue)
    }

    #[must_use]
    pub fn velocity_green(&self) -> u8 {
        self.velocity_for(DrumVelocityId::Green)
    }

    #[must_use]
    pub fn velocity_yellow(&self) -> u8 {
        self.velocity_for(DrumVelocityId::Yellow)
    }

    #[must_use]
    pub fn velocity_orange(&self) -> u8 {
        self.velocity_for(DrumVelocityId::Orange)
    }

    #[must_use]
    pub fn velocity_pedal(&self) -> u8 {
        self.velocity_for(DrumVelocityId::Pedal)
    }
}

impl<T> DrumController<T>
where
    T: AsRef<ControlData> + AsMut<ControlData>,
{
    /// Reports a hit of strength `value` (clamped to 7) on the pad `id`.
    /// [`DrumVelocityId::None`] clears the availability flag.
    pub fn set_velocity(&mut self, value: u8, id: DrumVelocityId) {
        let raw = VELOCITY_MAX - value.min(VELOCITY_MAX);
        let data = self.data.as_mut();
        data.set_bit(id != DrumVelocityId::None, VELOCITY_AVAILABLE);
        VELOCITY_ID.encode(id.raw(), data);
        VELOCITY.encode(raw, data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AT_REST: [u8; 6] = [0xE0, 0xE0, 0xFF, 0xFF, 0xFF, 0xFF];

    #[test]
    fn test_drums_at_rest() {
        let data = ControlData::from(AT_REST);
        let drums = DrumController::new(&data);

        assert_eq!(drums.joy_x(), 32);
        assert!(!drums.drum_red());
        assert!(!drums.bass_pedal());
        assert!(!drums.velocity_available());
        assert_eq!(drums.velocity_id(), DrumVelocityId::None);
        assert_eq!(drums.velocity(), 0);
    }

    #[test]
    fn test_drums_velocity_hit() {
        // Red pad hit at strength 5: available bit low, id 0x19, raw velocity 2
        let data = ControlData::from([0xE0, 0xE0, 0b1011_0011, 0b0101_1111, 0xFF, 0b1011_1111]);
        let drums = DrumController::new(&data);

        assert!(drums.drum_red());
        assert!(drums.velocity_available());
        assert_eq!(drums.velocity_id(), DrumVelocityId::Red);
        assert_eq!(drums.velocity(), 5);
        assert_eq!(drums.velocity_red(), 5);
        assert_eq!(drums.velocity_blue(), 0);
        assert_eq!(drums.velocity_pedal(), 0);
    }

    #[test]
    fn test_drums_unknown_velocity_id() {
        assert_eq!(DrumVelocityId::from_raw(0x00), DrumVelocityId::None);
        assert_eq!(DrumVelocityId::from_raw(0x10), DrumVelocityId::None);
        assert_eq!(DrumVelocityId::from_raw(0x0E), DrumVelocityId::Orange);
        assert_eq!(DrumVelocityId::Pedal.raw(), 0x1B);
    }

    #[test]
    fn test_drums_set_velocity() {
        let mut data = ControlData::from(AT_REST);
        let mut drums = DrumController::new(&mut data);

        drums.set_velocity(5, DrumVelocityId::Red);
        assert_eq!(drums.velocity_id(), DrumVelocityId::Red);
        assert_eq!(drums.velocity_red(), 5);
        assert_eq!(drums.control_data().byte(2), 0b1011_0011);
        assert_eq!(drums.control_data().byte(3), 0b0101_1111);

        drums.set_velocity(200, DrumVelocityId::Pedal);
        assert_eq!(drums.velocity_pedal(), VELOCITY_MAX);

        drums.set_velocity(3, DrumVelocityId::None);
        assert!(!drums.velocity_available());
        assert_eq!(drums.velocity(), 0);
        assert_eq!(drums.velocity_id(), DrumVelocityId::None);
    }
}
