use bitflags::bitflags;

use crate::bitfield::{BitMap, ByteMap, ControlField};
use crate::control_data::ControlData;

pub const JOY_X: ByteMap = ByteMap::full(0);
pub const JOY_Y: ByteMap = ByteMap::full(1);

// Accelerometer axes: the high 8 bits have their own byte, the low 2 bits share byte 5
pub const ACCEL_X_HIGH: ByteMap = ByteMap::full(2);
pub const ACCEL_X_LOW: ByteMap = ByteMap::aligned(5, 2, 2);
pub const ACCEL_Y_HIGH: ByteMap = ByteMap::full(3);
pub const ACCEL_Y_LOW: ByteMap = ByteMap::aligned(5, 2, 4);
pub const ACCEL_Z_HIGH: ByteMap = ByteMap::full(4);
pub const ACCEL_Z_LOW: ByteMap = ByteMap::aligned(5, 2, 6);

pub const BUTTON_C: BitMap = BitMap::new(5, 1);
pub const BUTTON_Z: BitMap = BitMap::new(5, 0);

/// Value of a 10 bit accelerometer axis at rest.
const ACCEL_CENTER: f32 = 511.0;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NunchukButtons: u8 {
        const C = 1 << 0;
        const Z = 1 << 1;
    }
}

controller_view! {
    /// Nunchuk: one joystick, a three axis accelerometer and the C and Z buttons.
    Nunchuk
}

control_bytes!(Nunchuk {
    joy_x, set_joy_x => JOY_X;
    joy_y, set_joy_y => JOY_Y;
});

control_bits!(Nunchuk {
    button_c, set_button_c => BUTTON_C;
    button_z, set_button_z => BUTTON_Z;
});

fn decode_accel(data: &ControlData, high: ByteMap, low: ByteMap) -> u16 {
    (u16::from(high.decode(data)) << 2) | u16::from(low.decode(data))
}

#[allow(clippy::cast_possible_truncation)] // Only the low 10 bits are kept
fn encode_accel(value: u16, data: &mut ControlData, high: ByteMap, low: ByteMap) {
    high.encode((value >> 2) as u8, data);
    low.encode(value as u8, data);
}

impl<T: AsRef<ControlData>> Nunchuk<T> {
    /// Accelerometer X axis, 10 bits.
    #[must_use]
    pub fn accel_x(&self) -> u16 {
        decode_accel(self.data.as_ref(), ACCEL_X_HIGH, ACCEL_X_LOW)
    }

    #[must_use]
    pub fn accel_y(&self) -> u16 {
        decode_accel(self.data.as_ref(), ACCEL_Y_HIGH, ACCEL_Y_LOW)
    }

    #[must_use]
    pub fn accel_z(&self) -> u16 {
        decode_accel(self.data.as_ref(), ACCEL_Z_HIGH, ACCEL_Z_LOW)
    }

    /// Roll in degrees, -180 to 180.
    #[must_use]
    pub fn roll_angle(&self) -> f32 {
        let x = f32::from(self.accel_x()) - ACCEL_CENTER;
        let z = f32::from(self.accel_z()) - ACCEL_CENTER;
        x.atan2(z).to_degrees()
    }

    /// Pitch in degrees, -180 to 180. Pulling back is positive.
    #[must_use]
    pub fn pitch_angle(&self) -> f32 {
        let y = f32::from(self.accel_y()) - ACCEL_CENTER;
        let z = f32::from(self.accel_z()) - ACCEL_CENTER;
        -y.atan2(z).to_degrees()
    }

    #[must_use]
    pub fn buttons(&self) -> NunchukButtons {
        let mut buttons = NunchukButtons::empty();
        buttons.set(NunchukButtons::C, self.button_c());
        buttons.set(NunchukButtons::Z, self.button_z());
        buttons
    }
}

impl<T: AsRef<ControlData> + AsMut<ControlData>> Nunchuk<T> {
    pub fn set_accel_x(&mut self, value: u16) {
        encode_accel(value, self.data.as_mut(), ACCEL_X_HIGH, ACCEL_X_LOW);
    }

    pub fn set_accel_y(&mut self, value: u16) {
        encode_accel(value, self.data.as_mut(), ACCEL_Y_HIGH, ACCEL_Y_LOW);
    }

    pub fn set_accel_z(&mut self, value: u16) {
        encode_accel(value, self.data.as_mut(), ACCEL_Z_HIGH, ACCEL_Z_LOW);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::tests::{FakePort, NUNCHUK_AT_REST, NUNCHUK_ID};
    use crate::device::ExtensionController;
    use crate::identity::ControllerType;

    #[test]
    fn test_nunchuk_at_rest() {
        let data = ControlData::from([0x80, 0x7F, 0x80, 0x80, 0xB0, 0b1011_0111]);
        let nunchuk = Nunchuk::new(&data);

        assert_eq!(nunchuk.joy_x(), 0x80);
        assert_eq!(nunchuk.joy_y(), 0x7F);
        assert_eq!(nunchuk.accel_x(), 0x200 | 0b01);
        assert_eq!(nunchuk.accel_y(), 0x200 | 0b11);
        assert_eq!(nunchuk.accel_z(), 0x2C0 | 0b10);
        assert!(!nunchuk.button_c());
        assert!(!nunchuk.button_z());
        assert!(nunchuk.buttons().is_empty());
    }

    #[test]
    fn test_nunchuk_buttons() {
        let data = ControlData::from([0x80, 0x80, 0x80, 0x80, 0x80, 0b1111_1100]);
        let nunchuk = Nunchuk::new(&data);
        assert_eq!(nunchuk.buttons(), NunchukButtons::C | NunchukButtons::Z);

        let data = ControlData::from([0x80, 0x80, 0x80, 0x80, 0x80, 0b1111_1110]);
        assert_eq!(Nunchuk::new(&data).buttons(), NunchukButtons::Z);
    }

    #[test]
    fn test_nunchuk_setters() {
        let mut data = ControlData::from([0xFF; 6]);
        let mut nunchuk = Nunchuk::new(&mut data);

        nunchuk.set_joy_x(12);
        nunchuk.set_accel_x(0x3FE);
        nunchuk.set_accel_y(0x001);
        nunchuk.set_accel_z(0x155);
        nunchuk.set_button_c(true);

        assert_eq!(nunchuk.joy_x(), 12);
        assert_eq!(nunchuk.accel_x(), 0x3FE);
        assert_eq!(nunchuk.accel_y(), 0x001);
        assert_eq!(nunchuk.accel_z(), 0x155);
        assert!(nunchuk.button_c());
        assert!(!nunchuk.button_z());

        assert_eq!(data.as_bytes(), &[12, 0xFF, 0xFF, 0x00, 0x55, 0b0101_1001]);
    }

    #[test]
    fn test_nunchuk_angles() {
        let mut data = ControlData::new();
        let mut nunchuk = Nunchuk::new(&mut data);
        nunchuk.set_accel_x(511);
        nunchuk.set_accel_y(511);
        nunchuk.set_accel_z(711);
        assert!(nunchuk.roll_angle().abs() < 0.01);
        assert!(nunchuk.pitch_angle().abs() < 0.01);

        nunchuk.set_accel_x(711);
        nunchuk.set_accel_z(511);
        assert!((nunchuk.roll_angle() - 90.0).abs() < 0.01);

        nunchuk.set_accel_x(511);
        nunchuk.set_accel_y(711);
        assert!((nunchuk.pitch_angle() + 90.0).abs() < 0.01);
    }

    #[test]
    fn test_nunchuk_reads_session() {
        let pushed = [0x10, 0xF0, 0x80, 0x80, 0xB0, 0xFD];
        let port = FakePort::with_controller(NUNCHUK_ID)
            .queue(NUNCHUK_AT_REST)
            .queue(pushed);
        let mut controller = ExtensionController::for_controller(port, ControllerType::Nunchuk);
        assert_eq!(controller.connect(), Ok(()));

        let mut nunchuk = Nunchuk::new(&mut controller);
        assert_eq!(nunchuk.joy_x(), 0x80);
        assert!(nunchuk.buttons().is_empty());

        assert_eq!(nunchuk.inner_mut().poll(), Ok(()));
        assert_eq!(nunchuk.joy_x(), 0x10);
        assert_eq!(nunchuk.joy_y(), 0xF0);
        assert_eq!(nunchuk.buttons(), NunchukButtons::C);
    }
}
