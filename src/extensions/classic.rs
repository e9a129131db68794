use bitflags::bitflags;

use crate::bitfield::{BitMap, ByteMap};
use crate::control_data::ControlData;

pub const LEFT_JOY_X: ByteMap = ByteMap::aligned(0, 6, 0);
pub const LEFT_JOY_Y: ByteMap = ByteMap::aligned(1, 6, 0);
pub const RIGHT_JOY_X: [ByteMap; 3] = [
    ByteMap::new(0, 2, 6, 3),
    ByteMap::new(1, 2, 6, 5),
    ByteMap::new(2, 1, 7, 7),
];
pub const RIGHT_JOY_Y: ByteMap = ByteMap::aligned(2, 5, 0);

pub const TRIGGER_L: [ByteMap; 2] = [ByteMap::new(2, 2, 5, 2), ByteMap::new(3, 3, 5, 5)];
pub const TRIGGER_R: ByteMap = ByteMap::aligned(3, 5, 0);

pub const DPAD_UP: BitMap = BitMap::new(5, 0);
pub const DPAD_DOWN: BitMap = BitMap::new(4, 6);
pub const DPAD_LEFT: BitMap = BitMap::new(5, 1);
pub const DPAD_RIGHT: BitMap = BitMap::new(4, 7);

pub const BUTTON_A: BitMap = BitMap::new(5, 4);
pub const BUTTON_B: BitMap = BitMap::new(5, 6);
pub const BUTTON_X: BitMap = BitMap::new(5, 3);
pub const BUTTON_Y: BitMap = BitMap::new(5, 5);

pub const BUTTON_L: BitMap = BitMap::new(4, 5);
pub const BUTTON_R: BitMap = BitMap::new(4, 1);
pub const BUTTON_ZL: BitMap = BitMap::new(5, 7);
pub const BUTTON_ZR: BitMap = BitMap::new(5, 2);

pub const BUTTON_PLUS: BitMap = BitMap::new(4, 2);
pub const BUTTON_MINUS: BitMap = BitMap::new(4, 4);
pub const BUTTON_HOME: BitMap = BitMap::new(4, 3);

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClassicButtons: u16 {
        const DPAD_UP = 1 << 0;
        const DPAD_DOWN = 1 << 1;
        const DPAD_LEFT = 1 << 2;
        const DPAD_RIGHT = 1 << 3;
        const A = 1 << 4;
        const B = 1 << 5;
        const X = 1 << 6;
        const Y = 1 << 7;
        const L = 1 << 8;
        const R = 1 << 9;
        const ZL = 1 << 10;
        const ZR = 1 << 11;
        const PLUS = 1 << 12;
        const MINUS = 1 << 13;
        const HOME = 1 << 14;
    }
}

const BUTTON_MAPPING: [(ClassicButtons, BitMap); 15] = [
    (ClassicButtons::DPAD_UP, DPAD_UP),
    (ClassicButtons::DPAD_DOWN, DPAD_DOWN),
    (ClassicButtons::DPAD_LEFT, DPAD_LEFT),
    (ClassicButtons::DPAD_RIGHT, DPAD_RIGHT),
    (ClassicButtons::A, BUTTON_A),
    (ClassicButtons::B, BUTTON_B),
    (ClassicButtons::X, BUTTON_X),
    (ClassicButtons::Y, BUTTON_Y),
    (ClassicButtons::L, BUTTON_L),
    (ClassicButtons::R, BUTTON_R),
    (ClassicButtons::ZL, BUTTON_ZL),
    (ClassicButtons::ZR, BUTTON_ZR),
    (ClassicButtons::PLUS, BUTTON_PLUS),
    (ClassicButtons::MINUS, BUTTON_MINUS),
    (ClassicButtons::HOME, BUTTON_HOME),
];

controller_view! {
    /// Classic Controller (and Classic Controller Pro): two joysticks, analog
    /// shoulder triggers, a D-pad and face buttons.
    ClassicController
}

control_bytes!(ClassicController {
    left_joy_x, set_left_joy_x => LEFT_JOY_X;
    left_joy_y, set_left_joy_y => LEFT_JOY_Y;
    right_joy_x, set_right_joy_x => RIGHT_JOY_X;
    right_joy_y, set_right_joy_y => RIGHT_JOY_Y;
    trigger_l, set_trigger_l => TRIGGER_L;
    trigger_r, set_trigger_r => TRIGGER_R;
});

control_bits!(ClassicController {
    dpad_up, set_dpad_up => DPAD_UP;
    dpad_down, set_dpad_down => DPAD_DOWN;
    dpad_left, set_dpad_left => DPAD_LEFT;
    dpad_right, set_dpad_right => DPAD_RIGHT;
    button_a, set_button_a => BUTTON_A;
    button_b, set_button_b => BUTTON_B;
    button_x, set_button_x => BUTTON_X;
    button_y, set_button_y => BUTTON_Y;
    button_l, set_button_l => BUTTON_L;
    button_r, set_button_r => BUTTON_R;
    button_zl, set_button_zl => BUTTON_ZL;
    button_zr, set_button_zr => BUTTON_ZR;
    button_plus, set_button_plus => BUTTON_PLUS;
    button_minus, set_button_minus => BUTTON_MINUS;
    button_home, set_button_home => BUTTON_HOME;
});

impl<T: AsRef<ControlData>> ClassicController<T> {
    #[must_use]
    pub fn button_start(&self) -> bool {
        self.button_plus()
    }

    #[must_use]
    pub fn button_select(&self) -> bool {
        self.button_minus()
    }

    /// All buttons currently held down.
    #[must_use]
    pub fn buttons(&self) -> ClassicButtons {
        let data = self.data.as_ref();
        BUTTON_MAPPING
            .iter()
            .filter(|(_, map)| data.bit(*map))
            .fold(ClassicButtons::empty(), |acc, (flag, _)| acc | *flag)
    }
}

impl<T> ClassicController<T>
where
    T: AsRef<ControlData> + AsMut<ControlData>,
{
    pub fn set_button_start(&mut self, pressed: bool) {
        self.set_button_plus(pressed);
    }

    pub fn set_button_select(&mut self, pressed: bool) {
        self.set_button_minus(pressed);
    }

    /// Presses exactly the given buttons and releases the rest.
    pub fn set_buttons(&mut self, buttons: ClassicButtons) {
        let data = self.data.as_mut();
        for (flag, map) in BUTTON_MAPPING {
            data.set_bit(buttons.contains(flag), map);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both sticks centered, triggers released, no buttons
    const AT_REST: [u8; 6] = [0x61, 0xDF, 0x8F, 0x00, 0xFF, 0xFF];

    #[test]
    fn test_classic_at_rest() {
        let data = ControlData::from(AT_REST);
        let classic = ClassicController::new(&data);

        assert_eq!(classic.left_joy_x(), 33);
        assert_eq!(classic.left_joy_y(), 31);
        assert_eq!(classic.right_joy_x(), 15);
        assert_eq!(classic.right_joy_y(), 15);
        assert_eq!(classic.trigger_l(), 0);
        assert_eq!(classic.trigger_r(), 0);
        assert!(classic.buttons().is_empty());
    }

    #[test]
    fn test_classic_right_joystick_spans_bytes() {
        let mut data = ControlData::from(AT_REST);
        let mut classic = ClassicController::new(&mut data);

        classic.set_right_joy_x(0b1_0110);
        assert_eq!(classic.right_joy_x(), 0b1_0110);
        assert_eq!(classic.left_joy_x(), 33);
        assert_eq!(classic.left_joy_y(), 31);
        assert_eq!(classic.right_joy_y(), 15);

        classic.set_trigger_l(0b1_1011);
        assert_eq!(classic.trigger_l(), 0b1_1011);
        assert_eq!(classic.trigger_r(), 0);
        assert_eq!(classic.right_joy_x(), 0b1_0110);
    }

    #[test]
    fn test_classic_buttons() {
        let mut data = ControlData::from(AT_REST);
        let mut classic = ClassicController::new(&mut data);

        classic.set_button_a(true);
        classic.set_dpad_right(true);
        classic.set_button_start(true);
        assert!(classic.button_plus());
        assert!(classic.button_start());
        assert!(!classic.button_select());
        assert_eq!(
            classic.buttons(),
            ClassicButtons::A | ClassicButtons::DPAD_RIGHT | ClassicButtons::PLUS
        );

        assert_eq!(data.byte(4), 0b0111_1011);
        assert_eq!(data.byte(5), 0b1110_1111);
    }

    #[test]
    fn test_classic_set_buttons() {
        let mut data = ControlData::from(AT_REST);
        let mut classic = ClassicController::new(&mut data);

        classic.set_buttons(ClassicButtons::all());
        assert_eq!(classic.buttons(), ClassicButtons::all());
        assert_eq!(data.byte(4) & 0b1111_1110, 0);
        assert_eq!(data.byte(5), 0);

        let mut classic = ClassicController::new(&mut data);
        classic.set_buttons(ClassicButtons::ZL | ClassicButtons::HOME);
        assert_eq!(classic.buttons(), ClassicButtons::ZL | ClassicButtons::HOME);
    }
}
