//! DJ Hero turntable controller.
//!
//! The base unit carries the effect dial, the crossfade slider, the euphoria button and
//! a joystick. Up to two turntables attach to its sides; each has a platter and three
//! buttons. Which sides are populated is worked out from the data itself.

use std::fmt;

use crate::bitfield::{BitMap, ByteMap, ControlField};
use crate::control_data::ControlData;
use crate::extensions::classic;
use crate::rollover::RolloverChange;

pub const JOY_X: ByteMap = classic::LEFT_JOY_X;
pub const JOY_Y: ByteMap = classic::LEFT_JOY_Y;

pub const EFFECT_DIAL: [ByteMap; 2] = [ByteMap::new(2, 2, 5, 2), ByteMap::new(3, 3, 5, 5)];
pub const CROSSFADE: ByteMap = ByteMap::aligned(2, 4, 1);
pub const EUPHORIA: BitMap = BitMap::new(5, 4);

const EFFECT_DIAL_MAX: u8 = 31;
const CROSSFADE_OFFSET: i8 = -8;
const CROSSFADE_MAX: i8 = 7;

/// Platter speed range. The platter reports 5 bits plus a separate sign bit.
pub const TURNTABLE_MIN: i8 = -32;
pub const TURNTABLE_MAX: i8 = 31;

const LEFT_TABLE: [ByteMap; 1] = [ByteMap::aligned(3, 5, 0)];
const RIGHT_TABLE: [ByteMap; 3] = [
    ByteMap::new(0, 2, 6, 3),
    ByteMap::new(1, 2, 6, 5),
    ByteMap::new(2, 1, 7, 7),
];

struct SideLayout {
    table: &'static [ByteMap],
    sign: ByteMap,
    green: BitMap,
    red: BitMap,
    blue: BitMap,
}

const LEFT_LAYOUT: SideLayout = SideLayout {
    table: &LEFT_TABLE,
    sign: ByteMap::aligned(4, 1, 0),
    green: BitMap::new(5, 3),
    red: BitMap::new(4, 5),
    blue: BitMap::new(5, 7),
};

const RIGHT_LAYOUT: SideLayout = SideLayout {
    table: &RIGHT_TABLE,
    sign: ByteMap::aligned(2, 1, 0),
    green: BitMap::new(5, 5),
    red: BitMap::new(4, 1),
    blue: BitMap::new(5, 2),
};

/// Which turntables are attached to the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurntableConfig {
    #[default]
    BaseOnly,
    Left,
    Right,
    Both,
}

impl TurntableConfig {
    #[must_use]
    pub const fn count(self) -> u8 {
        match self {
            Self::BaseOnly => 0,
            Self::Left | Self::Right => 1,
            Self::Both => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurntableSide {
    Left,
    Right,
}

impl TurntableSide {
    const fn layout(self) -> &'static SideLayout {
        match self {
            Self::Left => &LEFT_LAYOUT,
            Self::Right => &RIGHT_LAYOUT,
        }
    }

    const fn config(self) -> TurntableConfig {
        match self {
            Self::Left => TurntableConfig::Left,
            Self::Right => TurntableConfig::Right,
        }
    }
}

impl fmt::Display for TurntableSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("Left"),
            Self::Right => f.write_str("Right"),
        }
    }
}

#[allow(clippy::cast_possible_wrap)]
fn decode_platter(layout: &SideLayout, data: &ControlData) -> i8 {
    let mut raw = layout.table.decode(data) | (layout.sign.decode(data) << 7);
    if raw & 0x80 != 0 {
        // Sign extend the 5 bit magnitude
        raw |= 0x60;
    }
    raw as i8
}

#[allow(clippy::cast_sign_loss)]
fn encode_platter(layout: &SideLayout, value: i8, data: &mut ControlData) {
    let value = value.clamp(TURNTABLE_MIN, TURNTABLE_MAX);
    layout.table.encode(value as u8, data);
    layout.sign.encode((value >> 7) as u8, data);
}

/// One side of the turntable controller, borrowed from a [`DjTurntable`].
#[derive(Debug, Clone, Copy)]
pub struct Turntable<'a> {
    side: TurntableSide,
    data: &'a ControlData,
    config: TurntableConfig,
}

impl Turntable<'_> {
    #[must_use]
    pub const fn side(&self) -> TurntableSide {
        self.side
    }

    /// Platter speed. Clockwise is positive, faster is larger.
    #[must_use]
    pub fn turntable(&self) -> i8 {
        decode_platter(self.side.layout(), self.data)
    }

    #[must_use]
    pub fn button_green(&self) -> bool {
        self.data.bit(self.side.layout().green)
    }

    #[must_use]
    pub fn button_red(&self) -> bool {
        self.data.bit(self.side.layout().red)
    }

    #[must_use]
    pub fn button_blue(&self) -> bool {
        self.data.bit(self.side.layout().blue)
    }

    /// A side counts as attached once it has been seen, or while it reports any input.
    #[must_use]
    pub fn connected(&self) -> bool {
        if self.config == TurntableConfig::Both || self.config == self.side.config() {
            return true;
        }
        self.turntable() != 0 || self.button_green() || self.button_red() || self.button_blue()
    }
}

/// Write access to one side of the turntable controller.
#[derive(Debug)]
pub struct TurntableMut<'a> {
    side: TurntableSide,
    data: &'a mut ControlData,
}

impl TurntableMut<'_> {
    /// Sets the platter speed, clamped to the range the wire format can carry.
    pub fn set_turntable(&mut self, value: i8) {
        encode_platter(self.side.layout(), value, self.data);
    }

    pub fn set_button_green(&mut self, pressed: bool) {
        self.data.set_bit(pressed, self.side.layout().green);
    }

    pub fn set_button_red(&mut self, pressed: bool) {
        self.data.set_bit(pressed, self.side.layout().red);
    }

    pub fn set_button_blue(&mut self, pressed: bool) {
        self.data.set_bit(pressed, self.side.layout().blue);
    }
}

/// DJ Hero turntable controller.
#[derive(Debug, Clone)]
pub struct DjTurntable<T> {
    data: T,
    config: TurntableConfig,
}

impl<T: AsRef<ControlData>> DjTurntable<T> {
    pub const fn new(data: T) -> Self {
        Self {
            data,
            config: TurntableConfig::BaseOnly,
        }
    }

    #[must_use]
    pub fn control_data(&self) -> &ControlData {
        self.data.as_ref()
    }

    /// The wrapped data, for example to poll the session it belongs to.
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.data
    }

    pub fn into_inner(self) -> T {
        self.data
    }

    #[must_use]
    pub fn left(&self) -> Turntable<'_> {
        self.side(TurntableSide::Left)
    }

    #[must_use]
    pub fn right(&self) -> Turntable<'_> {
        self.side(TurntableSide::Right)
    }

    #[must_use]
    pub fn side(&self, side: TurntableSide) -> Turntable<'_> {
        Turntable {
            side,
            data: self.data.as_ref(),
            config: self.config,
        }
    }

    /// Sum of both platters.
    #[must_use]
    pub fn turntable(&self) -> i8 {
        self.left().turntable() + self.right().turntable()
    }

    #[must_use]
    pub fn button_green(&self) -> bool {
        self.left().button_green() || self.right().button_green()
    }

    #[must_use]
    pub fn button_red(&self) -> bool {
        self.left().button_red() || self.right().button_red()
    }

    #[must_use]
    pub fn button_blue(&self) -> bool {
        self.left().button_blue() || self.right().button_blue()
    }

    /// Effect dial position, 0 to 31. Wraps once per rotation.
    #[must_use]
    pub fn effect_dial(&self) -> u8 {
        EFFECT_DIAL.decode(self.data.as_ref())
    }

    /// Crossfade slider, -8 (left) to 7 (right).
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn crossfade_slider(&self) -> i8 {
        CROSSFADE.decode(self.data.as_ref()) as i8 + CROSSFADE_OFFSET
    }

    /// Works out which turntables are attached from the current data.
    ///
    /// Once both sides have been seen the answer no longer changes.
    pub fn turntable_config(&mut self) -> TurntableConfig {
        if self.config == TurntableConfig::Both {
            return self.config;
        }

        let config = match (self.left().connected(), self.right().connected()) {
            (true, true) => TurntableConfig::Both,
            (true, false) => TurntableConfig::Left,
            (false, true) => TurntableConfig::Right,
            (false, false) => TurntableConfig::BaseOnly,
        };
        if config != self.config {
            log::debug!("Turntable configuration changed from {:?} to {:?}", self.config, config);
            self.config = config;
        }
        config
    }

    pub fn num_turntables(&mut self) -> u8 {
        self.turntable_config().count()
    }
}

impl<T> DjTurntable<T>
where
    T: AsRef<ControlData> + AsMut<ControlData>,
{
    pub fn left_mut(&mut self) -> TurntableMut<'_> {
        self.side_mut(TurntableSide::Left)
    }

    pub fn right_mut(&mut self) -> TurntableMut<'_> {
        self.side_mut(TurntableSide::Right)
    }

    pub fn side_mut(&mut self, side: TurntableSide) -> TurntableMut<'_> {
        TurntableMut {
            side,
            data: self.data.as_mut(),
        }
    }

    pub fn set_effect_dial(&mut self, value: u8) {
        EFFECT_DIAL.encode(value.min(EFFECT_DIAL_MAX), self.data.as_mut());
    }

    /// Sets the slider position, clamped to -8..=7.
    #[allow(clippy::cast_sign_loss)]
    pub fn set_crossfade_slider(&mut self, value: i8) {
        let raw = value.clamp(CROSSFADE_OFFSET, CROSSFADE_MAX) - CROSSFADE_OFFSET;
        CROSSFADE.encode(raw as u8, self.data.as_mut());
    }
}

control_bytes!(DjTurntable {
    joy_x, set_joy_x => JOY_X;
    joy_y, set_joy_y => JOY_Y;
});

control_bits!(DjTurntable {
    button_euphoria, set_button_euphoria => EUPHORIA;
    button_plus, set_button_plus => classic::BUTTON_PLUS;
    button_minus, set_button_minus => classic::BUTTON_MINUS;
});

/// Tracks the effect dial across polls and reports how far it turned.
#[derive(Debug, Clone)]
pub struct EffectRollover {
    dial: RolloverChange,
}

impl EffectRollover {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dial: RolloverChange::new(0, EFFECT_DIAL_MAX),
        }
    }

    /// Signed steps the dial moved since the previous call.
    pub fn change<T: AsRef<ControlData>>(&mut self, dj: &DjTurntable<T>) -> i8 {
        self.dial.change(dj.effect_dial())
    }
}

impl Default for EffectRollover {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Base only: sticks centered, dial and slider at zero, nothing pressed
    const BASE_ONLY: [u8; 6] = [0x20, 0x20, 0x10, 0x00, 0xFE, 0xFF];

    #[test]
    fn test_turntable_base_only() {
        let data = ControlData::from(BASE_ONLY);
        let mut dj = DjTurntable::new(&data);

        assert_eq!(dj.joy_x(), 32);
        assert_eq!(dj.joy_y(), 32);
        assert_eq!(dj.effect_dial(), 0);
        assert_eq!(dj.crossfade_slider(), 0);
        assert_eq!(dj.turntable(), 0);
        assert!(!dj.button_euphoria());
        assert!(!dj.left().connected());
        assert!(!dj.right().connected());
        assert_eq!(dj.turntable_config(), TurntableConfig::BaseOnly);
        assert_eq!(dj.num_turntables(), 0);
    }

    #[test]
    fn test_turntable_platter_sign() {
        let mut data = ControlData::from(BASE_ONLY);
        let mut dj = DjTurntable::new(&mut data);

        for value in [TURNTABLE_MIN, -20, -1, 0, 1, 17, TURNTABLE_MAX] {
            dj.left_mut().set_turntable(value);
            dj.right_mut().set_turntable(-value.max(-TURNTABLE_MAX));
            assert_eq!(dj.left().turntable(), value);
            assert_eq!(dj.right().turntable(), -value.max(-TURNTABLE_MAX));
        }

        dj.left_mut().set_turntable(100);
        assert_eq!(dj.left().turntable(), TURNTABLE_MAX);
        dj.left_mut().set_turntable(-100);
        assert_eq!(dj.left().turntable(), TURNTABLE_MIN);
    }

    #[test]
    fn test_turntable_raw_platter_decode() {
        // Left platter: magnitude 0b11110 with the sign bit set reads as -2
        let data = ControlData::from([0x20, 0x20, 0x10, 0b0001_1110, 0xFF, 0xFF]);
        let dj = DjTurntable::new(&data);
        assert_eq!(dj.left().turntable(), -2);
    }

    #[test]
    fn test_turntable_combined_controls() {
        let mut data = ControlData::from(BASE_ONLY);
        let mut dj = DjTurntable::new(&mut data);

        dj.left_mut().set_turntable(5);
        dj.right_mut().set_turntable(-2);
        dj.right_mut().set_button_blue(true);
        dj.left_mut().set_button_green(true);

        assert_eq!(dj.turntable(), 3);
        assert!(dj.button_blue());
        assert!(dj.button_green());
        assert!(!dj.button_red());
        assert!(dj.right().button_blue());
        assert!(!dj.left().button_blue());
    }

    #[test]
    fn test_turntable_config_latches_both() {
        let mut data = ControlData::from(BASE_ONLY);
        let mut dj = DjTurntable::new(&mut data);

        dj.left_mut().set_button_red(true);
        assert_eq!(dj.turntable_config(), TurntableConfig::Left);
        assert_eq!(dj.num_turntables(), 1);

        // Remembered as attached after it goes quiet
        dj.left_mut().set_button_red(false);
        assert!(dj.left().connected());
        assert_eq!(dj.turntable_config(), TurntableConfig::Left);
        assert!(!dj.right().connected());

        dj.left_mut().set_turntable(3);
        dj.right_mut().set_turntable(-3);
        assert_eq!(dj.turntable_config(), TurntableConfig::Both);

        dj.left_mut().set_turntable(0);
        dj.right_mut().set_turntable(0);
        assert_eq!(dj.turntable_config(), TurntableConfig::Both);
        assert_eq!(dj.num_turntables(), 2);
        assert!(dj.right().connected());
    }

    #[test]
    fn test_turntable_crossfade_and_dial() {
        let mut data = ControlData::from(BASE_ONLY);
        let mut dj = DjTurntable::new(&mut data);

        dj.set_crossfade_slider(-8);
        assert_eq!(dj.crossfade_slider(), -8);
        dj.set_crossfade_slider(7);
        assert_eq!(dj.crossfade_slider(), 7);
        dj.set_crossfade_slider(100);
        assert_eq!(dj.crossfade_slider(), 7);
        dj.set_crossfade_slider(-100);
        assert_eq!(dj.crossfade_slider(), -8);

        dj.set_effect_dial(27);
        assert_eq!(dj.effect_dial(), 27);
        assert_eq!(dj.crossfade_slider(), -8);
        assert_eq!(dj.right().turntable(), 0);
    }

    #[test]
    fn test_effect_rollover() {
        let mut data = ControlData::from(BASE_ONLY);
        let mut rollover = EffectRollover::new();

        let mut dj = DjTurntable::new(&mut data);
        dj.set_effect_dial(30);
        assert_eq!(rollover.change(&dj), -2);

        dj.set_effect_dial(2);
        assert_eq!(rollover.change(&dj), 4);
        assert_eq!(rollover.change(&dj), 0);
    }
}
