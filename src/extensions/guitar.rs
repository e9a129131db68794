use crate::bitfield::{BitMap, ByteMap};
use crate::control_data::ControlData;
use crate::extensions::classic;

pub const JOY_X: ByteMap = classic::LEFT_JOY_X;
pub const JOY_Y: ByteMap = classic::LEFT_JOY_Y;

pub const STRUM_UP: BitMap = BitMap::new(5, 0);
pub const STRUM_DOWN: BitMap = BitMap::new(4, 6);

pub const FRET_GREEN: BitMap = BitMap::new(5, 4);
pub const FRET_RED: BitMap = BitMap::new(5, 6);
pub const FRET_YELLOW: BitMap = BitMap::new(5, 3);
pub const FRET_BLUE: BitMap = BitMap::new(5, 5);
pub const FRET_ORANGE: BitMap = BitMap::new(5, 7);

pub const WHAMMY: ByteMap = ByteMap::aligned(3, 5, 0);
pub const TOUCHBAR: ByteMap = ByteMap::aligned(2, 5, 0);

/// Touchbar reading of guitars without a touchbar (all data bits set).
pub const TOUCHBAR_ABSENT: u8 = 31;

/// Touchbar reading when nothing is touched.
pub const TOUCHBAR_UNTOUCHED: u8 = 15;

/// Guitar Hero guitar: five frets, a strum bar, a whammy bar and on newer
/// models a slider touchbar.
#[derive(Debug, Clone)]
pub struct GuitarController<T> {
    data: T,
    touchbar_seen: bool,
}

impl<T: AsRef<ControlData>> GuitarController<T> {
    pub const fn new(data: T) -> Self {
        Self {
            data,
            touchbar_seen: false,
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

    /// Either direction of the strum bar.
    #[must_use]
    pub fn strum(&self) -> bool {
        self.strum_up() || self.strum_down()
    }

    /// Whether this guitar has a touchbar.
    ///
    /// Older guitars report all data bits set, so this turns true the first time a
    /// different value is seen and stays true from then on. The touch readings below
    /// are only meaningful once it does.
    pub fn supports_touchbar(&mut self) -> bool {
        if !self.touchbar_seen && self.touchbar() != TOUCHBAR_ABSENT {
            log::debug!("Guitar touchbar detected");
            self.touchbar_seen = true;
        }
        self.touchbar_seen
    }

    #[must_use]
    pub fn touch_green(&self) -> bool {
        matches!(self.touchbar(), 1..=7)
    }

    #[must_use]
    pub fn touch_red(&self) -> bool {
        matches!(self.touchbar(), 7..=13)
    }

    #[must_use]
    pub fn touch_yellow(&self) -> bool {
        let value = self.touchbar();
        (12..=21).contains(&value) && value != TOUCHBAR_UNTOUCHED
    }

    #[must_use]
    pub fn touch_blue(&self) -> bool {
        matches!(self.touchbar(), 20..=26)
    }

    #[must_use]
    pub fn touch_orange(&self) -> bool {
        self.touchbar() >= 26
    }
}

control_bytes!(GuitarController {
    joy_x, set_joy_x => JOY_X;
    joy_y, set_joy_y => JOY_Y;
    whammy_bar, set_whammy_bar => WHAMMY;
    touchbar, set_touchbar => TOUCHBAR;
});

control_bits!(GuitarController {
    strum_up, set_strum_up => STRUM_UP;
    strum_down, set_strum_down => STRUM_DOWN;
    fret_green, set_fret_green => FRET_GREEN;
    fret_red, set_fret_red => FRET_RED;
    fret_yellow, set_fret_yellow => FRET_YELLOW;
    fret_blue, set_fret_blue => FRET_BLUE;
    fret_orange, set_fret_orange => FRET_ORANGE;
    button_plus, set_button_plus => classic::BUTTON_PLUS;
    button_minus, set_button_minus => classic::BUTTON_MINUS;
});
