/// Turns an absolute reading on a cyclic range into the change since the last reading.
///
/// A jump of at least half the range is taken as the value wrapping around the end
/// of the range, so the shorter way around wins. Exactly half resolves as a wrap.
#[derive(Debug, Clone)]
pub struct RolloverChange {
    min: u8,
    max: u8,
    last: u8,
}

impl RolloverChange {
    #[must_use]
    pub const fn new(min: u8, max: u8) -> Self {
        Self { min, max, last: 0 }
    }

    #[must_use]
    pub const fn last(&self) -> u8 {
        self.last
    }

    /// Returns the signed change from the previous value to `value`.
    ///
    /// Values outside of `[min, max]` report no change and are not stored.
    ///
    /// The result is narrowed to `i8`. On ranges wider than 128 values a single step of
    /// exactly half the range does not fit: on `0..=255`, going from 128 back to 0 is a
    /// forward wrap of +128 and reads as -128.
    #[allow(clippy::cast_possible_truncation)] // Deltas of an 8-bit range wrap like the wire format
    pub fn change(&mut self, value: u8) -> i8 {
        if value == self.last || value < self.min || value > self.max {
            return 0;
        }

        let current = i16::from(value);
        let last = i16::from(self.last);

        let delta = if (current - last).abs() >= self.half_range() {
            if current < last {
                self.rollover_out(current, last)
            } else {
                -self.rollover_out(last, current)
            }
        } else {
            current - last
        };

        self.last = value;
        delta as i8
    }

    fn rollover_out(&self, low: i16, high: i16) -> i16 {
        (i16::from(self.max) - high) + low + 1
    }

    fn half_range(&self) -> i16 {
        i16::from((self.max - self.min) / 2) + 1
    }
}
