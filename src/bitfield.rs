//! Addressing of controls packed into the bytes of the control data.
//!
//! A [`ByteMap`] selects a run of bits inside one byte, a [`BitMap`] selects a single
//! active-low button bit. Values that are spread over several bytes are described by
//! an array of `ByteMap`s, each one moving its slice to the right place of the output.

use crate::control_data::ControlData;

/// Mask covering `width` bits starting at bit `start` (counted from the LSB).
#[must_use]
pub const fn build_mask(width: u8, start: u8) -> u8 {
    (0xFF >> (8 - width)) << start
}

#[must_use]
pub const fn extract_bit(data: u8, pos: u8) -> bool {
    data & (1 << pos) != 0
}

/// Applies the mask and moves the result `shift` bits to the right.
#[must_use]
pub const fn slice_byte(data: u8, mask: u8, shift: u8) -> u8 {
    (data & mask) >> shift
}

/// Replaces the bits under `mask` in `existing` with the matching bits of `new_data`.
///
/// `shift` is the same offset used by [`slice_byte`], so the bits taken from `new_data`
/// are the ones a decode of that slice would have produced. Everything outside of
/// `mask` is left as it was.
#[must_use]
pub const fn merge_slice(new_data: u8, existing: u8, mask: u8, shift: u8) -> u8 {
    let cleared = existing & !mask;
    cleared | ((new_data & (mask >> shift)) << shift)
}

#[must_use]
pub const fn merge_bit(bit: bool, existing: u8, pos: u8) -> u8 {
    if bit {
        existing | (1 << pos)
    } else {
        existing & !(1 << pos)
    }
}

/// Location of a multi-bit control inside the control data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteMap {
    index: u8,
    mask: u8,
    shift: u8,
}

impl ByteMap {
    /// Describes `width` bits starting at bit `start` of byte `index`, moved right by
    /// `shift` when decoded.
    ///
    /// # Panics
    ///
    /// Panics if the bits do not fit in one byte. Descriptors are meant to be built in
    /// `const` tables, where this turns into a compile error.
    #[must_use]
    pub const fn new(index: u8, width: u8, start: u8, shift: u8) -> Self {
        assert!(width >= 1 && width <= 8, "field width must be 1-8 bits");
        assert!(start + width <= 8, "field must fit inside one byte");
        assert!(shift < 8, "shift must be below 8");
        Self {
            index,
            mask: build_mask(width, start),
            shift,
        }
    }

    /// A right-aligned field: `width` bits at `start`, shifted down to bit 0.
    #[must_use]
    pub const fn aligned(index: u8, width: u8, start: u8) -> Self {
        Self::new(index, width, start, start)
    }

    /// The whole byte at `index`.
    #[must_use]
    pub const fn full(index: u8) -> Self {
        Self::new(index, 8, 0, 0)
    }

    #[must_use]
    pub const fn index(&self) -> u8 {
        self.index
    }

    #[must_use]
    pub const fn mask(&self) -> u8 {
        self.mask
    }

    #[must_use]
    pub const fn shift(&self) -> u8 {
        self.shift
    }
}

/// Location of an active-low button bit inside the control data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitMap {
    pub index: u8,
    pub bit: u8,
}

impl BitMap {
    /// # Panics
    ///
    /// Panics if `bit` is not a bit of a byte.
    #[must_use]
    pub const fn new(index: u8, bit: u8) -> Self {
        assert!(bit < 8, "bit position must be 0-7");
        Self { index, bit }
    }
}

/// A control that can be read from and written into the control data.
pub trait ControlField {
    /// Reads the value of the control.
    ///
    /// # Panics
    ///
    /// Panics if the field points past the end of the control data.
    fn decode(&self, data: &ControlData) -> u8;

    /// Merges `value` into the control data without touching other controls.
    /// Fields pointing past the end of the control data are ignored.
    fn encode(&self, value: u8, data: &mut ControlData);
}

impl ControlField for ByteMap {
    fn decode(&self, data: &ControlData) -> u8 {
        slice_byte(data.byte(self.index), self.mask, self.shift)
    }

    fn encode(&self, value: u8, data: &mut ControlData) {
        if let Some(existing) = data.get(self.index) {
            data.set_byte(self.index, merge_slice(value, existing, self.mask, self.shift));
        }
    }
}

impl ControlField for [ByteMap] {
    fn decode(&self, data: &ControlData) -> u8 {
        self.iter().fold(0, |out, segment| out | segment.decode(data))
    }

    fn encode(&self, value: u8, data: &mut ControlData) {
        for segment in self {
            segment.encode(value, data);
        }
    }
}

impl<const N: usize> ControlField for [ByteMap; N] {
    fn decode(&self, data: &ControlData) -> u8 {
        self.as_slice().decode(data)
    }

    fn encode(&self, value: u8, data: &mut ControlData) {
        self.as_slice().encode(value, data);
    }
}
