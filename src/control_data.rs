use crate::bitfield::{extract_bit, merge_bit, BitMap, ControlField};

/// Maximum number of control data bytes sent by a controller.
pub const CONTROL_DATA_MAX: usize = 6;

/// Reason for rejecting a polled payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFault {
    /// Every byte was zero, nothing answered on the bus.
    AllZero,
    /// Every byte was `0xFF`, the controller was not initialized.
    AllOnes,
}

impl std::fmt::Display for PayloadFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AllZero => f.write_str("all bytes zero"),
            Self::AllOnes => f.write_str("all bits set"),
        }
    }
}

/// Checks a raw payload for the two shapes a broken bus produces.
///
/// # Errors
///
/// Returns the fault if the payload is all zeros or all ones.
pub fn verify_data(data: &[u8]) -> Result<(), PayloadFault> {
    let (or_check, and_check) = data
        .iter()
        .fold((0x00u8, 0xFFu8), |(or, and), &byte| (or | byte, and & byte));

    if or_check == 0x00 {
        Err(PayloadFault::AllZero)
    } else if and_check == 0xFF {
        Err(PayloadFault::AllOnes)
    } else {
        Ok(())
    }
}

/// The last control data polled from a controller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ControlData {
    data: [u8; CONTROL_DATA_MAX],
}

impl ControlData {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            data: [0; CONTROL_DATA_MAX],
        }
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; CONTROL_DATA_MAX] {
        &self.data
    }

    /// Returns the byte at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`CONTROL_DATA_MAX`]. Control layouts are fixed,
    /// so this is a bug in the layout rather than bad data.
    #[must_use]
    pub fn byte(&self, index: u8) -> u8 {
        self.data[usize::from(index)]
    }

    #[must_use]
    pub fn get(&self, index: u8) -> Option<u8> {
        self.data.get(usize::from(index)).copied()
    }

    /// Overwrites the byte at `index`. Indices past the end are ignored.
    pub fn set_byte(&mut self, index: u8, value: u8) {
        if let Some(byte) = self.data.get_mut(usize::from(index)) {
            *byte = value;
        }
    }

    /// Decodes a control.
    #[must_use]
    pub fn field<F: ControlField + ?Sized>(&self, field: &F) -> u8 {
        field.decode(self)
    }

    /// Merges a new value for a control.
    pub fn set_field<F: ControlField + ?Sized>(&mut self, value: u8, field: &F) {
        field.encode(value, self);
    }

    /// Returns `true` if the button is pressed.
    ///
    /// Buttons are active-low on the wire, a cleared bit means pressed.
    #[must_use]
    pub fn bit(&self, map: BitMap) -> bool {
        self.raw_bit(map.index, map.bit)
    }

    /// Same as [`ControlData::bit`] without a descriptor.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn raw_bit(&self, index: u8, bit: u8) -> bool {
        !extract_bit(self.byte(index), bit)
    }

    /// Sets a button, `true` meaning pressed.
    pub fn set_bit(&mut self, pressed: bool, map: BitMap) {
        if let Some(existing) = self.get(map.index) {
            self.set_byte(map.index, merge_bit(!pressed, existing, map.bit));
        }
    }

    /// Replaces the leading bytes with `payload`, leaving the rest as they were.
    pub(crate) fn replace(&mut self, payload: &[u8]) {
        let size = usize::min(payload.len(), CONTROL_DATA_MAX);
        self.data[..size].copy_from_slice(&payload[..size]);
    }

    pub(crate) fn clear(&mut self) {
        self.data = [0; CONTROL_DATA_MAX];
    }
}

impl From<[u8; CONTROL_DATA_MAX]> for ControlData {
    fn from(data: [u8; CONTROL_DATA_MAX]) -> Self {
        Self { data }
    }
}

impl AsRef<ControlData> for ControlData {
    fn as_ref(&self) -> &ControlData {
        self
    }
}

impl AsMut<ControlData> for ControlData {
    fn as_mut(&mut self) -> &mut ControlData {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitfield::ByteMap;

    #[test]
    fn test_verify_data() {
        assert_eq!(verify_data(&[0x00; 6]), Err(PayloadFault::AllZero));
        assert_eq!(verify_data(&[0xFF; 6]), Err(PayloadFault::AllOnes));
        assert_eq!(verify_data(&[0x00, 0xFF, 0x00, 0x00, 0x00, 0x00]), Ok(()));
        assert_eq!(verify_data(&[0x7F, 0x80, 0x80, 0x80, 0x80, 0x80]), Ok(()));
        assert_eq!(verify_data(&[]), Err(PayloadFault::AllZero));
    }

    #[test]
    fn test_button_bits_are_active_low() {
        let map = BitMap::new(5, 1);
        let mut data = ControlData::from([0xFF; 6]);
        assert!(!data.bit(map));

        data.set_bit(true, map);
        assert_eq!(data.byte(5), 0b1111_1101);
        assert!(data.bit(map));
        assert!(data.raw_bit(5, 1));

        data.set_bit(false, map);
        assert_eq!(data.byte(5), 0xFF);
        assert!(!data.bit(map));
    }

    #[test]
    fn test_set_bit_out_of_range_is_ignored() {
        let mut data = ControlData::from([0xFF; 6]);
        data.set_bit(true, BitMap::new(7, 0));
        assert_eq!(data.as_bytes(), &[0xFF; 6]);
    }

    #[test]
    fn test_field_accessors() {
        let mut data = ControlData::new();
        data.set_field(0b10_1010, &ByteMap::aligned(1, 6, 0));
        data.set_field(0b11, &ByteMap::aligned(1, 2, 6));
        assert_eq!(data.byte(1), 0b1110_1010);
        assert_eq!(data.field(&ByteMap::aligned(1, 6, 0)), 0b10_1010);
    }

    #[test]
    fn test_replace_is_partial_for_short_payloads() {
        let mut data = ControlData::from([9; 6]);
        data.replace(&[1, 2, 3]);
        assert_eq!(data.as_bytes(), &[1, 2, 3, 9, 9, 9]);

        data.clear();
        assert_eq!(data, ControlData::new());
    }
}
