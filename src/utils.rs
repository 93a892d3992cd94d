//! Bit helpers for register bytes and nibbles

/// Level of a single bit in a register byte
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitState {
    /// Bit is 0
    Clear,
    /// Bit is 1
    Set,
}

impl From<bool> for BitState {
    fn from(level: bool) -> Self {
        match level {
            true => BitState::Set,
            false => BitState::Clear,
        }
    }
}

impl From<BitState> for bool {
    fn from(state: BitState) -> Self {
        state == BitState::Set
    }
}

/// Simple bit ops on a register sized value
pub trait BitOps {
    #[allow(missing_docs)]
    fn set_bit(&mut self, pos: u8) -> Self;
    #[allow(missing_docs)]
    fn clear_bit(&mut self, pos: u8) -> Self;
    /// Set or clear bit `pos` depending on `state`
    fn put_bit(&mut self, pos: u8, state: impl Into<BitState>) -> Self;
    #[allow(missing_docs)]
    fn check_bit(&self, pos: u8) -> BitState;
}

impl BitOps for u8 {
    fn set_bit(&mut self, pos: u8) -> Self {
        assert!(pos <= 7, "bit offset larger than 7");
        *self |= 1u8 << pos;
        *self
    }

    fn clear_bit(&mut self, pos: u8) -> Self {
        assert!(pos <= 7, "bit offset larger than 7");
        *self &= !(1u8 << pos);
        *self
    }

    fn put_bit(&mut self, pos: u8, state: impl Into<BitState>) -> Self {
        match state.into() {
            BitState::Set => self.set_bit(pos),
            BitState::Clear => self.clear_bit(pos),
        }
    }

    fn check_bit(&self, pos: u8) -> BitState {
        assert!(pos <= 7, "bit offset larger than 7");

        BitState::from((*self >> pos) & 1 == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_bit_follows_state() {
        let mut value = 0b1000_0001u8;

        assert_eq!(value.put_bit(3, true), 0b1000_1001);
        assert_eq!(value.put_bit(7, BitState::Clear), 0b0000_1001);
        assert_eq!(value, 0b0000_1001);
    }

    #[test]
    fn check_bit_reads_each_position() {
        let value = 0b0100_0010u8;

        assert_eq!(value.check_bit(1), BitState::Set);
        assert_eq!(value.check_bit(6), BitState::Set);
        assert_eq!(value.check_bit(0), BitState::Clear);
        assert!(!bool::from(value.check_bit(7)));
    }

    #[test]
    #[should_panic(expected = "bit offset larger than 7")]
    fn offset_past_msb_panics() {
        let mut value = 0u8;
        value.set_bit(8);
    }
}
