//! HD44780 instruction set, and how each instruction is laid out as a byte

use crate::utils::BitOps;

/// Instructions the driver sends to the LCD
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum CommandSet {
    // not a command from datasheet,
    // it's two "8 bit function set" nibbles, the first byte of power on bring up
    BringUp,
    // also not from datasheet,
    // a last "8 bit function set" nibble, followed by the nibble switching to 4 bit mode
    HalfFunctionSet,
    ClearDisplay,
    ReturnHome,
    EntryModeSet(MoveDirection, ShiftType),
    DisplayOnOff {
        display: State,
        cursor: State,
        cursor_blink: State,
    },
    CursorOrDisplayShift(ShiftType, MoveDirection),
    FunctionSet(LineMode, Font),
    SetCGRAM(u8),
    SetDDRAM(u8),
    WriteDataToRAM(u8),
}

/// Text flow direction, also the direction of a shift
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum MoveDirection {
    RightToLeft,
    #[default]
    LeftToRight,
}

/// Whether only the cursor moves, or the whole display moves with it
///
/// In entry mode, [`ShiftType::CursorAndDisplay`] is what is usually called "autoscroll"
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum ShiftType {
    #[default]
    CursorOnly,
    CursorAndDisplay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum State {
    Off,
    #[default]
    On,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum LineMode {
    OneLine,
    #[default]
    TwoLine,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum Font {
    #[default]
    Font5x8,
    Font5x11,
}

/// Which register of the LCD a byte goes to, it's the level of RS pin
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum RegisterSelection {
    Command,
    Data,
}

/// A byte ready to be sent, with the register it belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    rs: RegisterSelection,
    data: u8,
}

impl Command {
    pub(crate) fn new(rs: RegisterSelection, data: u8) -> Self {
        Self { rs, data }
    }

    /// Register this byte is written to
    pub fn get_register_selection(&self) -> RegisterSelection {
        self.rs
    }

    /// Raw byte on the bus
    pub fn get_data(&self) -> u8 {
        self.data
    }

    /// RS level: `true` for data, `false` for instruction
    pub fn is_data(&self) -> bool {
        self.rs == RegisterSelection::Data
    }
}

impl From<CommandSet> for Command {
    fn from(command: CommandSet) -> Self {
        match command {
            CommandSet::BringUp => Self::new(RegisterSelection::Command, 0b0011_0011),

            CommandSet::HalfFunctionSet => Self::new(RegisterSelection::Command, 0b0011_0010),

            CommandSet::ClearDisplay => Self::new(RegisterSelection::Command, 0b0000_0001),

            CommandSet::ReturnHome => Self::new(RegisterSelection::Command, 0b0000_0010),

            CommandSet::EntryModeSet(dir, st) => {
                let mut raw_bits: u8 = 0b0000_0100;

                match dir {
                    MoveDirection::RightToLeft => raw_bits.clear_bit(1),
                    MoveDirection::LeftToRight => raw_bits.set_bit(1),
                };

                match st {
                    ShiftType::CursorOnly => raw_bits.clear_bit(0),
                    ShiftType::CursorAndDisplay => raw_bits.set_bit(0),
                };

                Self::new(RegisterSelection::Command, raw_bits)
            }

            CommandSet::DisplayOnOff {
                display,
                cursor,
                cursor_blink,
            } => {
                let mut raw_bits: u8 = 0b0000_1000;

                raw_bits.put_bit(2, display == State::On);
                raw_bits.put_bit(1, cursor == State::On);
                raw_bits.put_bit(0, cursor_blink == State::On);

                Self::new(RegisterSelection::Command, raw_bits)
            }

            CommandSet::CursorOrDisplayShift(st, dir) => {
                let mut raw_bits: u8 = 0b0001_0000;

                raw_bits.put_bit(3, st == ShiftType::CursorAndDisplay);
                raw_bits.put_bit(2, dir == MoveDirection::LeftToRight);

                Self::new(RegisterSelection::Command, raw_bits)
            }

            // data width bit (bit 4) stays clear, this driver only speaks 4 bit mode
            CommandSet::FunctionSet(line, font) => {
                let mut raw_bits: u8 = 0b0010_0000;

                raw_bits.put_bit(3, line == LineMode::TwoLine);
                raw_bits.put_bit(2, font == Font::Font5x11);

                Self::new(RegisterSelection::Command, raw_bits)
            }

            CommandSet::SetCGRAM(addr) => {
                assert!(addr < 2u8.pow(6), "CGRAM address out of range");

                Self::new(RegisterSelection::Command, 0b0100_0000 | addr)
            }

            // DDRAM address is 7 bit wide, an overflowing column wraps inside it
            CommandSet::SetDDRAM(addr) => {
                Self::new(RegisterSelection::Command, 0b1000_0000 | (addr & 0b0111_1111))
            }

            CommandSet::WriteDataToRAM(data) => Self::new(RegisterSelection::Data, data),
        }
    }
}
