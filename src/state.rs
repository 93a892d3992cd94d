//! Software mirror of the LCD state
//!
//! The LCD is driven write only, so what the controller currently shows is only known
//! through what was last sent. [`DisplayMode`] holds that, [`Geometry`] describes the panel.

use crate::command::{Command, CommandSet, MoveDirection, ShiftType, State};

/// DDRAM address of the first column of each row
pub const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Mode flags the LCD keeps in its "display on/off" and "entry mode" registers
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayMode {
    display_on: State,
    cursor_on: State,
    cursor_blink: State,
    direction: MoveDirection,
    shift_type: ShiftType,
}

// the state bring up leaves the LCD in
impl Default for DisplayMode {
    fn default() -> Self {
        Self {
            display_on: State::On,
            cursor_on: State::Off,
            cursor_blink: State::Off,
            direction: MoveDirection::LeftToRight,
            shift_type: ShiftType::CursorOnly,
        }
    }
}

#[allow(missing_docs)]
impl DisplayMode {
    pub fn get_display_state(&self) -> State {
        self.display_on
    }

    pub(crate) fn set_display_state(&mut self, display: State) {
        self.display_on = display;
    }

    pub fn get_cursor_state(&self) -> State {
        self.cursor_on
    }

    pub(crate) fn set_cursor_state(&mut self, cursor: State) {
        self.cursor_on = cursor;
    }

    pub fn get_cursor_blink(&self) -> State {
        self.cursor_blink
    }

    pub(crate) fn set_cursor_blink(&mut self, blink: State) {
        self.cursor_blink = blink;
    }

    pub fn get_direction(&self) -> MoveDirection {
        self.direction
    }

    pub(crate) fn set_direction(&mut self, dir: MoveDirection) {
        self.direction = dir;
    }

    pub fn get_shift_type(&self) -> ShiftType {
        self.shift_type
    }

    pub(crate) fn set_shift_type(&mut self, shift: ShiftType) {
        self.shift_type = shift;
    }

    pub(crate) fn display_control_command(&self) -> CommandSet {
        CommandSet::DisplayOnOff {
            display: self.display_on,
            cursor: self.cursor_on,
            cursor_blink: self.cursor_blink,
        }
    }

    pub(crate) fn entry_mode_command(&self) -> CommandSet {
        CommandSet::EntryModeSet(self.direction, self.shift_type)
    }

    /// The "display on/off control" byte matching this mode
    pub fn display_control(&self) -> u8 {
        Command::from(self.display_control_command()).get_data()
    }

    /// The "entry mode set" byte matching this mode
    pub fn entry_mode(&self) -> u8 {
        Command::from(self.entry_mode_command()).get_data()
    }
}

/// Visible size of the panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Geometry {
    columns: u8,
    rows: u8,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(16, 2)
    }
}

impl Geometry {
    /// `rows` should be between 1 and 4, a 4 row panel is a folded 2 line controller
    pub fn new(columns: u8, rows: u8) -> Self {
        assert!(columns > 0, "LCD should have at least 1 column");
        assert!(
            (1..=ROW_OFFSETS.len() as u8).contains(&rows),
            "LCD should have 1 to 4 rows"
        );

        Self { columns, rows }
    }

    #[allow(missing_docs)]
    pub fn get_columns(&self) -> u8 {
        self.columns
    }

    #[allow(missing_docs)]
    pub fn get_rows(&self) -> u8 {
        self.rows
    }

    /// Rows past the last one stick to the last one
    pub fn clamp_row(&self, row: u8) -> u8 {
        row.min(self.rows - 1)
    }

    /// DDRAM address of a position, with row clamped
    pub fn ddram_addr(&self, col: u8, row: u8) -> u8 {
        col.wrapping_add(ROW_OFFSETS[self.clamp_row(row) as usize])
    }
}
