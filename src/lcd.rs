//! The LCD driver
//!
//! Every call is blocking: it returns once all bytes and all required settle time are done.
//! Each byte goes out as 2 nibbles, each nibble is latched by a pulse on E.

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::{
    command::{Command, CommandSet, MoveDirection, ShiftType, State},
    pins::{DrivePins, PinAssignment},
    state::{DisplayMode, Geometry, ROW_OFFSETS},
    utils::{BitOps, BitState},
};

mod init;

pub use init::{Config, Timing};

/// A HD44780 compatible character LCD in 4 bit mode
///
/// The LCD is write only, so [`DisplayMode`] kept here is the only record of its mode.
/// It's updated only after the command changing it is fully sent.
pub struct Lcd<'a, 'b, Pins: DrivePins, Delayer: DelayNs> {
    pins: &'a mut Pins,
    delayer: &'b mut Delayer,
    assignment: PinAssignment<Pins::PinId>,
    geometry: Geometry,
    timing: Timing,
    mode: DisplayMode,
    backlight: State,
}

// settle on top of the fixed wait before every byte
#[derive(Clone, Copy, PartialEq)]
enum Settle {
    Standard,
    Long,
}

impl<'a, 'b, Pins, Delayer> Lcd<'a, 'b, Pins, Delayer>
where
    Pins: DrivePins,
    Delayer: DelayNs,
{
    /// Clear display and put cursor at home position, this command takes a long time
    pub fn clear(&mut self) -> Result<(), Pins::Error> {
        self.send(CommandSet::ClearDisplay, Settle::Long)
    }

    /// Put cursor at home position and undo any display shift, this command takes a long time
    pub fn home(&mut self) -> Result<(), Pins::Error> {
        self.send(CommandSet::ReturnHome, Settle::Long)
    }

    /// Move cursor to `col` of `row` (both start at 0)
    ///
    /// A `row` past the last row is taken as the last row
    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Pins::Error> {
        let addr = self.geometry.ddram_addr(col, row);
        self.send(CommandSet::SetDDRAM(addr), Settle::Standard)
    }

    /// Turn display on or off
    pub fn set_display_state(&mut self, display: State) -> Result<(), Pins::Error> {
        self.update_mode(
            |mode| mode.set_display_state(display),
            DisplayMode::display_control_command,
        )
    }

    /// Turn display on, content is kept while it's off
    pub fn display(&mut self) -> Result<(), Pins::Error> {
        self.set_display_state(State::On)
    }

    /// Turn display off quickly, it doesn't touch backlight
    pub fn no_display(&mut self) -> Result<(), Pins::Error> {
        self.set_display_state(State::Off)
    }

    /// Show or hide the underline cursor
    pub fn set_cursor_state(&mut self, cursor: State) -> Result<(), Pins::Error> {
        self.update_mode(
            |mode| mode.set_cursor_state(cursor),
            DisplayMode::display_control_command,
        )
    }

    /// Show underline cursor
    pub fn cursor(&mut self) -> Result<(), Pins::Error> {
        self.set_cursor_state(State::On)
    }

    /// Hide underline cursor
    pub fn no_cursor(&mut self) -> Result<(), Pins::Error> {
        self.set_cursor_state(State::Off)
    }

    /// Turn blinking of the character block at cursor on or off
    pub fn set_cursor_blink_state(&mut self, blink: State) -> Result<(), Pins::Error> {
        self.update_mode(
            |mode| mode.set_cursor_blink(blink),
            DisplayMode::display_control_command,
        )
    }

    /// Blink the character block at cursor
    pub fn blink(&mut self) -> Result<(), Pins::Error> {
        self.set_cursor_blink_state(State::On)
    }

    /// Stop blinking the character block at cursor
    pub fn no_blink(&mut self) -> Result<(), Pins::Error> {
        self.set_cursor_blink_state(State::Off)
    }

    /// Move cursor alone, or the whole display window, by one character
    ///
    /// DDRAM content is not changed
    pub fn shift_cursor_or_display(
        &mut self,
        shift_type: ShiftType,
        dir: MoveDirection,
    ) -> Result<(), Pins::Error> {
        self.send(
            CommandSet::CursorOrDisplayShift(shift_type, dir),
            Settle::Standard,
        )
    }

    /// Scroll display content one character to the left
    pub fn scroll_left(&mut self) -> Result<(), Pins::Error> {
        self.shift_cursor_or_display(ShiftType::CursorAndDisplay, MoveDirection::RightToLeft)
    }

    /// Scroll display content one character to the right
    pub fn scroll_right(&mut self) -> Result<(), Pins::Error> {
        self.shift_cursor_or_display(ShiftType::CursorAndDisplay, MoveDirection::LeftToRight)
    }

    /// Direction cursor moves after each write
    pub fn set_direction(&mut self, dir: MoveDirection) -> Result<(), Pins::Error> {
        self.update_mode(
            |mode| mode.set_direction(dir),
            DisplayMode::entry_mode_command,
        )
    }

    /// Text flows from left to right
    pub fn left_to_right(&mut self) -> Result<(), Pins::Error> {
        self.set_direction(MoveDirection::LeftToRight)
    }

    /// Text flows from right to left
    pub fn right_to_left(&mut self) -> Result<(), Pins::Error> {
        self.set_direction(MoveDirection::RightToLeft)
    }

    /// Whether cursor alone, or the whole display, moves after each write
    pub fn set_shift_type(&mut self, shift: ShiftType) -> Result<(), Pins::Error> {
        self.update_mode(
            |mode| mode.set_shift_type(shift),
            DisplayMode::entry_mode_command,
        )
    }

    /// Display moves on each write, so text appears to be pushed out of the cursor
    pub fn autoscroll(&mut self) -> Result<(), Pins::Error> {
        self.set_shift_type(ShiftType::CursorAndDisplay)
    }

    /// Display stays put on each write, only cursor moves
    pub fn no_autoscroll(&mut self) -> Result<(), Pins::Error> {
        self.set_shift_type(ShiftType::CursorOnly)
    }

    /// Write a string from current position
    ///
    /// `'\n'` jumps to the start of the second line, other characters are written by
    /// [`Lcd::write_char`]
    pub fn write_text(&mut self, text: &str) -> Result<(), Pins::Error> {
        text.chars().try_for_each(|char| match char {
            '\n' => self.send(CommandSet::SetDDRAM(ROW_OFFSETS[1]), Settle::Standard),
            _ => self.write_char(char),
        })
    }

    /// Write a [char] to current position
    ///
    /// Characters beyond U+00FF can't be in the character ROM, they become a full block (0xFF)
    pub fn write_char(&mut self, char: char) -> Result<(), Pins::Error> {
        self.write_u8_to_cur(u8::try_from(char).unwrap_or(0xFF))
    }

    /// Write a raw character code to current position
    pub fn write_u8_to_cur(&mut self, byte: u8) -> Result<(), Pins::Error> {
        self.send(CommandSet::WriteDataToRAM(byte), Settle::Standard)
    }

    /// Store a 5x8 custom graph at `index` (0 to 7) of CGRAM, only lower 5 bits of each line are used
    ///
    /// Afterwards the cursor is at home position, without undoing display shift
    pub fn write_graph_to_cgram(
        &mut self,
        index: u8,
        graph_data: &[u8; 8],
    ) -> Result<(), Pins::Error> {
        assert!(index < 8, "Only 8 graphs allowed in CGRAM");

        assert!(
            graph_data.iter().all(|&line| line < 2u8.pow(5)),
            "Only lower 5 bits use to construct display"
        );

        // if DDRAM is write from right to left, then when we change to CGRAM, graph will write from lower to upper
        // we will change it to left to right, to make writing correct
        let direction = self.get_direction();
        if direction == MoveDirection::RightToLeft {
            self.set_direction(MoveDirection::LeftToRight)?;
        }

        self.send(CommandSet::SetCGRAM(index << 3), Settle::Standard)?;
        graph_data.iter().try_for_each(|&line_data| {
            self.send(CommandSet::WriteDataToRAM(line_data), Settle::Standard)
        })?;

        if direction == MoveDirection::RightToLeft {
            self.set_direction(MoveDirection::RightToLeft)?;
        }

        // later data writes should land in DDRAM again
        self.set_cursor(0, 0)
    }

    /// Write custom graph `index` to current position
    pub fn write_graph_to_cur(&mut self, index: u8) -> Result<(), Pins::Error> {
        assert!(index < 8, "Only 8 graphs allowed in CGRAM");
        self.write_u8_to_cur(index)
    }

    /// Note:
    /// Without a backlight pin in [`PinAssignment`], this only updates the recorded state
    pub fn set_backlight(&mut self, backlight: State) -> Result<(), Pins::Error> {
        if let Some(pin) = self.assignment.backlight {
            self.pins.write_digital(pin, backlight == State::On)?;
        }
        self.backlight = backlight;
        Ok(())
    }

    #[allow(missing_docs)]
    pub fn get_backlight(&self) -> State {
        self.backlight
    }

    /// Mode last confirmed sent to the LCD
    pub fn get_mode(&self) -> DisplayMode {
        self.mode
    }

    #[allow(missing_docs)]
    pub fn get_display_state(&self) -> State {
        self.mode.get_display_state()
    }

    #[allow(missing_docs)]
    pub fn get_cursor_state(&self) -> State {
        self.mode.get_cursor_state()
    }

    #[allow(missing_docs)]
    pub fn get_cursor_blink_state(&self) -> State {
        self.mode.get_cursor_blink()
    }

    #[allow(missing_docs)]
    pub fn get_direction(&self) -> MoveDirection {
        self.mode.get_direction()
    }

    #[allow(missing_docs)]
    pub fn get_shift_type(&self) -> ShiftType {
        self.mode.get_shift_type()
    }

    #[allow(missing_docs)]
    pub fn get_geometry(&self) -> Geometry {
        self.geometry
    }

    #[allow(missing_docs)]
    pub fn get_timing(&self) -> Timing {
        self.timing
    }

    /// Wait for specified milliseconds
    pub fn delay_ms(&mut self, ms: u32) {
        self.delayer.delay_ms(ms);
    }

    /// Wait for specified microseconds
    pub fn delay_us(&mut self, us: u32) {
        self.delayer.delay_us(us)
    }

    /// Stop driving the LCD and hand pins and delayer back.
    /// The LCD keeps showing what it shows until power off
    pub fn release(self) -> (&'a mut Pins, &'b mut Delayer) {
        (self.pins, self.delayer)
    }
}

// protocol
impl<'a, 'b, Pins, Delayer> Lcd<'a, 'b, Pins, Delayer>
where
    Pins: DrivePins,
    Delayer: DelayNs,
{
    // work on a copy, so mode is only committed when the command is out
    fn update_mode(
        &mut self,
        change: impl FnOnce(&mut DisplayMode),
        command: fn(&DisplayMode) -> CommandSet,
    ) -> Result<(), Pins::Error> {
        let mut next = self.mode;
        change(&mut next);

        self.send(command(&next), Settle::Standard)?;
        self.mode = next;
        Ok(())
    }

    fn send(&mut self, command: impl Into<Command>, settle: Settle) -> Result<(), Pins::Error> {
        let command: Command = command.into();

        self.send_byte(command.get_data(), command.is_data())
            .inspect_err(|_| {
                #[cfg(feature = "defmt")]
                defmt::warn!("LCD transfer of {=u8:#x} failed", command.get_data());
            })?;

        if settle == Settle::Long {
            self.delayer.delay_us(self.timing.get_long_settle_us());
        }

        Ok(())
    }

    // RS is held at `as_data` for both nibbles, high nibble goes first
    fn send_byte(&mut self, value: u8, as_data: bool) -> Result<(), Pins::Error> {
        self.delayer.delay_us(self.timing.get_byte_settle_us());

        self.pins
            .write_digital(self.assignment.register_select, as_data)?;

        self.push_bits(value >> 4)?;
        self.pulse_enable()?;

        // release data lines between nibbles
        self.push_bits(0)?;

        self.push_bits(value & 0b1111)?;
        self.pulse_enable()
    }

    // most significant bit first, DB7 carries bit 3
    fn push_bits(&mut self, raw_bits: u8) -> Result<(), Pins::Error> {
        let data = self.assignment.data;

        data.iter()
            .enumerate()
            .rev()
            .try_for_each(|(index, &pin)| {
                let level = raw_bits.check_bit(index as u8) == BitState::Set;
                self.pins.write_digital(pin, level)
            })
    }

    fn pulse_enable(&mut self) -> Result<(), Pins::Error> {
        let enable = self.assignment.enable;
        let pulse_us = self.timing.get_enable_pulse_us();

        self.pins.set_low(enable)?;
        self.delayer.delay_us(pulse_us);
        self.pins.set_high(enable)?;
        self.delayer.delay_us(pulse_us);
        self.pins.set_low(enable)?;
        self.delayer.delay_us(self.timing.get_latch_settle_us());

        Ok(())
    }
}

impl<'a, 'b, Pins, Delayer> fmt::Write for Lcd<'a, 'b, Pins, Delayer>
where
    Pins: DrivePins,
    Delayer: DelayNs,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_text(s).map_err(|_| fmt::Error)
    }
}
