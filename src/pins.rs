//! Pin drivers
//!
//! [`Lcd`](crate::lcd::Lcd) never touches hardware directly, it sets named lines high and low
//! through a [`DrivePins`]. This crate include 2 of them:
//! * [`DirectPins`], lines are MCU GPIO pins
//! * [`ExpanderPins`], lines are the 8 ports of a PCF8574 I2C expander
//!
//! You can also implement [`DrivePins`] for any other way of wiring the LCD.

mod direct_pins;
mod expander_pins;

pub use direct_pins::DirectPins;
pub use expander_pins::ExpanderPins;

/// Direction of a line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum PinMode {
    Input,
    Output,
}

/// [`DrivePins`] is the trait a pin driver should implement to drive the LCD lines
pub trait DrivePins {
    /// How a line is named
    type PinId: Copy;
    /// Error of a line operation
    type Error;

    /// Set the direction of a line, it should be called before the line is used
    fn configure_direction(&mut self, pin: Self::PinId, mode: PinMode) -> Result<(), Self::Error>;

    /// Drive a line, `true` is high level
    fn write_digital(&mut self, pin: Self::PinId, level: bool) -> Result<(), Self::Error>;

    /// Read a line, `true` is high level
    fn read_digital(&mut self, pin: Self::PinId) -> Result<bool, Self::Error>;

    #[allow(missing_docs)]
    fn set_high(&mut self, pin: Self::PinId) -> Result<(), Self::Error> {
        self.write_digital(pin, true)
    }

    #[allow(missing_docs)]
    fn set_low(&mut self, pin: Self::PinId) -> Result<(), Self::Error> {
        self.write_digital(pin, false)
    }
}

/// Which line of a [`DrivePins`] is wired to which LCD pin
///
/// `data[0]` goes to DB4 and carries bit 0 of a nibble, `data[3]` goes to DB7.
/// RW pin of the LCD is expected to be tied to ground.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment<Id> {
    /// RS, low for instruction, high for data
    pub register_select: Id,
    /// E, latch on falling edge
    pub enable: Id,
    /// DB4 to DB7
    pub data: [Id; 4],
    /// Backlight switch, if the board has one
    pub backlight: Option<Id>,
}

impl PinAssignment<u8> {
    /// Wiring of the common PCF8574 backpack board
    ///
    /// P0 -> RS, P1 -> RW, P2 -> E, P3 -> backlight, P4..P7 -> DB4..DB7
    pub const fn pcf8574() -> Self {
        Self {
            register_select: 0,
            enable: 2,
            data: [4, 5, 6, 7],
            backlight: Some(3),
        }
    }

    /// Slot layout of [`DirectPins::new_4pin`]
    pub const fn direct_4pin() -> Self {
        Self {
            register_select: 0,
            enable: 1,
            data: [2, 3, 4, 5],
            backlight: None,
        }
    }
}

impl<Id: Copy> PinAssignment<Id> {
    /// All lines used, control lines first
    pub fn lines(&self) -> impl Iterator<Item = Id> + '_ {
        [self.register_select, self.enable]
            .into_iter()
            .chain(self.data)
            .chain(self.backlight)
    }
}
