use embedded_hal::i2c::I2c;

use crate::{error::Error, expander::Pcf8574};

use super::{DrivePins, PinMode};

/// LCD lines wired to the ports of a [`Pcf8574`], a line is named by its port number 0..=7
///
/// Every line change is one full byte write on the I2C bus.
pub struct ExpanderPins<I2C: I2c> {
    expander: Pcf8574<I2C>,
}

impl<I2C: I2c> ExpanderPins<I2C> {
    #[allow(missing_docs)]
    pub fn new(expander: Pcf8574<I2C>) -> Self {
        Self { expander }
    }

    #[allow(missing_docs)]
    pub fn expander(&self) -> &Pcf8574<I2C> {
        &self.expander
    }

    #[allow(missing_docs)]
    pub fn expander_mut(&mut self) -> &mut Pcf8574<I2C> {
        &mut self.expander
    }

    /// Give the expander back
    pub fn release(self) -> Pcf8574<I2C> {
        self.expander
    }
}

impl<I2C: I2c> DrivePins for ExpanderPins<I2C> {
    type PinId = u8;
    type Error = Error<I2C::Error>;

    /// PCF8574 ports are quasi-bidirectional, there is no direction to latch.
    /// Only the port number is checked.
    fn configure_direction(&mut self, pin: u8, _mode: PinMode) -> Result<(), Self::Error> {
        match pin {
            0..=7 => Ok(()),
            _ => Err(Error::InvalidPin(pin)),
        }
    }

    fn write_digital(&mut self, pin: u8, level: bool) -> Result<(), Self::Error> {
        self.expander.set_bit(pin, level)
    }

    /// Note:
    /// This returns the level last *written* to the port, taken from the shadow register,
    /// not a live read of the bus. A line driven from outside reads back as whatever
    /// software last wrote to it. Read real inputs some other way.
    fn read_digital(&mut self, pin: u8) -> Result<bool, Self::Error> {
        self.expander.read_bit(pin)
    }
}
