//! PCF8574 8 bit I2C I/O expander
//!
//! The PCF8574 has no register to read back what was written to its ports
//! (a read returns pin levels, which are weak pulled up on input lines).
//! So [`Pcf8574`] keeps a shadow of the last byte it transmitted, and every
//! single bit change is a read-modify-write on that shadow, followed by
//! a full byte transmission.

use embedded_hal::i2c::I2c;

use crate::{
    error::Error,
    utils::{BitOps, BitState},
};

/// 7 bit address of PCF8574 with all address pins high
pub const PRIMARY_ADDRESS: u8 = 0x27;
/// 7 bit address of PCF8574A with all address pins high
pub const ALTERNATE_ADDRESS: u8 = 0x3F;

/// A PCF8574 (or PCF8574A) on an I2C bus
///
/// It's the only writer of the device; sharing one between threads needs an external lock
/// held for a whole LCD call, since a half sent nibble leaves LCD and shadow out of step.
pub struct Pcf8574<I2C> {
    i2c: I2C,
    address: u8,
    shadow: u8,
}

impl<I2C: I2c> Pcf8574<I2C> {
    /// Attach to the expander at `address`, all ports are driven low
    ///
    /// Fails with [`Error::Transport`] if the test write is not acknowledged
    pub fn new(i2c: I2C, address: u8) -> Result<Self, Error<I2C::Error>> {
        Self::attach(i2c, address).map_err(|(_, e)| Error::Transport(e))
    }

    /// Attach to a PCF8574 at [`PRIMARY_ADDRESS`], or if nothing answers there,
    /// to a PCF8574A at [`ALTERNATE_ADDRESS`]
    pub fn probe(i2c: I2C) -> Result<Self, Error<I2C::Error>> {
        Self::attach(i2c, PRIMARY_ADDRESS).or_else(|(i2c, primary)| {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "no PCF8574 at {=u8:#x}, trying {=u8:#x}",
                PRIMARY_ADDRESS,
                ALTERNATE_ADDRESS
            );

            Self::attach(i2c, ALTERNATE_ADDRESS)
                .map_err(|(_, alternate)| Error::Configuration { primary, alternate })
        })
    }

    // the bus is handed back on failure, so the caller can try another address
    fn attach(mut i2c: I2C, address: u8) -> Result<Self, (I2C, I2C::Error)> {
        match i2c.write(address, &[0]) {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("PCF8574 attached at {=u8:#x}", address);

                Ok(Self {
                    i2c,
                    address,
                    shadow: 0,
                })
            }
            Err(e) => Err((i2c, e)),
        }
    }

    /// Set or clear a single port, other ports keep their last written level
    pub fn set_bit(&mut self, index: u8, value: bool) -> Result<(), Error<I2C::Error>> {
        check_index(index)?;

        let mut next = self.shadow;
        next.put_bit(index, value);
        self.transmit(next)
    }

    /// Write all 8 ports at once
    pub fn write_byte(&mut self, value: u8) -> Result<(), Error<I2C::Error>> {
        self.transmit(value)
    }

    /// Last written level of a port, no bus transaction
    pub fn read_bit(&self, index: u8) -> Result<bool, Error<I2C::Error>> {
        check_index(index)?;

        Ok(self.shadow.check_bit(index) == BitState::Set)
    }

    /// Last written byte, no bus transaction
    pub fn read_byte(&self) -> u8 {
        self.shadow
    }

    #[allow(missing_docs)]
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Give the bus back
    pub fn release(self) -> I2C {
        self.i2c
    }

    // shadow only moves once the byte is on the wire
    fn transmit(&mut self, value: u8) -> Result<(), Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[value])
            .map_err(Error::Transport)?;
        self.shadow = value;
        Ok(())
    }
}

fn check_index<E>(index: u8) -> Result<(), Error<E>> {
    match index {
        0..=7 => Ok(()),
        _ => Err(Error::InvalidPin(index)),
    }
}
