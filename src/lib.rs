/*!
# LCD 1602 Driver, 4 bit mode, over GPIO or a PCF8574 I2C expander

Basic Usage:

1. Initialize a "pin driver" <br/>
    This crate include 2 drivers:
    * MCU pins wired straight to the LCD [`pins::DirectPins`]
    * PCF8574 I2C expander backpack [`pins::ExpanderPins`], on top of [`expander::Pcf8574`]

    You can choose either of it, or you can use any driver implemented [`pins::DrivePins`].
<br/>
<br/>
2. Use [`lcd::Lcd::new()`] to create a [`lcd::Lcd`], and initialize LCD1602 hardware
<br/>
<br/>
3. use any methods provide by [`lcd::Lcd`] to control LCD1602

```ignore
let expander = Pcf8574::probe(&mut i2c)?;
let mut pins = ExpanderPins::new(expander);
let mut lcd = Lcd::new(&mut pins, &mut delay, PinAssignment::pcf8574(), Config::default())?;
lcd.write_text("CPU: 42.00 C\n    12:00:00")?;
```
*/

#![no_std]
#![warn(missing_docs)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod command;
pub mod error;
pub mod expander;
pub mod lcd;
pub mod pins;
pub mod state;
pub mod utils;

pub use error::Error;
