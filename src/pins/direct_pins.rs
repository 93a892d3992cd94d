use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::error::Error;

use super::{DrivePins, PinMode};

/// LCD lines wired straight to MCU pins
///
/// A line is named by its slot in the pin array. Every line has to be configured
/// with [`DrivePins::configure_direction`] before use, [`Lcd::new`](crate::lcd::Lcd::new)
/// does that for the lines it's given.
///
/// All pins should be of one type, with HALs that means "erased" pins. Pins should be
/// readable too, open drain outputs with pull up (or a 5V tolerant push pull pin) work.
pub struct DirectPins<Pin, const PIN_CNT: usize>
where
    Pin: OutputPin + InputPin,
{
    pins: [Pin; PIN_CNT],
    modes: [Option<PinMode>; PIN_CNT],
}

impl<Pin, const PIN_CNT: usize> DirectPins<Pin, PIN_CNT>
where
    Pin: OutputPin + InputPin,
{
    /// Take ownership of `pins`, none of them is configured yet
    pub fn new(pins: [Pin; PIN_CNT]) -> Self {
        Self {
            pins,
            modes: [None; PIN_CNT],
        }
    }

    /// Give the pins back
    pub fn release(self) -> [Pin; PIN_CNT] {
        self.pins
    }

    /// Direction a line was last configured to
    pub fn get_mode(&self, pin: u8) -> Option<PinMode> {
        self.modes.get(pin as usize).copied().flatten()
    }

    fn slot(&mut self, pin: u8) -> Result<(&mut Pin, &mut Option<PinMode>), Error<Pin::Error>> {
        let index = pin as usize;
        match (self.pins.get_mut(index), self.modes.get_mut(index)) {
            (Some(line), Some(mode)) => Ok((line, mode)),
            _ => Err(Error::InvalidPin(pin)),
        }
    }
}

impl<Pin> DirectPins<Pin, 6>
where
    Pin: OutputPin + InputPin,
{
    /// 4 pin mode wiring, slots match [`PinAssignment::direct_4pin`](super::PinAssignment::direct_4pin)
    pub fn new_4pin(rs: Pin, en: Pin, db4: Pin, db5: Pin, db6: Pin, db7: Pin) -> Self {
        Self::new([rs, en, db4, db5, db6, db7])
    }
}

impl<Pin, const PIN_CNT: usize> DrivePins for DirectPins<Pin, PIN_CNT>
where
    Pin: OutputPin + InputPin,
{
    type PinId = u8;
    type Error = Error<Pin::Error>;

    fn configure_direction(&mut self, pin: u8, mode: PinMode) -> Result<(), Self::Error> {
        let (line, current) = self.slot(pin)?;

        let result = match mode {
            // in open drain mode, set pin high to release control
            PinMode::Input => line.set_high(),
            PinMode::Output => line.set_low(),
        };
        result.map_err(Error::Transport)?;

        *current = Some(mode);
        Ok(())
    }

    fn write_digital(&mut self, pin: u8, level: bool) -> Result<(), Self::Error> {
        let (line, current) = self.slot(pin)?;

        if *current != Some(PinMode::Output) {
            #[cfg(feature = "defmt")]
            defmt::warn!("write to pin {} before it's configured as output", pin);

            return Err(Error::UnconfiguredPin(pin));
        }

        line.set_state(PinState::from(level))
            .map_err(Error::Transport)
    }

    fn read_digital(&mut self, pin: u8) -> Result<bool, Self::Error> {
        let (line, current) = self.slot(pin)?;

        if current.is_none() {
            return Err(Error::UnconfiguredPin(pin));
        }

        // it's the real level of pin, rather than what we put pin in
        line.is_high().map_err(Error::Transport)
    }
}
