use embedded_hal::delay::DelayNs;

use crate::{
    command::{CommandSet, Font, LineMode, State},
    lcd::{Lcd, Settle},
    pins::{DrivePins, PinAssignment, PinMode},
    state::{DisplayMode, Geometry},
};

/// Delays of the 4 bit protocol, all in microseconds
///
/// Defaults are conservative, they work on HD44780 and its clones.
/// A faster controller can run with shorter values, but not below the documented minimums.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    enable_pulse_us: u32,
    latch_settle_us: u32,
    byte_settle_us: u32,
    long_settle_us: u32,
    power_on_us: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            enable_pulse_us: 1,
            latch_settle_us: 1,
            byte_settle_us: 1_000,
            long_settle_us: 3_000,
            power_on_us: 40_000,
        }
    }
}

impl Timing {
    #[allow(missing_docs)]
    pub fn get_enable_pulse_us(&self) -> u32 {
        self.enable_pulse_us
    }

    /// Width of E high, and of E low before it. Datasheet minimum is 450 ns, so at least 1
    pub fn set_enable_pulse_us(mut self, us: u32) -> Self {
        assert!(us > 0, "enable pulse should be longer than 450 ns");
        self.enable_pulse_us = us;
        self
    }

    #[allow(missing_docs)]
    pub fn get_latch_settle_us(&self) -> u32 {
        self.latch_settle_us
    }

    /// Wait after E falls. Datasheet asks 37 us for a command to finish,
    /// the remaining part is covered by the byte settle
    pub fn set_latch_settle_us(mut self, us: u32) -> Self {
        assert!(us > 0, "latch settle should be at least 1 us");
        self.latch_settle_us = us;
        self
    }

    #[allow(missing_docs)]
    pub fn get_byte_settle_us(&self) -> u32 {
        self.byte_settle_us
    }

    /// Wait before every byte, so the previous command is surely finished
    pub fn set_byte_settle_us(mut self, us: u32) -> Self {
        self.byte_settle_us = us;
        self
    }

    #[allow(missing_docs)]
    pub fn get_long_settle_us(&self) -> u32 {
        self.long_settle_us
    }

    /// Extra wait after "clear display" and "return home". Datasheet says 1.52 ms
    pub fn set_long_settle_us(mut self, us: u32) -> Self {
        self.long_settle_us = us;
        self
    }

    #[allow(missing_docs)]
    pub fn get_power_on_us(&self) -> u32 {
        self.power_on_us
    }

    /// Wait before the first bring up byte. Datasheet asks 40 ms after Vcc reach 2.7 V
    pub fn set_power_on_us(mut self, us: u32) -> Self {
        self.power_on_us = us;
        self
    }
}

/// [`Config`] is the init config of a [`Lcd`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    geometry: Geometry,
    timing: Timing,
    backlight: State,
}

#[allow(missing_docs)]
impl Config {
    pub fn get_geometry(&self) -> Geometry {
        self.geometry
    }

    /// `rows` between 1 and 4
    pub fn set_geometry(mut self, columns: u8, rows: u8) -> Self {
        self.geometry = Geometry::new(columns, rows);
        self
    }

    pub fn get_timing(&self) -> Timing {
        self.timing
    }

    pub fn set_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn get_backlight(&self) -> State {
        self.backlight
    }

    pub fn set_backlight(mut self, backlight: State) -> Self {
        self.backlight = backlight;
        self
    }
}

impl<'a, 'b, Pins, Delayer> Lcd<'a, 'b, Pins, Delayer>
where
    Pins: DrivePins,
    Delayer: DelayNs,
{
    /// Create a [`Lcd`] driver, and init LCD hardware
    ///
    /// All lines in `assignment` are configured as outputs first. If any step fails,
    /// the error is returned and `pins` is left with the caller, so it can be fixed and retried.
    pub fn new(
        pins: &'a mut Pins,
        delayer: &'b mut Delayer,
        assignment: PinAssignment<Pins::PinId>,
        config: Config,
    ) -> Result<Self, Pins::Error> {
        assignment
            .lines()
            .try_for_each(|pin| pins.configure_direction(pin, PinMode::Output))?;

        let mut lcd = Lcd {
            pins,
            delayer,
            assignment,
            geometry: config.get_geometry(),
            timing: config.get_timing(),
            mode: DisplayMode::default(),
            backlight: config.get_backlight(),
        };

        lcd.init()?;

        Ok(lcd)
    }

    /// Run the whole power on sequence again, e.g. after the bus was fixed.
    /// Mode goes back to display on, cursor off, blink off, left to right, no autoscroll.
    ///
    /// If it fails halfway, the recorded mode holds whichever of the 2 mode bytes made it out
    pub fn reinit(&mut self) -> Result<(), Pins::Error> {
        self.init()
    }

    fn init(&mut self) -> Result<(), Pins::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "LCD bring up, {=u8} x {=u8}",
            self.geometry.get_columns(),
            self.geometry.get_rows()
        );

        self.delayer.delay_us(self.timing.get_power_on_us());

        // in initialization process, we'd better use "raw command", to strictly follow datasheet
        // first 2 bytes force controller into 4 bit mode, whatever state it powered on in
        self.send(CommandSet::BringUp, Settle::Standard)?;
        self.send(CommandSet::HalfFunctionSet, Settle::Standard)?;
        // 2 line mode whatever the geometry, a 1 row panel just leaves the second line unseen
        self.send(
            CommandSet::FunctionSet(LineMode::TwoLine, Font::Font5x8),
            Settle::Standard,
        )?;

        // each register is committed as soon as its own byte is out
        let reset = DisplayMode::default();
        self.update_mode(
            |mode| {
                mode.set_display_state(reset.get_display_state());
                mode.set_cursor_state(reset.get_cursor_state());
                mode.set_cursor_blink(reset.get_cursor_blink());
            },
            DisplayMode::display_control_command,
        )?;
        self.update_mode(
            |mode| {
                mode.set_direction(reset.get_direction());
                mode.set_shift_type(reset.get_shift_type());
            },
            DisplayMode::entry_mode_command,
        )?;

        self.clear()?;

        // set backlight after LCD init
        self.set_backlight(self.backlight)
    }
}
