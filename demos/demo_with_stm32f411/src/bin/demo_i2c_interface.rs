//! Drive LCD1602 with a STM32F411RET6, through a PCF8574 I2C backpack
//!
//! Wiring diagram
//!
//! PCF8574 backpack <-> STM32F411RET6
//!              GND <-> GND
//!              VCC <-> 5V
//!              SDA <-> PB7
//!              SCL <-> PB6

#![no_std]
#![no_main]

use core::fmt::Write;

use panic_rtt_target as _;
use rtt_target::{rprintln, rtt_init_print};
use stm32f4xx_hal::{
    i2c::{self, I2c},
    pac,
    prelude::*,
};

use lcd1602_expander_driver::{
    command::State,
    expander::Pcf8574,
    lcd::{Config, Lcd},
    pins::{ExpanderPins, PinAssignment},
};

// a heart shape
const HEART: [u8; 8] = [
    0b00000, 0b00000, 0b01010, 0b11111, 0b01110, 0b00100, 0b00000, 0b00000,
];

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_init_print!();

    let dp = pac::Peripherals::take().expect("Cannot take device peripherals");
    let cp = pac::CorePeripherals::take().expect("Cannot take core peripherals");

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(12.MHz()).freeze();

    let mut delayer = cp.SYST.delay(&clocks);

    let gpiob = dp.GPIOB.split();

    let mut i2c = I2c::new(
        dp.I2C1,
        (gpiob.pb6, gpiob.pb7),
        i2c::Mode::standard(100.kHz()), // The PCF8574T max I2C speed
        &clocks,
    );

    // PCF8574 at 0x27, or PCF8574A at 0x3F
    let expander = match Pcf8574::probe(&mut i2c) {
        Ok(expander) => expander,
        Err(e) => {
            rprintln!("{}", e);
            #[allow(clippy::empty_loop)]
            loop {}
        }
    };
    rprintln!("PCF8574 found at {:#x}", expander.address());

    let mut pins = ExpanderPins::new(expander);

    // init LCD1602
    let mut lcd = Lcd::new(
        &mut pins,
        &mut delayer,
        PinAssignment::pcf8574(),
        Config::default(),
    )
    .expect("LCD bring up failed");

    lcd.write_text("CPU: 21.5C\n    12:00:00").unwrap();
    lcd.delay_ms(2_000);

    lcd.clear().unwrap();
    lcd.write_graph_to_cgram(1, &HEART).unwrap();
    lcd.write_text("I ").unwrap();
    lcd.write_graph_to_cur(1).unwrap();
    lcd.write_text(" Rust").unwrap();

    // formatted output goes through core::fmt
    lcd.set_cursor(0, 1).unwrap();
    write!(lcd, "{:>3} frames", 42).unwrap();

    lcd.delay_ms(1_000);
    lcd.blink().unwrap();

    // blink backlight 3 times
    for _ in 0..3 {
        lcd.delay_ms(500);
        lcd.set_backlight(State::Off).unwrap();
        lcd.delay_ms(500);
        lcd.set_backlight(State::On).unwrap();
    }

    lcd.no_blink().unwrap();

    #[allow(clippy::empty_loop)]
    loop {}
}
