//! Drive LCD1602 with a STM32F411RET6 in 4 Pin Mode
//!
//! Wiring diagram
//!
//! LCD1602 <-> STM32F411RET6
//!     Vss <-> GND
//!     Vdd <-> 5V (It is best to use an external source for the 5V pin, such as the 5V output from a DAPLink device or USB.)
//!      V0 <-> potentiometer <-> 5V & GND (to adjust the display contrast)
//!      RS <-> PA0
//!      RW <-> GND (LCD is write only)
//!      EN <-> PA1 (and optionally connect to a 4.7 kOhm Pulldown resistor, to stable voltage level when STM32 reset)
//!      D4 <-> PA2
//!      D5 <-> PA3
//!      D6 <-> PA4
//!      D7 <-> PA5
//!       A <-> 5V
//!       K <-> GND

#![no_std]
#![no_main]

use panic_rtt_target as _;
use rtt_target::rtt_init_print;
use stm32f4xx_hal::{pac, prelude::*};

use lcd1602_expander_driver::{
    lcd::{Config, Lcd, Timing},
    pins::{DirectPins, PinAssignment},
};

#[cortex_m_rt::entry]
fn main() -> ! {
    rtt_init_print!();

    let dp = pac::Peripherals::take().expect("Cannot take device peripherals");
    let cp = pac::CorePeripherals::take().expect("Cannot take core peripherals");

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(12.MHz()).freeze();

    let mut delayer = cp.SYST.delay(&clocks);

    let gpioa = dp.GPIOA.split();

    // all pins should be of one type, open drain pins are readable
    let rs_pin = gpioa.pa0.into_open_drain_output().internal_pull_up(true).erase();
    let en_pin = gpioa.pa1.into_open_drain_output().internal_pull_up(true).erase();
    let db4_pin = gpioa.pa2.into_open_drain_output().internal_pull_up(true).erase();
    let db5_pin = gpioa.pa3.into_open_drain_output().internal_pull_up(true).erase();
    let db6_pin = gpioa.pa4.into_open_drain_output().internal_pull_up(true).erase();
    let db7_pin = gpioa.pa5.into_open_drain_output().internal_pull_up(true).erase();

    // put pins together
    let mut pins = DirectPins::new_4pin(rs_pin, en_pin, db4_pin, db5_pin, db6_pin, db7_pin);

    // GPIO is fast, so the byte gap can be much shorter than on an I2C backpack
    let timing = Timing::default().set_byte_settle_us(100);

    // init LCD1602
    let mut lcd = Lcd::new(
        &mut pins,
        &mut delayer,
        PinAssignment::direct_4pin(),
        Config::default().set_timing(timing),
    )
    .expect("LCD bring up failed");

    lcd.cursor().unwrap();
    lcd.blink().unwrap();

    lcd.set_cursor(1, 0).unwrap();
    lcd.write_text("hello,\n world!").unwrap();

    // since tilde chracter (~) is not in CGROM of LCD1602A
    // it should be displayed as a full rectangle
    lcd.set_cursor(15, 0).unwrap();
    lcd.write_char('~').unwrap();

    lcd.delay_ms(1_000);
    lcd.no_blink().unwrap();
    lcd.no_cursor().unwrap();

    // right to left write in
    lcd.right_to_left().unwrap();
    lcd.set_cursor(15, 1).unwrap();
    lcd.write_text("~!").unwrap();
    lcd.left_to_right().unwrap();

    // shift display window back and forth
    for _ in 0..4 {
        lcd.delay_ms(250);
        lcd.scroll_left().unwrap();
    }
    for _ in 0..4 {
        lcd.delay_ms(250);
        lcd.scroll_right().unwrap();
    }

    // and blinking display 3 times
    for _ in 0..3 {
        lcd.delay_ms(500);
        lcd.no_display().unwrap();
        lcd.delay_ms(500);
        lcd.display().unwrap();
    }

    #[allow(clippy::empty_loop)]
    loop {}
}
