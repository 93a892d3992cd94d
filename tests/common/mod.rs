//! Recording fakes shared by the integration tests
//!
//! Pin writes and delays land on one timeline, so tests can check ordering
//! between them, and decode enable pulses back into the bytes the LCD latched.

#![allow(dead_code)]

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use embedded_hal::delay::DelayNs;
use lcd1602_expander_driver::pins::{DrivePins, PinAssignment, PinMode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Configure(u8, PinMode),
    Write(u8, bool),
    DelayNs(u32),
    DelayUs(u32),
}

/// Error of the fake pin driver, when a write is made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault;

/// A byte as the LCD saw it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transfer {
    pub as_data: bool,
    pub byte: u8,
}

impl Transfer {
    pub fn command(byte: u8) -> Self {
        Self {
            as_data: false,
            byte,
        }
    }

    pub fn data(byte: u8) -> Self {
        Self {
            as_data: true,
            byte,
        }
    }
}

#[derive(Clone, Default)]
pub struct Rig {
    timeline: Rc<RefCell<Vec<Event>>>,
    fail: Rc<Cell<bool>>,
    // pin writes left before every further write fails
    budget: Rc<Cell<Option<usize>>>,
}

impl Rig {
    pub fn pins(&self) -> FakePins {
        FakePins {
            rig: self.clone(),
            levels: [false; 8],
        }
    }

    pub fn delay(&self) -> FakeDelay {
        FakeDelay { rig: self.clone() }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail.set(fail);
    }

    /// Let `writes` more pin writes through, then fail the rest
    pub fn fail_after_writes(&self, writes: usize) {
        self.budget.set(Some(writes));
    }

    pub fn events(&self) -> Vec<Event> {
        self.timeline.borrow().clone()
    }

    pub fn reset(&self) {
        self.timeline.borrow_mut().clear();
    }

    fn push(&self, event: Event) {
        self.timeline.borrow_mut().push(event);
    }

    /// Decode the timeline into bytes, panics if RS changes between 2 nibbles of a byte
    pub fn transfers(&self, assignment: &PinAssignment<u8>) -> Vec<Transfer> {
        let nibbles = self.nibbles(assignment);
        assert!(nibbles.len() % 2 == 0, "odd number of nibbles latched");

        nibbles
            .chunks(2)
            .map(|pair| {
                let (high_rs, high) = pair[0];
                let (low_rs, low) = pair[1];
                assert_eq!(high_rs, low_rs, "RS changed inside a byte");
                Transfer {
                    as_data: high_rs,
                    byte: (high << 4) | low,
                }
            })
            .collect()
    }

    /// RS level and data nibble at every rising edge of E
    pub fn nibbles(&self, assignment: &PinAssignment<u8>) -> Vec<(bool, u8)> {
        let mut levels = [false; 8];
        let mut nibbles = Vec::new();

        for event in self.events() {
            if let Event::Write(pin, level) = event {
                let enable = assignment.enable as usize;
                if pin as usize == enable && level && !levels[enable] {
                    let nibble = assignment
                        .data
                        .iter()
                        .enumerate()
                        .fold(0u8, |acc, (index, &line)| {
                            acc | ((levels[line as usize] as u8) << index)
                        });
                    nibbles.push((levels[assignment.register_select as usize], nibble));
                }
                levels[pin as usize] = level;
            }
        }

        nibbles
    }

    pub fn enable_pulses(&self, assignment: &PinAssignment<u8>) -> usize {
        self.nibbles(assignment).len()
    }
}

pub struct FakePins {
    rig: Rig,
    levels: [bool; 8],
}

impl DrivePins for FakePins {
    type PinId = u8;
    type Error = Fault;

    fn configure_direction(&mut self, pin: u8, mode: PinMode) -> Result<(), Fault> {
        if self.rig.fail.get() {
            return Err(Fault);
        }
        self.rig.push(Event::Configure(pin, mode));
        Ok(())
    }

    fn write_digital(&mut self, pin: u8, level: bool) -> Result<(), Fault> {
        if self.rig.fail.get() {
            return Err(Fault);
        }
        match self.rig.budget.get() {
            Some(0) => return Err(Fault),
            Some(left) => self.rig.budget.set(Some(left - 1)),
            None => {}
        }
        self.levels[pin as usize] = level;
        self.rig.push(Event::Write(pin, level));
        Ok(())
    }

    fn read_digital(&mut self, pin: u8) -> Result<bool, Fault> {
        Ok(self.levels[pin as usize])
    }
}

pub struct FakeDelay {
    rig: Rig,
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.rig.push(Event::DelayNs(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.rig.push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.rig.push(Event::DelayUs(ms * 1_000));
    }
}
