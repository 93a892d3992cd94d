//! Errors reported by pin drivers and by [`Lcd`](crate::lcd::Lcd)

use core::fmt;

/// Errors that can occur while talking to the LCD
///
/// `E` is the error type of the underlying bus or pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The bus or pin rejected a write, e.g. the expander did not acknowledge its address
    Transport(E),
    /// A direct pin was written before it was configured as an output
    UnconfiguredPin(u8),
    /// The pin id is outside the range the driver owns
    InvalidPin(u8),
    /// Neither the primary nor the alternate expander address acknowledged the probe write
    Configuration {
        /// Error from the primary address
        primary: E,
        /// Error from the alternate address
        alternate: E,
    },
}

impl<E> Error<E> {
    /// Whether this is a transport failure of a single call, rather than a failed device probe
    pub fn is_transport(&self) -> bool {
        !matches!(self, Error::Configuration { .. })
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transport(e) => write!(f, "transport error: {:?}", e),
            Error::UnconfiguredPin(pin) => write!(f, "pin {} is not configured as output", pin),
            Error::InvalidPin(pin) => write!(f, "pin {} is out of range", pin),
            Error::Configuration { primary, alternate } => write!(
                f,
                "no expander found (primary: {:?}, alternate: {:?})",
                primary, alternate
            ),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for Error<E> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Error::Transport(_) => defmt::write!(fmt, "Transport error"),
            Error::UnconfiguredPin(pin) => defmt::write!(fmt, "Pin {} not configured as output", pin),
            Error::InvalidPin(pin) => defmt::write!(fmt, "Pin {} out of range", pin),
            Error::Configuration { .. } => defmt::write!(fmt, "No expander found"),
        }
    }
}
