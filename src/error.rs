//! Driver errors

pub use display_interface::DisplayError;
use thiserror::Error;

use crate::state::DriverState;

/// Everything that can go wrong talking to the panel.
///
/// None of these are recoverable in the middle of an initialization sequence;
/// after an error from `full_update` or `partial_update` the driver is back in
/// [`DriverState::Uninitialized`] and needs a new `full_update`.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// SPI write or control pin failure
    #[error("display interface error: {0:?}")]
    Interface(DisplayError),
    /// The busy line could not be read
    #[error("could not read the busy pin")]
    BusyPin,
    /// The controller kept the busy line asserted
    #[error("panel still busy after {waited_ms} ms")]
    BusyTimeout {
        /// Time spent polling
        waited_ms: u32,
    },
    /// Operation not allowed in the current state
    #[error("cannot {operation} while the panel is {state}")]
    InvalidState {
        /// The rejected operation
        operation: &'static str,
        /// State at the time of the call
        state: DriverState,
    },
    /// A pre-packed frame had the wrong length
    #[error("frame buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferSize {
        /// `height * line_width`
        expected: usize,
        /// Length supplied
        actual: usize,
    },
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Error::Interface(e)
    }
}

// `DisplayError` has no `PartialEq`, interface errors compare by kind
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Error::Interface(a), Error::Interface(b)) => {
                core::mem::discriminant(a) == core::mem::discriminant(b)
            }
            (Error::BusyPin, Error::BusyPin) => true,
            (Error::BusyTimeout { waited_ms: a }, Error::BusyTimeout { waited_ms: b }) => a == b,
            (
                Error::InvalidState {
                    operation: op_a,
                    state: state_a,
                },
                Error::InvalidState {
                    operation: op_b,
                    state: state_b,
                },
            ) => op_a == op_b && state_a == state_b,
            (
                Error::BufferSize {
                    expected: exp_a,
                    actual: act_a,
                },
                Error::BufferSize {
                    expected: exp_b,
                    actual: act_b,
                },
            ) => exp_a == exp_b && act_a == act_b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let e = Error::InvalidState {
            operation: "display",
            state: DriverState::Asleep,
        };
        assert_eq!(e.to_string(), "cannot display while the panel is asleep");

        let e = Error::BusyTimeout { waited_ms: 500 };
        assert_eq!(e.to_string(), "panel still busy after 500 ms");

        let e: Error = DisplayError::BusWriteError.into();
        assert_eq!(e, Error::Interface(DisplayError::BusWriteError));
    }

    #[test]
    fn interface_errors_compare_by_kind() {
        assert_eq!(
            Error::Interface(DisplayError::DCError),
            Error::Interface(DisplayError::DCError)
        );
        assert_ne!(
            Error::Interface(DisplayError::DCError),
            Error::Interface(DisplayError::RSError)
        );
        assert_ne!(Error::Interface(DisplayError::DCError), Error::BusyPin);
        assert_ne!(
            Error::BusyTimeout { waited_ms: 100 },
            Error::BusyTimeout { waited_ms: 200 }
        );
        assert_eq!(
            Error::BufferSize {
                expected: 4000,
                actual: 12
            },
            Error::BufferSize {
                expected: 4000,
                actual: 12
            }
        );
    }
}
