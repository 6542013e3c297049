//! Driver state machine

use core::fmt;

/// Which refresh protocol the controller is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    /// Full waveform, slow, no ghosting
    Full,
    /// Single phase waveform, fast, ghosts over time
    Partial,
}

/// Where the controller is in its power cycle.
///
/// Only [`DriverState::FullConfigured`] and [`DriverState::PartialConfigured`]
/// accept render commands. A partial initialization relies on registers set by
/// a full one, so it is only legal from a configured state. A full
/// initialization starts with a hardware reset and is legal from anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No initializer has completed since power-up or the last fault
    Uninitialized,
    /// `full_update` completed
    FullConfigured,
    /// `partial_update` completed
    PartialConfigured,
    /// Deep sleep, needs `full_update`
    Asleep,
}

impl DriverState {
    /// Active refresh mode, if any
    pub fn refresh_mode(self) -> Option<RefreshMode> {
        match self {
            DriverState::FullConfigured => Some(RefreshMode::Full),
            DriverState::PartialConfigured => Some(RefreshMode::Partial),
            DriverState::Uninitialized | DriverState::Asleep => None,
        }
    }

    /// Whether render commands may be sent
    pub fn is_configured(self) -> bool {
        self.refresh_mode().is_some()
    }

    pub(crate) fn configured(mode: RefreshMode) -> Self {
        match mode {
            RefreshMode::Full => DriverState::FullConfigured,
            RefreshMode::Partial => DriverState::PartialConfigured,
        }
    }
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriverState::Uninitialized => "uninitialized",
            DriverState::FullConfigured => "configured for full refresh",
            DriverState::PartialConfigured => "configured for partial refresh",
            DriverState::Asleep => "asleep",
        };
        f.write_str(name)
    }
}
