//! Airlock core: status inference, persisted record, command logic.
//!
//! The airlock keeps no state of its own between calls.  Every operation
//! recomputes the [`AirlockStatus`] from the devices and the record
//! replicated in their custom data, acts on it, and possibly writes a new
//! record.
//!
//! ```text
//!   ToOutside                                   ToInside
//!   ─────────                                   ────────
//!   InsideOpen ──close inner──▶ InsideClosing   OutsideOpen ──close outer──▶ OutsideClosing
//!        │                          │                │                             │
//!        ▼                          ▼                ▼                             ▼
//!   WaitingToDepressurize ◀─────────┘           WaitingToPressurize ◀──────────────┘
//!        │ vents out                                 │ vents in
//!        ▼                                           ▼
//!   Depressurizing ──(done | 15 s)──▶ Depressurized  Pressurizing ──(done | 15 s)──▶ Pressurized
//!                                        │                                              │
//!                                        ▼ open outer                                   ▼ open inner
//!                                   OutsideOpening ──▶ OutsideOpen              InsideOpening ──▶ InsideOpen
//!
//!   Any door/vent disagreement ──▶ Invalid ──[inner | outer command]──▶ full reset
//! ```

pub mod controller;
pub mod status;
pub mod store;

pub use controller::Airlock;
pub use status::{aggregate_door_status, compute_status};
pub use store::{StatusStore, StoredStatus};

use core::fmt;
use core::str::FromStr;

// ---------------------------------------------------------------------------
// Airlock status
// ---------------------------------------------------------------------------

/// Discrete airlock status, derived from device states on every call.
///
/// Never persisted: the whole design relies on recomputing it from the
/// current device truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AirlockStatus {
    InsideOpening,
    InsideOpen,
    InsideClosing,
    WaitingToDepressurize,
    Depressurizing,
    Depressurized,
    OutsideOpening,
    OutsideOpen,
    OutsideClosing,
    WaitingToPressurize,
    Pressurizing,
    Pressurized,
    Invalid,
}

impl AirlockStatus {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 13] = [
        Self::InsideOpening,
        Self::InsideOpen,
        Self::InsideClosing,
        Self::WaitingToDepressurize,
        Self::Depressurizing,
        Self::Depressurized,
        Self::OutsideOpening,
        Self::OutsideOpen,
        Self::OutsideClosing,
        Self::WaitingToPressurize,
        Self::Pressurizing,
        Self::Pressurized,
        Self::Invalid,
    ];

    /// True for the statuses where the airlock is granting, or settling
    /// toward, inside access.  [`Airlock::toggle`] switches to outside
    /// from these and to inside from everything else.
    pub fn favours_inside(self) -> bool {
        matches!(
            self,
            Self::InsideOpen
                | Self::InsideOpening
                | Self::OutsideClosing
                | Self::WaitingToPressurize
                | Self::Pressurized
                | Self::Pressurizing
        )
    }
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Which side the airlock is currently moving a crew member toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    ToInside,
    ToOutside,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ToInside => "ToInside",
            Self::ToOutside => "ToOutside",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised direction text in a persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDirectionError;

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ToInside" => Ok(Self::ToInside),
            "ToOutside" => Ok(Self::ToOutside),
            _ => Err(ParseDirectionError),
        }
    }
}

// ---------------------------------------------------------------------------
// Grouped device handles
// ---------------------------------------------------------------------------

/// The device handles belonging to exactly one airlock.
///
/// Built by [`crate::discovery`]; device sets of distinct airlocks are
/// disjoint.
#[derive(Debug, Clone)]
pub struct AirlockDevices<D, V> {
    pub inner: Vec<D>,
    pub outer: Vec<D>,
    pub vents: Vec<V>,
}

impl<D, V> AirlockDevices<D, V> {
    pub fn new(inner: Vec<D>, outer: Vec<D>, vents: Vec<V>) -> Self {
        Self {
            inner,
            outer,
            vents,
        }
    }
}
