//! Outbound application events.
//!
//! The [`StationService`](super::service::StationService) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  They are
//! informational only; nothing in the core depends on them being seen.

use crate::airlock::AirlockStatus;

use super::commands::AirlockCommand;

/// Structured events emitted by the application layer.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Devices were found for an airlock number, but not all three kinds.
    /// `missing` lists "inner door", "outer door", "air vent" as needed.
    Incomplete { number: u32, missing: Vec<&'static str> },

    /// An operator argument was rejected.  Re-emitted on every tick until
    /// a later command succeeds.
    CommandRejected { message: String },

    /// A command was applied to an airlock.  `before` is the status the
    /// command was applied in.
    CommandApplied {
        number: u32,
        command: AirlockCommand,
        before: AirlockStatus,
    },

    /// A command moved an airlock to a different computed status.
    StatusChanged {
        number: u32,
        from: AirlockStatus,
        to: AirlockStatus,
    },
}
