//! Port traits: the hexagonal boundary between airlock logic and the host engine.
//!
//! ```text
//!   Host devices ──▶ Port trait ──▶ Airlock (domain)
//! ```
//!
//! Doors and vents are owned by the host engine; the domain only ever
//! holds handles to them.  Every handle also exposes the block's name and
//! its free-form custom-data text, which is where the persisted airlock
//! record lives (see [`crate::airlock::store`]).
//!
//! Reads are plain property accesses and commands never block.  A command
//! issued here takes effect physically at some later point; the next call
//! observes the result through the status getters.

use chrono::{DateTime, Utc};

// ───────────────────────────────────────────────────────────────
// Device status enums (reported by the host)
// ───────────────────────────────────────────────────────────────

/// Physical state of a single door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoorStatus {
    Opening,
    Open,
    Closing,
    Closed,
}

/// Physical state of a single air vent as reported by the vent itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VentStatus {
    Depressurized,
    Depressurizing,
    Pressurized,
    Pressurizing,
}

// ───────────────────────────────────────────────────────────────
// Device ports (driven adapters: domain ↔ host engine)
// ───────────────────────────────────────────────────────────────

/// Behaviour shared by every block the airlock touches.
pub trait TerminalBlock {
    /// Display name, used by discovery to group blocks into airlocks.
    fn name(&self) -> String;

    /// The block's free-form text field.
    fn custom_data(&self) -> String;

    /// Overwrite the block's free-form text field.
    fn set_custom_data(&mut self, data: &str);
}

/// A door actuator.
pub trait DoorPort: TerminalBlock {
    fn status(&self) -> DoorStatus;

    fn is_enabled(&self) -> bool;

    /// A disabled door ignores manual interaction from the host.
    fn set_enabled(&mut self, enabled: bool);

    /// Command the door to open.  No effect on an already-open door.
    fn open(&mut self);

    /// Command the door to close.  No effect on an already-closed door.
    fn close(&mut self);
}

/// An air vent serving the airlock chamber.
pub trait VentPort: TerminalBlock {
    fn status(&self) -> VentStatus;

    /// Measured oxygen fraction of the chamber, in `[0, 1]`.
    fn oxygen_level(&self) -> f32;

    /// Whether the vent is set to pull air out of the chamber.
    fn depressurize(&self) -> bool;

    fn set_depressurize(&mut self, depressurize: bool);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Wall-clock source.  Vent timers are persisted as absolute timestamps
/// so they stay meaningful across host restarts.
pub trait ClockPort {
    fn now(&self) -> DateTime<Utc>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → diagnostics)
// ───────────────────────────────────────────────────────────────

/// The service emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (log, terminal
/// screen, programmable-block echo, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
