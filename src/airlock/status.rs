//! Status inference.
//!
//! Pure functions from a device snapshot plus the persisted record to one
//! [`AirlockStatus`].  Nothing here commands a device or writes a record.

use chrono::{DateTime, TimeDelta, Utc};

use super::store::StoredStatus;
use super::{AirlockDevices, AirlockStatus, Direction};
use crate::app::ports::{DoorPort, DoorStatus, VentPort, VentStatus};
use crate::config::AirlockConfig;

// ═══════════════════════════════════════════════════════════════════════════
//  Device snapshot
// ═══════════════════════════════════════════════════════════════════════════

/// One vent's reported state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VentReading {
    pub status: VentStatus,
    pub oxygen_level: f32,
}

/// Point-in-time copy of every device state the inference reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceSnapshot {
    pub inner: Vec<DoorStatus>,
    pub outer: Vec<DoorStatus>,
    pub vents: Vec<VentReading>,
}

impl DeviceSnapshot {
    pub fn capture<D: DoorPort, V: VentPort>(devices: &AirlockDevices<D, V>) -> Self {
        Self {
            inner: devices.inner.iter().map(DoorPort::status).collect(),
            outer: devices.outer.iter().map(DoorPort::status).collect(),
            vents: devices
                .vents
                .iter()
                .map(|v| VentReading {
                    status: v.status(),
                    oxygen_level: v.oxygen_level(),
                })
                .collect(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Per-side mapping
// ═══════════════════════════════════════════════════════════════════════════

/// How one side's aggregate door state maps onto airlock statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideMapping {
    /// Direction in which this side is the destination.
    pub target: Direction,
    pub open: AirlockStatus,
    pub opening: AirlockStatus,
    pub closing: AirlockStatus,
    /// Status reported while this side is shut and the vents have not
    /// started working toward it yet.
    pub waiting: AirlockStatus,
    /// Vent status meaning "this side's pressure is reached".
    pub vent_done: VentStatus,
    /// Vent status meaning "working toward this side's pressure".
    pub vent_doing: VentStatus,
}

pub const INNER_SIDE: SideMapping = SideMapping {
    target: Direction::ToInside,
    open: AirlockStatus::InsideOpen,
    opening: AirlockStatus::InsideOpening,
    closing: AirlockStatus::InsideClosing,
    waiting: AirlockStatus::WaitingToPressurize,
    vent_done: VentStatus::Pressurized,
    vent_doing: VentStatus::Pressurizing,
};

pub const OUTER_SIDE: SideMapping = SideMapping {
    target: Direction::ToOutside,
    open: AirlockStatus::OutsideOpen,
    opening: AirlockStatus::OutsideOpening,
    closing: AirlockStatus::OutsideClosing,
    waiting: AirlockStatus::WaitingToDepressurize,
    vent_done: VentStatus::Depressurized,
    vent_doing: VentStatus::Depressurizing,
};

// ═══════════════════════════════════════════════════════════════════════════
//  Door aggregation
// ═══════════════════════════════════════════════════════════════════════════

/// Fold one side's doors into a status.
///
/// Doors may lag each other within one axis (`Open`/`Opening`, or
/// `Closed`/`Closing`); the aggregate degrades to the moving state.  Any
/// mix across the two axes yields `Some(Invalid)` immediately.
///
/// Returns `None` when the side is fully closed but is not the active
/// destination (or the vents are already working toward it), and also
/// for an empty door set.
pub fn aggregate_door_status(
    doors: impl IntoIterator<Item = DoorStatus>,
    direction: Direction,
    side: &SideMapping,
    vent_status: Option<VentStatus>,
) -> Option<AirlockStatus> {
    let mut aggregate: Option<DoorStatus> = None;

    for door in doors {
        aggregate = match (aggregate, door) {
            (None, status) => Some(status),
            (Some(DoorStatus::Open), DoorStatus::Open) => Some(DoorStatus::Open),
            (Some(DoorStatus::Open | DoorStatus::Opening), DoorStatus::Open | DoorStatus::Opening) => {
                Some(DoorStatus::Opening)
            }
            (Some(DoorStatus::Closed), DoorStatus::Closed) => Some(DoorStatus::Closed),
            (Some(DoorStatus::Closed | DoorStatus::Closing), DoorStatus::Closed | DoorStatus::Closing) => {
                Some(DoorStatus::Closing)
            }
            _ => return Some(AirlockStatus::Invalid),
        };
    }

    match aggregate? {
        DoorStatus::Open => Some(side.open),
        DoorStatus::Opening => Some(side.opening),
        DoorStatus::Closing => Some(side.closing),
        DoorStatus::Closed => {
            let vents_idle = vent_status != Some(side.vent_done) && vent_status != Some(side.vent_doing);
            (direction == side.target && vents_idle).then_some(side.waiting)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Full inference
// ═══════════════════════════════════════════════════════════════════════════

/// Combine all vents into one status.
///
/// Vents report garbage near vacuum, so anything at or below the oxygen
/// floor counts as `Depressurized`.  `Err(())` when two vents disagree;
/// `Ok(None)` when there are no vents.
fn aggregate_vent_status(vents: &[VentReading], oxygen_floor: f32) -> Result<Option<VentStatus>, ()> {
    let mut aggregate = None;
    for vent in vents {
        let status = if vent.oxygen_level <= oxygen_floor {
            VentStatus::Depressurized
        } else {
            vent.status
        };
        match aggregate {
            None => aggregate = Some(status),
            Some(seen) if seen != status => return Err(()),
            Some(_) => {}
        }
    }
    Ok(aggregate)
}

/// Whether the persisted vent timer has run past the stuck-vent timeout.
/// A missing timer never expires.
fn vent_timer_expired(stored: &StoredStatus, now: DateTime<Utc>, config: &AirlockConfig) -> bool {
    let max_wait = TimeDelta::seconds(i64::from(config.vent_max_wait_secs));
    stored
        .vent_started
        .is_some_and(|started| now.signed_duration_since(started) >= max_wait)
}

/// Derive the airlock status from a device snapshot and the persisted record.
pub fn compute_status(
    snapshot: &DeviceSnapshot,
    stored: &StoredStatus,
    now: DateTime<Utc>,
    config: &AirlockConfig,
) -> AirlockStatus {
    let Ok(vent_status) = aggregate_vent_status(&snapshot.vents, config.oxygen_floor) else {
        return AirlockStatus::Invalid;
    };

    let inner = aggregate_door_status(
        snapshot.inner.iter().copied(),
        stored.direction,
        &INNER_SIDE,
        vent_status,
    );
    let outer = aggregate_door_status(
        snapshot.outer.iter().copied(),
        stored.direction,
        &OUTER_SIDE,
        vent_status,
    );

    if let Some(inner) = inner {
        // An outer side that is still closing wins over a settled inner side.
        if outer == Some(AirlockStatus::OutsideClosing) {
            return AirlockStatus::OutsideClosing;
        }
        return inner;
    }

    if let Some(outer) = outer {
        return outer;
    }

    match vent_status {
        Some(VentStatus::Pressurized) => AirlockStatus::Pressurized,
        Some(VentStatus::Pressurizing) => {
            if vent_timer_expired(stored, now, config) {
                AirlockStatus::Pressurized
            } else {
                AirlockStatus::Pressurizing
            }
        }
        Some(VentStatus::Depressurized) => AirlockStatus::Depressurized,
        Some(VentStatus::Depressurizing) => {
            if vent_timer_expired(stored, now, config) {
                AirlockStatus::Depressurized
            } else {
                AirlockStatus::Depressurizing
            }
        }
        None => AirlockStatus::Invalid,
    }
}
