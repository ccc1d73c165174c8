//! Airlock controller: the periodic tick and the three operator commands.
//!
//! Every entry point starts from scratch: read the record, snapshot the
//! devices, compute the status, act.  Nothing carries over in memory from
//! one call to the next, so any amount of time and any number of physical
//! changes may pass between calls.
//!
//! | status                  | `process`                                   |
//! |-------------------------|---------------------------------------------|
//! | `InsideOpen`            | lock inner doors (if configured)            |
//! | `OutsideOpen`           | lock outer doors (if configured)            |
//! | `WaitingToPressurize`   | vents in, lock outer, record `{ToInside, now}` |
//! | `Pressurized`           | unlock + open inner doors                   |
//! | `Pressurizing`          | arm the vent timer if missing               |
//! | `WaitingToDepressurize` | vents out, lock inner, record `{ToOutside, now}` |
//! | `Depressurized`         | unlock + open outer doors                   |
//! | `Depressurizing`        | arm the vent timer if missing               |
//!
//! Locking doors only happens with `change_enabled_state` set.

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use super::status::{DeviceSnapshot, compute_status};
use super::store::{StatusStore, StoredStatus};
use super::{AirlockDevices, AirlockStatus, Direction};
use crate::app::ports::{DoorPort, VentPort};
use crate::config::AirlockConfig;

/// One numbered airlock and the devices it controls.
pub struct Airlock<D, V> {
    number: u32,
    devices: AirlockDevices<D, V>,
    config: AirlockConfig,
}

impl<D: DoorPort, V: VentPort> Airlock<D, V> {
    pub fn new(number: u32, devices: AirlockDevices<D, V>, config: AirlockConfig) -> Self {
        Self {
            number,
            devices,
            config,
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn devices(&self) -> &AirlockDevices<D, V> {
        &self.devices
    }

    pub fn devices_mut(&mut self) -> &mut AirlockDevices<D, V> {
        &mut self.devices
    }

    /// The persisted record as currently stored on the devices.
    pub fn stored_status(&self) -> StoredStatus {
        self.devices.read()
    }

    /// Current status, derived from the devices and the persisted record.
    pub fn status(&self, now: DateTime<Utc>) -> AirlockStatus {
        self.evaluate(now).0
    }

    // ── Periodic tick ─────────────────────────────────────────

    /// Advance the airlock one step.  Idempotent when nothing changed
    /// physically since the previous call.
    ///
    /// `Invalid` is left alone; only a command recovers it.
    pub fn process(&mut self, now: DateTime<Utc>) {
        let (status, stored) = self.evaluate(now);
        let lock_doors = self.config.change_enabled_state;

        match status {
            AirlockStatus::InsideOpen => {
                if lock_doors {
                    set_enabled(&mut self.devices.inner, false);
                }
            }
            AirlockStatus::OutsideOpen => {
                if lock_doors {
                    set_enabled(&mut self.devices.outer, false);
                }
            }
            AirlockStatus::WaitingToPressurize => {
                set_depressurize(&mut self.devices.vents, false);
                if lock_doors {
                    set_enabled(&mut self.devices.outer, false);
                }
                self.devices
                    .write(&StoredStatus::new(Direction::ToInside, Some(now)));
            }
            AirlockStatus::Pressurized => {
                unlock_and_open(&mut self.devices.inner);
            }
            AirlockStatus::Pressurizing => {
                if stored.vent_started.is_none() {
                    self.devices
                        .write(&StoredStatus::new(Direction::ToInside, Some(now)));
                }
            }
            AirlockStatus::WaitingToDepressurize => {
                set_depressurize(&mut self.devices.vents, true);
                if lock_doors {
                    set_enabled(&mut self.devices.inner, false);
                }
                self.devices
                    .write(&StoredStatus::new(Direction::ToOutside, Some(now)));
            }
            AirlockStatus::Depressurized => {
                unlock_and_open(&mut self.devices.outer);
            }
            AirlockStatus::Depressurizing => {
                if stored.vent_started.is_none() {
                    self.devices
                        .write(&StoredStatus::new(Direction::ToOutside, Some(now)));
                }
            }
            AirlockStatus::InsideOpening
            | AirlockStatus::InsideClosing
            | AirlockStatus::OutsideOpening
            | AirlockStatus::OutsideClosing
            | AirlockStatus::Invalid => {}
        }
    }

    // ── Commands ──────────────────────────────────────────────

    /// Request inside access.
    pub fn open_inner(&mut self, now: DateTime<Utc>) {
        let (status, _) = self.evaluate(now);
        info!("Airlock {}: open inner requested in {:?}", self.number, status);

        let mut vent_started = None;
        match status {
            AirlockStatus::InsideClosing => {
                open_all(&mut self.devices.inner);
            }
            AirlockStatus::WaitingToDepressurize
            | AirlockStatus::Depressurizing
            | AirlockStatus::Depressurized => {
                set_depressurize(&mut self.devices.vents, false);
                vent_started = Some(now);
            }
            AirlockStatus::OutsideOpening | AirlockStatus::OutsideOpen => {
                unlock_and_close(&mut self.devices.outer);
            }
            AirlockStatus::Invalid => {
                self.reset(false);
                vent_started = Some(now);
            }
            _ => {}
        }

        self.devices
            .write(&StoredStatus::new(Direction::ToInside, vent_started));
    }

    /// Request outside access.
    pub fn open_outer(&mut self, now: DateTime<Utc>) {
        let (status, _) = self.evaluate(now);
        info!("Airlock {}: open outer requested in {:?}", self.number, status);

        let mut vent_started = None;
        match status {
            AirlockStatus::InsideOpening | AirlockStatus::InsideOpen => {
                unlock_and_close(&mut self.devices.inner);
            }
            AirlockStatus::OutsideClosing => {
                open_all(&mut self.devices.outer);
            }
            AirlockStatus::WaitingToPressurize
            | AirlockStatus::Pressurizing
            | AirlockStatus::Pressurized => {
                set_depressurize(&mut self.devices.vents, true);
                vent_started = Some(now);
            }
            AirlockStatus::Invalid => {
                self.reset(true);
                vent_started = Some(now);
            }
            _ => {}
        }

        self.devices
            .write(&StoredStatus::new(Direction::ToOutside, vent_started));
    }

    /// Switch to the other side.  Returns the direction that was requested.
    pub fn toggle(&mut self, now: DateTime<Utc>) -> Direction {
        if self.status(now).favours_inside() {
            self.open_outer(now);
            Direction::ToOutside
        } else {
            self.open_inner(now);
            Direction::ToInside
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn evaluate(&self, now: DateTime<Utc>) -> (AirlockStatus, StoredStatus) {
        let stored = self.devices.read();
        let snapshot = DeviceSnapshot::capture(&self.devices);
        let status = compute_status(&snapshot, &stored, now, &self.config);
        debug!(
            "Airlock {}: {:?} (direction={}, vent_started={:?})",
            self.number, status, stored.direction, stored.vent_started
        );
        (status, stored)
    }

    /// Recover from `Invalid`: shut everything and point the vents one way.
    fn reset(&mut self, depressurize: bool) {
        warn!(
            "Airlock {}: invalid device state, closing all doors (depressurize={})",
            self.number, depressurize
        );
        unlock_and_close(&mut self.devices.inner);
        unlock_and_close(&mut self.devices.outer);
        set_depressurize(&mut self.devices.vents, depressurize);
    }
}

fn set_enabled<D: DoorPort>(doors: &mut [D], enabled: bool) {
    for door in doors {
        door.set_enabled(enabled);
    }
}

fn open_all<D: DoorPort>(doors: &mut [D]) {
    for door in doors {
        door.open();
    }
}

fn unlock_and_open<D: DoorPort>(doors: &mut [D]) {
    for door in doors {
        door.set_enabled(true);
        door.open();
    }
}

fn unlock_and_close<D: DoorPort>(doors: &mut [D]) {
    for door in doors {
        door.set_enabled(true);
        door.close();
    }
}

fn set_depressurize<V: VentPort>(vents: &mut [V], depressurize: bool) {
    for vent in vents {
        vent.set_depressurize(depressurize);
    }
}
