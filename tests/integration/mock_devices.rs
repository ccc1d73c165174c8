//! Mock devices for integration tests.
//!
//! Handles are cheap clones over shared state, like the host engine's
//! block references: the airlock holds one clone, the test keeps another
//! to play "physics" between calls and to inspect every command issued.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use airlock::app::events::AppEvent;
use airlock::app::ports::{
    ClockPort, DoorPort, DoorStatus, EventSink, TerminalBlock, VentPort, VentStatus,
};
use airlock::discovery::Block;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

// ── Command record ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    Open,
    Close,
    SetEnabled(bool),
    SetDepressurize(bool),
    SetCustomData(String),
}

// ── MockDoor ──────────────────────────────────────────────────

#[derive(Debug)]
pub struct DoorState {
    name: String,
    status: DoorStatus,
    enabled: bool,
    custom_data: String,
    calls: Vec<DeviceCall>,
}

#[derive(Debug, Clone)]
pub struct MockDoor(Rc<RefCell<DoorState>>);

#[allow(dead_code)]
impl MockDoor {
    pub fn new(name: &str, status: DoorStatus) -> Self {
        Self(Rc::new(RefCell::new(DoorState {
            name: name.to_owned(),
            status,
            enabled: true,
            custom_data: String::new(),
            calls: Vec::new(),
        })))
    }

    /// Force the physical state (door moved on its own, or by hand).
    pub fn force(&self, status: DoorStatus) {
        self.0.borrow_mut().status = status;
    }

    /// Finish any motion in progress.
    pub fn settle(&self) {
        let mut s = self.0.borrow_mut();
        s.status = match s.status {
            DoorStatus::Opening => DoorStatus::Open,
            DoorStatus::Closing => DoorStatus::Closed,
            other => other,
        };
    }

    pub fn seed_custom_data(&self, data: &str) {
        self.0.borrow_mut().custom_data = data.to_owned();
    }

    pub fn rename(&self, name: &str) {
        self.0.borrow_mut().name = name.to_owned();
    }

    pub fn calls(&self) -> Vec<DeviceCall> {
        self.0.borrow().calls.clone()
    }

    pub fn take_calls(&self) -> Vec<DeviceCall> {
        std::mem::take(&mut self.0.borrow_mut().calls)
    }
}

impl TerminalBlock for MockDoor {
    fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    fn custom_data(&self) -> String {
        self.0.borrow().custom_data.clone()
    }

    fn set_custom_data(&mut self, data: &str) {
        let mut s = self.0.borrow_mut();
        s.custom_data = data.to_owned();
        s.calls.push(DeviceCall::SetCustomData(data.to_owned()));
    }
}

impl DoorPort for MockDoor {
    fn status(&self) -> DoorStatus {
        self.0.borrow().status
    }

    fn is_enabled(&self) -> bool {
        self.0.borrow().enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        let mut s = self.0.borrow_mut();
        s.enabled = enabled;
        s.calls.push(DeviceCall::SetEnabled(enabled));
    }

    fn open(&mut self) {
        let mut s = self.0.borrow_mut();
        if s.status != DoorStatus::Open {
            s.status = DoorStatus::Opening;
        }
        s.calls.push(DeviceCall::Open);
    }

    fn close(&mut self) {
        let mut s = self.0.borrow_mut();
        if s.status != DoorStatus::Closed {
            s.status = DoorStatus::Closing;
        }
        s.calls.push(DeviceCall::Close);
    }
}

// ── MockVent ──────────────────────────────────────────────────

#[derive(Debug)]
pub struct VentState {
    name: String,
    status: VentStatus,
    oxygen: f32,
    depressurize: bool,
    custom_data: String,
    calls: Vec<DeviceCall>,
}

#[derive(Debug, Clone)]
pub struct MockVent(Rc<RefCell<VentState>>);

#[allow(dead_code)]
impl MockVent {
    pub fn new(name: &str, status: VentStatus, oxygen: f32) -> Self {
        Self(Rc::new(RefCell::new(VentState {
            name: name.to_owned(),
            status,
            oxygen,
            depressurize: false,
            custom_data: String::new(),
            calls: Vec::new(),
        })))
    }

    /// Force the reported status and measured oxygen.
    pub fn force(&self, status: VentStatus, oxygen: f32) {
        let mut s = self.0.borrow_mut();
        s.status = status;
        s.oxygen = oxygen;
    }

    pub fn seed_custom_data(&self, data: &str) {
        self.0.borrow_mut().custom_data = data.to_owned();
    }

    pub fn calls(&self) -> Vec<DeviceCall> {
        self.0.borrow().calls.clone()
    }

    pub fn take_calls(&self) -> Vec<DeviceCall> {
        std::mem::take(&mut self.0.borrow_mut().calls)
    }
}

impl TerminalBlock for MockVent {
    fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    fn custom_data(&self) -> String {
        self.0.borrow().custom_data.clone()
    }

    fn set_custom_data(&mut self, data: &str) {
        let mut s = self.0.borrow_mut();
        s.custom_data = data.to_owned();
        s.calls.push(DeviceCall::SetCustomData(data.to_owned()));
    }
}

impl VentPort for MockVent {
    fn status(&self) -> VentStatus {
        self.0.borrow().status
    }

    fn oxygen_level(&self) -> f32 {
        self.0.borrow().oxygen
    }

    fn depressurize(&self) -> bool {
        self.0.borrow().depressurize
    }

    fn set_depressurize(&mut self, depressurize: bool) {
        let mut s = self.0.borrow_mut();
        s.depressurize = depressurize;
        s.calls.push(DeviceCall::SetDepressurize(depressurize));
    }
}

// ── Station: a set of tagged blocks ───────────────────────────

/// One airlock's worth of mock devices, tagged for discovery.
#[allow(dead_code)]
pub struct MockAirlock {
    pub inner: Vec<MockDoor>,
    pub outer: Vec<MockDoor>,
    pub vents: Vec<MockVent>,
}

#[allow(dead_code)]
impl MockAirlock {
    /// `inner`/`outer` doors, one vent, all at rest in a pressurized chamber.
    pub fn pressurized(number: u32, inner: usize, outer: usize) -> Self {
        Self {
            inner: (0..inner)
                .map(|i| MockDoor::new(&format!("Door {i} [Airlock {number} Inner]"), DoorStatus::Closed))
                .collect(),
            outer: (0..outer)
                .map(|i| MockDoor::new(&format!("Hatch {i} [Airlock {number} Outer]"), DoorStatus::Closed))
                .collect(),
            vents: vec![MockVent::new(
                &format!("Vent [Airlock {number} Vent]"),
                VentStatus::Pressurized,
                1.0,
            )],
        }
    }

    pub fn blocks(&self) -> Vec<Block<MockDoor, MockVent>> {
        self.inner
            .iter()
            .chain(&self.outer)
            .cloned()
            .map(Block::Door)
            .chain(self.vents.iter().cloned().map(Block::Vent))
            .collect()
    }

    pub fn settle_doors(&self) {
        for door in self.inner.iter().chain(&self.outer) {
            door.settle();
        }
    }

    pub fn force_vents(&self, status: VentStatus, oxygen: f32) {
        for vent in &self.vents {
            vent.force(status, oxygen);
        }
    }

    pub fn take_all_calls(&self) -> Vec<DeviceCall> {
        let mut calls = Vec::new();
        for door in self.inner.iter().chain(&self.outer) {
            calls.extend(door.take_calls());
        }
        for vent in &self.vents {
            calls.extend(vent.take_calls());
        }
        calls
    }

    pub fn custom_data(&self) -> Vec<String> {
        self.inner
            .iter()
            .chain(&self.outer)
            .map(TerminalBlock::custom_data)
            .chain(self.vents.iter().map(TerminalBlock::custom_data))
            .collect()
    }
}

// ── Clock ─────────────────────────────────────────────────────

pub struct FixedClock(Cell<DateTime<Utc>>);

#[allow(dead_code)]
impl FixedClock {
    pub fn new() -> Self {
        Self(Cell::new(Utc.with_ymd_and_hms(2030, 1, 1, 8, 0, 0).unwrap()))
    }

    pub fn advance(&self, delta: TimeDelta) {
        self.0.set(self.0.get() + delta);
    }
}

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0.get()
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejections(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::CommandRejected { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
