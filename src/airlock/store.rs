//! Persisted airlock record, replicated across every device's custom data.
//!
//! The airlock owns no storage of its own.  Its last intent lives as a
//! short text record in the custom-data field of *every* door and vent it
//! controls, so the record survives the host restarting the controller
//! and survives any single device being removed.
//!
//! ## Record format
//!
//! ```text
//!   <Direction>,<timestamp | empty>
//!   ToInside,2024-01-01T00:00:00.000000000Z
//!   ToOutside,
//! ```
//!
//! Timestamps are written as RFC 3339 UTC with nanosecond precision so a
//! record read back and re-written is byte-identical.  RFC 3339 only
//! carries four-digit years, so instants outside 0000–9999 are clamped to
//! that range on write.  Reading also accepts other RFC 3339 precisions
//! and zone-less timestamps (as UTC).
//!
//! ## Resolution
//!
//! Devices are scanned inner doors first, then outer doors, then vents;
//! the first record that parses wins.  Unparseable or empty text is
//! skipped.  With no parseable record anywhere the default
//! `{ToInside, 0000-01-01T00:00:00Z}` applies, which reads as a
//! long-expired timer.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use log::{debug, info};

use super::{AirlockDevices, Direction};
use crate::app::ports::{DoorPort, TerminalBlock, VentPort};

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// The durable part of an airlock's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredStatus {
    pub direction: Direction,
    /// When the vents were last asked to start (de)pressurizing.
    pub vent_started: Option<DateTime<Utc>>,
}

/// 0000-01-01T00:00:00Z
const EARLIEST_WRITABLE_SECS: i64 = -62_167_219_200;
/// 9999-12-31T23:59:59Z
const LATEST_WRITABLE_SECS: i64 = 253_402_300_799;

/// Earliest instant the text form can carry.
pub fn earliest_writable() -> DateTime<Utc> {
    DateTime::from_timestamp(EARLIEST_WRITABLE_SECS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Latest instant the text form can carry.
pub fn latest_writable() -> DateTime<Utc> {
    DateTime::from_timestamp(LATEST_WRITABLE_SECS, 999_999_999).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl Default for StoredStatus {
    fn default() -> Self {
        Self {
            direction: Direction::ToInside,
            vent_started: Some(earliest_writable()),
        }
    }
}

impl StoredStatus {
    pub fn new(direction: Direction, vent_started: Option<DateTime<Utc>>) -> Self {
        Self {
            direction,
            vent_started,
        }
    }

    /// Parse the custom-data text form.  `None` for anything that is not
    /// exactly `"<Direction>,<timestamp | empty>"`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split(',');
        let (Some(direction), Some(stamp), None) = (parts.next(), parts.next(), parts.next()) else {
            return None;
        };

        let direction = direction.parse::<Direction>().ok()?;
        if stamp.is_empty() {
            return Some(Self::new(direction, None));
        }

        Some(Self::new(direction, Some(parse_timestamp(stamp)?)))
    }

    /// Render the custom-data text form.
    pub fn format(&self) -> String {
        let stamp = self
            .vent_started
            .map(|t| {
                t.clamp(earliest_writable(), latest_writable())
                    .to_rfc3339_opts(SecondsFormat::Nanos, true)
            })
            .unwrap_or_default();
        format!("{},{}", self.direction, stamp)
    }
}

fn parse_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(stamp) {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Read/write access to an airlock's persisted record.
///
/// Where and how many times the record is physically stored is up to the
/// implementation; callers only see one logical record.
pub trait StatusStore {
    /// Current record, or the default when none is stored.
    fn read(&self) -> StoredStatus;

    /// Replace the record.
    fn write(&mut self, status: &StoredStatus);
}

impl<D: DoorPort, V: VentPort> StatusStore for AirlockDevices<D, V> {
    fn read(&self) -> StoredStatus {
        let texts = self
            .inner
            .iter()
            .chain(&self.outer)
            .map(TerminalBlock::custom_data)
            .chain(self.vents.iter().map(TerminalBlock::custom_data));

        for text in texts {
            match StoredStatus::parse(&text) {
                Some(status) => return status,
                None if !text.is_empty() => debug!("Skipping unparseable airlock record {:?}", text),
                None => {}
            }
        }
        StoredStatus::default()
    }

    fn write(&mut self, status: &StoredStatus) {
        let data = status.format();
        for door in self.inner.iter_mut().chain(self.outer.iter_mut()) {
            door.set_custom_data(&data);
        }
        for vent in &mut self.vents {
            vent.set_custom_data(&data);
        }
        info!("Airlock record written: {}", data);
    }
}
