//! Airlock discovery.
//!
//! Groups the host's doors and vents into numbered airlocks by name tag:
//!
//! ```text
//!   "Hangar Door [Airlock 2 Inner]"  ─┐
//!   "Hatch [airlock 2 outer]"        ─┼──▶ Airlock 2
//!   "Vent [Airlock 2 Vent]"          ─┘
//!   "Vent [Airlock 5 Vent]"          ────▶ Incomplete { 5, ["inner door", "outer door"] }
//! ```
//!
//! Discovery runs on every service call, so renamed, added or destroyed
//! devices are picked up without a restart.  Only complete airlocks are
//! built; every incomplete group is reported through the [`EventSink`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use log::warn;
use regex::Regex;

use crate::airlock::{Airlock, AirlockDevices};
use crate::app::events::AppEvent;
use crate::app::ports::{DoorPort, EventSink, TerminalBlock, VentPort};
use crate::config::AirlockConfig;

static INNER_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[Airlock ([0-9]+) Inner\]").expect("static pattern"));
static OUTER_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[Airlock ([0-9]+) Outer\]").expect("static pattern"));
static VENT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[Airlock ([0-9]+) Vent\]").expect("static pattern"));

pub const MISSING_INNER: &str = "inner door";
pub const MISSING_OUTER: &str = "outer door";
pub const MISSING_VENT: &str = "air vent";

/// A block as seen by the host, before grouping.
#[derive(Debug, Clone)]
pub enum Block<D, V> {
    Door(D),
    Vent(V),
    /// Anything the airlock does not control.
    Other,
}

/// Airlock number tagged in `name`, if it matches `pattern`.
fn tagged_number(pattern: &Regex, name: &str) -> Option<Result<u32, ()>> {
    let caps = pattern.captures(name)?;
    Some(caps[1].parse::<u32>().map_err(|_| ()))
}

/// Push `block` into its group if its name carries `pattern`.
/// Hands the block back when the name does not match.
fn try_add<T: TerminalBlock>(
    block: T,
    groups: &mut BTreeMap<u32, Vec<T>>,
    pattern: &Regex,
) -> Result<(), T> {
    let name = block.name();
    match tagged_number(pattern, &name) {
        None => Err(block),
        Some(Ok(number)) => {
            groups.entry(number).or_default().push(block);
            Ok(())
        }
        Some(Err(())) => {
            warn!("Ignoring '{}': airlock number out of range", name);
            Ok(())
        }
    }
}

/// Group `blocks` into complete airlocks, reporting incomplete ones.
pub fn discover<D, V>(
    blocks: impl IntoIterator<Item = Block<D, V>>,
    config: &AirlockConfig,
    sink: &mut impl EventSink,
) -> BTreeMap<u32, Airlock<D, V>>
where
    D: DoorPort,
    V: VentPort,
{
    let mut inner: BTreeMap<u32, Vec<D>> = BTreeMap::new();
    let mut outer: BTreeMap<u32, Vec<D>> = BTreeMap::new();
    let mut vents: BTreeMap<u32, Vec<V>> = BTreeMap::new();

    for block in blocks {
        match block {
            Block::Door(door) => {
                if let Err(door) = try_add(door, &mut inner, &INNER_TAG) {
                    let _ = try_add(door, &mut outer, &OUTER_TAG);
                }
            }
            Block::Vent(vent) => {
                let _ = try_add(vent, &mut vents, &VENT_TAG);
            }
            Block::Other => {}
        }
    }

    let mut airlocks = BTreeMap::new();
    for (number, inner_doors) in inner {
        let outer_doors = outer.remove(&number);
        let vent_group = vents.remove(&number);
        match (outer_doors, vent_group) {
            (Some(outer_doors), Some(vent_group)) => {
                let devices = AirlockDevices::new(inner_doors, outer_doors, vent_group);
                airlocks.insert(number, Airlock::new(number, devices, config.clone()));
            }
            (outer_doors, vent_group) => {
                let mut missing = Vec::new();
                if outer_doors.is_none() {
                    missing.push(MISSING_OUTER);
                }
                if vent_group.is_none() {
                    missing.push(MISSING_VENT);
                }
                report_incomplete(number, missing, sink);
            }
        }
    }

    for number in outer.into_keys() {
        let mut missing = vec![MISSING_INNER];
        if vents.remove(&number).is_none() {
            missing.push(MISSING_VENT);
        }
        report_incomplete(number, missing, sink);
    }

    for number in vents.into_keys() {
        report_incomplete(number, vec![MISSING_INNER, MISSING_OUTER], sink);
    }

    airlocks
}

fn report_incomplete(number: u32, missing: Vec<&'static str>, sink: &mut impl EventSink) {
    warn!("Airlock {} is incomplete, missing: {}", number, missing.join(", "));
    sink.emit(&AppEvent::Incomplete { number, missing });
}
