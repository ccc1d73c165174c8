//! Integration tests for the StationService → discovery → airlock pipeline.
//!
//! Each call hands the service the full block list, exactly as a host
//! would on every tick or operator argument.

use airlock::airlock::AirlockStatus;
use airlock::app::commands::AirlockCommand;
use airlock::app::events::AppEvent;
use airlock::app::ports::{DoorPort, DoorStatus, VentPort};
use airlock::app::service::{StationService, Trigger};
use airlock::config::AirlockConfig;
use airlock::discovery::{Block, MISSING_OUTER};
use airlock::error::{CommandError, Error};
use std::time::Duration;

use crate::mock_devices::{FixedClock, MockAirlock, MockDoor, MockVent, RecordingSink};

fn station(airlocks: &[&MockAirlock]) -> Vec<Block<MockDoor, MockVent>> {
    airlocks.iter().flat_map(|a| a.blocks()).collect()
}

fn command(text: &str) -> Trigger {
    Trigger::Command(text.to_owned())
}

// ── Tick ──────────────────────────────────────────────────────

#[test]
fn tick_processes_every_complete_airlock() {
    let one = MockAirlock::pressurized(1, 1, 1);
    let two = MockAirlock::pressurized(2, 2, 1);
    let clock = FixedClock::new();
    let mut sink = RecordingSink::new();
    let mut service = StationService::new(AirlockConfig::default());

    service
        .run(Trigger::Tick, station(&[&one, &two]), &clock, &mut sink)
        .expect("tick never fails");

    for door in one.inner.iter().chain(&two.inner) {
        assert_eq!(door.status(), DoorStatus::Opening);
    }
    assert!(sink.events.is_empty());
}

#[test]
fn tick_reports_incomplete_airlocks_and_skips_them() {
    let complete = MockAirlock::pressurized(1, 1, 1);
    let broken = MockAirlock::pressurized(2, 1, 1);
    let mut blocks = station(&[&complete]);
    blocks.push(Block::Door(broken.inner[0].clone()));
    blocks.push(Block::Vent(broken.vents[0].clone()));
    let clock = FixedClock::new();
    let mut sink = RecordingSink::new();
    let mut service = StationService::new(AirlockConfig::default());

    service
        .run(Trigger::Tick, blocks, &clock, &mut sink)
        .expect("tick never fails");

    assert_eq!(complete.inner[0].status(), DoorStatus::Opening);
    assert_eq!(broken.inner[0].status(), DoorStatus::Closed);
    assert!(broken.take_all_calls().is_empty());
    assert_eq!(
        sink.events,
        vec![AppEvent::Incomplete {
            number: 2,
            missing: vec![MISSING_OUTER],
        }]
    );
}

#[test]
fn blank_argument_is_a_tick() {
    let one = MockAirlock::pressurized(1, 1, 1);
    let clock = FixedClock::new();
    let mut sink = RecordingSink::new();
    let mut service = StationService::new(AirlockConfig::default());

    service
        .run(command("   "), station(&[&one]), &clock, &mut sink)
        .expect("blank argument never fails");

    assert_eq!(one.inner[0].status(), DoorStatus::Opening);
}

#[test]
fn tick_interval_follows_config() {
    let service = StationService::new(AirlockConfig::default());
    assert_eq!(service.tick_interval(), Duration::from_millis(166));

    let config = AirlockConfig::from_json(r#"{"tick_interval_ms": 1000}"#).expect("valid config");
    assert_eq!(StationService::new(config).tick_interval(), Duration::from_secs(1));
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn command_applies_to_its_airlock_only() {
    let one = MockAirlock::pressurized(1, 1, 1);
    let two = MockAirlock::pressurized(2, 1, 1);
    let clock = FixedClock::new();
    let mut sink = RecordingSink::new();
    let mut service = StationService::new(AirlockConfig::default());

    service
        .run(command("Toggle:2"), station(&[&one, &two]), &clock, &mut sink)
        .expect("valid command");

    assert!(two.vents[0].depressurize());
    assert!(one.take_all_calls().is_empty());
    assert_eq!(
        sink.events,
        vec![
            AppEvent::CommandApplied {
                number: 2,
                command: AirlockCommand::Toggle,
                before: AirlockStatus::Pressurized,
            },
            AppEvent::StatusChanged {
                number: 2,
                from: AirlockStatus::Pressurized,
                to: AirlockStatus::WaitingToDepressurize,
            },
        ]
    );
}

#[test]
fn command_without_visible_change_emits_no_status_event() {
    let one = MockAirlock::pressurized(1, 1, 1);
    let clock = FixedClock::new();
    let mut sink = RecordingSink::new();
    let mut service = StationService::new(AirlockConfig::default());

    service
        .run(command("inner:1"), station(&[&one]), &clock, &mut sink)
        .expect("valid command");

    assert_eq!(
        sink.events,
        vec![AppEvent::CommandApplied {
            number: 1,
            command: AirlockCommand::OpenInner,
            before: AirlockStatus::Pressurized,
        }]
    );
}

#[test]
fn unknown_airlock_is_rejected() {
    let one = MockAirlock::pressurized(1, 1, 1);
    let clock = FixedClock::new();
    let mut sink = RecordingSink::new();
    let mut service = StationService::new(AirlockConfig::default());

    let err = service
        .run(command("inner:4"), station(&[&one]), &clock, &mut sink)
        .unwrap_err();

    assert_eq!(
        err,
        Error::Command {
            argument: "inner:4".into(),
            source: CommandError::UnknownAirlock(4),
        }
    );
    assert_eq!(
        sink.rejections(),
        vec!["Bad argument 'inner:4': Airlock 4 cannot be found or is not complete"]
    );
    assert!(one.take_all_calls().is_empty());
}

#[test]
fn incomplete_airlock_cannot_be_commanded() {
    let broken = MockAirlock::pressurized(3, 1, 0);
    let clock = FixedClock::new();
    let mut sink = RecordingSink::new();
    let mut service = StationService::new(AirlockConfig::default());

    let err = service
        .run(command("outer:3"), station(&[&broken]), &clock, &mut sink)
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Command {
            source: CommandError::UnknownAirlock(3),
            ..
        }
    ));
}

// ── Rejection latch ───────────────────────────────────────────

#[test]
fn rejection_is_repeated_until_a_command_succeeds() {
    let one = MockAirlock::pressurized(1, 1, 1);
    let clock = FixedClock::new();
    let mut sink = RecordingSink::new();
    let mut service = StationService::new(AirlockConfig::default());

    assert!(service
        .run(command("open:1"), station(&[&one]), &clock, &mut sink)
        .is_err());
    let message = "Bad argument 'open:1': First parameter 'open' is not valid, \
                   it must be one of 'toggle', 'inner', or 'outer'";
    assert_eq!(service.rejected(), Some(message));

    service
        .run(Trigger::Tick, station(&[&one]), &clock, &mut sink)
        .expect("tick never fails");
    assert_eq!(sink.rejections(), vec![message, message]);

    // The tick still ran despite the latched rejection.
    assert_eq!(one.inner[0].status(), DoorStatus::Opening);

    service
        .run(command("toggle:1"), station(&[&one]), &clock, &mut sink)
        .expect("valid command");
    assert_eq!(service.rejected(), None);

    sink.events.clear();
    service
        .run(Trigger::Tick, station(&[&one]), &clock, &mut sink)
        .expect("tick never fails");
    assert!(sink.rejections().is_empty());
}

#[test]
fn later_rejection_replaces_earlier_one() {
    let one = MockAirlock::pressurized(1, 1, 1);
    let clock = FixedClock::new();
    let mut sink = RecordingSink::new();
    let mut service = StationService::new(AirlockConfig::default());

    let _ = service.run(command("toggle"), station(&[&one]), &clock, &mut sink);
    let _ = service.run(command("toggle:one"), station(&[&one]), &clock, &mut sink);

    assert_eq!(
        service.rejected(),
        Some("Bad argument 'toggle:one': Second parameter must be a number")
    );
}
