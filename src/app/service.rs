//! Station service: the single dispatch point.
//!
//! [`StationService`] is what the host calls, on every periodic tick and
//! for every operator argument.  It rediscovers the airlocks from the
//! host's blocks, reads the clock once, and either applies one command or
//! advances every airlock.
//!
//! ```text
//!  blocks ──▶ discover ──▶ { n ▶ Airlock } ──▶ process / command ──▶ devices
//!                 │                                  │
//!                 └──────────── EventSink ◀──────────┘
//! ```
//!
//! Two calls never overlap; the host serializes them.  The only state the
//! service keeps between calls is the last rejected argument, so the
//! operator keeps seeing it until a command succeeds.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::airlock::Airlock;
use crate::config::AirlockConfig;
use crate::discovery::{Block, discover};
use crate::error::{CommandError, Result};

use super::commands::{AirlockCommand, parse_command};
use super::events::AppEvent;
use super::ports::{ClockPort, DoorPort, EventSink, VentPort};

/// Why the host is calling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Periodic tick.
    Tick,
    /// Operator or automation argument, e.g. `toggle:2`.
    Command(String),
}

/// Orchestrates discovery, command dispatch and the periodic tick.
pub struct StationService {
    config: AirlockConfig,
    /// Message of the last rejected argument, cleared by the next success.
    rejected: Option<String>,
}

impl StationService {
    pub fn new(config: AirlockConfig) -> Self {
        Self {
            config,
            rejected: None,
        }
    }

    pub fn config(&self) -> &AirlockConfig {
        &self.config
    }

    /// How often the host should send [`Trigger::Tick`].
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.config.tick_interval_ms))
    }

    /// Message of the last rejected argument, if it is still latched.
    pub fn rejected(&self) -> Option<&str> {
        self.rejected.as_deref()
    }

    /// Handle one host invocation.
    ///
    /// Returns the outcome of a command; ticks and blank arguments always
    /// succeed.
    pub fn run<D, V>(
        &mut self,
        trigger: Trigger,
        blocks: impl IntoIterator<Item = Block<D, V>>,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Result<()>
    where
        D: DoorPort,
        V: VentPort,
    {
        let mut airlocks = discover(blocks, &self.config, sink);
        let now = clock.now();

        match trigger {
            Trigger::Command(argument) if !argument.trim().is_empty() => {
                match Self::dispatch(&argument, &mut airlocks, now, sink) {
                    Ok(()) => {
                        self.rejected = None;
                        Ok(())
                    }
                    Err(e) => {
                        let message = e.to_string();
                        warn!("{}", message);
                        sink.emit(&AppEvent::CommandRejected {
                            message: message.clone(),
                        });
                        self.rejected = Some(message);
                        Err(e)
                    }
                }
            }
            _ => {
                if let Some(message) = &self.rejected {
                    sink.emit(&AppEvent::CommandRejected {
                        message: message.clone(),
                    });
                }
                for airlock in airlocks.values_mut() {
                    airlock.process(now);
                }
                Ok(())
            }
        }
    }

    fn dispatch<D: DoorPort, V: VentPort>(
        argument: &str,
        airlocks: &mut BTreeMap<u32, Airlock<D, V>>,
        now: DateTime<Utc>,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        let (command, number) = parse_command(argument, |n| airlocks.contains_key(&n))
            .map_err(|e| e.with_argument(argument))?;
        let Some(airlock) = airlocks.get_mut(&number) else {
            return Err(CommandError::UnknownAirlock(number).with_argument(argument));
        };

        let before = airlock.status(now);
        match command {
            AirlockCommand::Toggle => {
                airlock.toggle(now);
            }
            AirlockCommand::OpenInner => airlock.open_inner(now),
            AirlockCommand::OpenOuter => airlock.open_outer(now),
        }
        let after = airlock.status(now);

        info!("Airlock {}: '{}' applied in {:?}", number, command.verb(), before);
        sink.emit(&AppEvent::CommandApplied {
            number,
            command,
            before,
        });
        if after != before {
            sink.emit(&AppEvent::StatusChanged {
                number,
                from: before,
                to: after,
            });
        }
        Ok(())
    }
}
