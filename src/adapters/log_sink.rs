//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the `log`
//! facade.  A host that echoes to an in-game screen would implement the
//! same trait.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] as a single line.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Incomplete { number, missing } => {
                warn!(
                    "INCOMPLETE | Airlock {} is incomplete, missing: {}",
                    number,
                    missing.join(", ")
                );
            }
            AppEvent::CommandRejected { message } => {
                warn!("REJECTED | {}", message);
            }
            AppEvent::CommandApplied {
                number,
                command,
                before,
            } => {
                info!("COMMAND | airlock={} verb={} before={:?}", number, command.verb(), before);
            }
            AppEvent::StatusChanged { number, from, to } => {
                info!("STATUS | airlock={} {:?} -> {:?}", number, from, to);
            }
        }
    }
}
