//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements | Connects to            |
//! |------------|------------|------------------------|
//! | `log_sink` | EventSink  | `log` facade           |
//! | `time`     | ClockPort  | Host UTC wall clock    |
//!
//! Door and vent ports are implemented by the host embedding the crate.

pub mod log_sink;
pub mod time;
