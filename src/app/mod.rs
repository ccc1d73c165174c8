//! Application layer: the single dispatch point around the airlock core.
//!
//! Everything the host does goes through
//! [`StationService::run`](service::StationService::run): periodic ticks
//! and operator arguments alike.  All interaction with devices happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without a host engine.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
