//! Airlock controller library.
//!
//! Sequences numbered two-stage airlocks (inner doors, outer doors, air
//! vents) so that both sides are never open at once.  The host owns the
//! devices and the timer; it calls
//! [`StationService::run`](app::service::StationService::run) on every
//! tick and for every operator argument, handing over the current blocks.

#![deny(unused_must_use)]

pub mod adapters;
pub mod airlock;
pub mod app;
pub mod config;
pub mod discovery;
pub mod error;
