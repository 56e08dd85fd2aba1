//! Shared test harness modules for the Waypost CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod discover_unit;
mod helpers;
mod resolve_steps;
