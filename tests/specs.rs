//! Behavioral specifications for the gavel CLI.
//!
//! These tests are black-box: they invoke the CLI binary and verify
//! stdout, stderr, and exit codes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

#[path = "specs/events.rs"]
mod events;
#[path = "specs/govern.rs"]
mod govern;
#[path = "specs/schema.rs"]
mod schema;
