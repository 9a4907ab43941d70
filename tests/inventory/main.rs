//! Inventory workflow integration tests.
//!
//! - Record lifecycle (create, get, update variants, delete)
//! - Read queries and their fail-open behaviour
//! - HTTP transport over a real listener

mod lifecycle;
mod faults;
