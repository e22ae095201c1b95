// Rust guideline compliant 2026-02-27

//! Adapters (secondary ports) for the simulator binary.
//!
//! Each sub-module implements, or supports, a hexagonal port trait defined in
//! the `domain` crate. Adapters are isolated from generator and loop logic.

pub mod influx_sink;
pub mod line_protocol;
