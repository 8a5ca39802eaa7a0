//! Domain modules organized as vertical slices.
//!
//! - `analysis` — Response classification: wire types, conversions, result types
//! - `session` — The message timeline, placeholder lifecycle and chart toggles

pub mod analysis;
pub mod session;
