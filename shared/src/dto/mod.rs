//! # Domain Records
//!
//! Records shared across the frontend. The wave record derives `serde`
//! traits with default snake_case field naming so it can be serialized
//! as-is for diagnostics or future API surfaces.

pub mod wave;

pub use wave::*;
