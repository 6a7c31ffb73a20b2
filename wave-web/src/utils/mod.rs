//! Frontend utilities

pub mod constants;
