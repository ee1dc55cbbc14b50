//! # fly-core
//! Foundation types, fee estimation, and trait seams for the FlyAnyTrip
//! booking simulator.

pub mod catalog;
pub mod constants;
pub mod error;
pub mod fees;
pub mod traits;
pub mod types;
