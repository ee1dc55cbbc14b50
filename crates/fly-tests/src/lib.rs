//! End-to-end test suite for the FlyAnyTrip booking simulator.
//!
//! Integration tests drive a [`BookingCoordinator`](fly_booking::BookingCoordinator)
//! on virtual time through the full select → connect → pay → reset cycle.

pub mod helpers;
