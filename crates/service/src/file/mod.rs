//! File-backed implementations of the service seams.

pub mod reservations;
