//! Service layer between the HTTP routes and the domain types in `models`.
//! - `storage`: lock-guarded JSON file persistence
//! - `reservations` / `file`: the reservation repository seam and its file implementation
//! - `sheets`: published-spreadsheet fetching
//! - `board`: assembly of the availability board

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod reservations;
pub mod file;
pub mod sheets;
pub mod board;

pub use errors::ServiceError;
