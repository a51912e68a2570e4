//! Domain types for the seat-availability board.
//! - `reservation`: the persisted store and webhook merge rules
//! - `csv` / `gviz`: readers for the published spreadsheet formats
//! - `symbol` / `board`: glyph coloring and the page view model

pub mod errors;
pub mod number;
pub mod reservation;
pub mod csv;
pub mod range;
pub mod gviz;
pub mod symbol;
pub mod board;

pub use errors::ModelError;
pub use reservation::{Day, ReservationStore, Slot, WebhookOutcome, WebhookUpdate};
