//! Published-spreadsheet access.
//!
//! `SheetSource` is the seam the board talks to; `GvizClient` is the HTTP
//! implementation against the spreadsheet provider.

pub mod client;

use async_trait::async_trait;
use models::gviz::Grid;
use models::range::CellRange;
use models::ReservationStore;

use crate::errors::ServiceError;

pub use client::GvizClient;

#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Cells of `range` on the sheet tab `gid`, as display strings.
    async fn fetch_range(&self, gid: &str, range: &CellRange) -> Result<Grid, ServiceError>;

    /// Reservation days from a published CSV export.
    async fn fetch_csv(&self, url: &str) -> Result<ReservationStore, ServiceError>;
}
