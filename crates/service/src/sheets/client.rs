use std::time::Duration;

use async_trait::async_trait;
use models::csv::parse_sheet_csv;
use models::gviz::{parse_gviz_response, Grid};
use models::range::CellRange;
use models::ReservationStore;
use tracing::debug;

use super::SheetSource;
use crate::errors::ServiceError;

/// Visualization query URL for one range of one tab. `cache_bust` keeps
/// intermediate caches from serving a stale sheet.
pub fn gviz_url(spreadsheet_id: &str, gid: &str, range: &CellRange, cache_bust: i64) -> String {
    format!(
        "https://docs.google.com/spreadsheets/d/{spreadsheet_id}/gviz/tq?tqx=out:json&gid={gid}&range={range}&_={cache_bust}"
    )
}

/// HTTP client for a single published spreadsheet.
#[derive(Clone)]
pub struct GvizClient {
    http: reqwest::Client,
    spreadsheet_id: String,
}

impl GvizClient {
    pub fn new(spreadsheet_id: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Upstream(e.to_string()))?;
        Ok(Self { http, spreadsheet_id: spreadsheet_id.into() })
    }

    async fn get_text(&self, url: &str) -> Result<String, ServiceError> {
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(e.to_string()))?
            .error_for_status()
            .map_err(|e| ServiceError::Upstream(e.to_string()))?;
        resp.text().await.map_err(|e| ServiceError::Upstream(e.to_string()))
    }
}

#[async_trait]
impl SheetSource for GvizClient {
    async fn fetch_range(&self, gid: &str, range: &CellRange) -> Result<Grid, ServiceError> {
        let url = gviz_url(&self.spreadsheet_id, gid, range, chrono::Utc::now().timestamp_millis());
        debug!(%gid, %range, "fetching sheet range");
        let text = self.get_text(&url).await?;
        let grid = parse_gviz_response(&text)?;
        debug!(%gid, %range, rows = grid.len(), "sheet range parsed");
        Ok(grid)
    }

    async fn fetch_csv(&self, url: &str) -> Result<ReservationStore, ServiceError> {
        debug!(%url, "fetching sheet csv");
        let text = self.get_text(url).await?;
        Ok(parse_sheet_csv(&text))
    }
}
