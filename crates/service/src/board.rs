//! Assembles the availability board from the reservation store and the
//! published spreadsheet.
//!
//! Every fetch runs concurrently and fails on its own: a broken tab turns
//! into a message in its section, the rest of the board still renders.

use std::sync::Arc;

use configs::SheetsConfig;
use models::board::{styled_table, summarize, Board, DayDetail, DayStatus, DaySummary, Section};
use models::gviz::Grid;
use tokio::task::JoinSet;
use tracing::{error, warn};

use crate::errors::ServiceError;
use crate::reservations::ReservationRepository;
use crate::sheets::SheetSource;

pub const SUMMARY_FAILED: &str =
    "予約状況の読み込みに失敗しました。ローカルで開く場合は簡易サーバーで表示してください。";
pub const CSV_SOURCE: &str = "Google Sheet (CSV)";

pub fn gid_missing_message(title: &str) -> String {
    format!("{title} の gid が未設定です。READMEの手順に従い gid または CSV URL を設定してください。")
}

pub fn detail_failed_message(title: &str) -> String {
    format!("{title} の読み込みに失敗しました（公開設定と gid を確認してください）。詳細はサーバーログを参照してください。")
}

#[derive(Debug, Clone, Copy)]
enum Fetch {
    Status(usize),
    Detail(usize),
}

pub struct BoardService {
    sheets: Arc<dyn SheetSource>,
    reservations: Arc<dyn ReservationRepository>,
    config: SheetsConfig,
}

impl BoardService {
    pub fn new(
        sheets: Arc<dyn SheetSource>,
        reservations: Arc<dyn ReservationRepository>,
        config: SheetsConfig,
    ) -> Self {
        Self { sheets, reservations, config }
    }

    pub async fn load_board(&self) -> Board {
        let mut tasks: JoinSet<(Fetch, Result<Grid, ServiceError>)> = JoinSet::new();
        let detail_range = self.config.detail_range;

        for (i, day) in self.config.days.iter().enumerate() {
            if let Some(range) = day.status_range {
                if self.config.status_gid.is_empty() {
                    warn!(title = %day.title, "status gid not configured; showing placeholders");
                } else {
                    let sheets = Arc::clone(&self.sheets);
                    let gid = self.config.status_gid.clone();
                    tasks.spawn(async move { (Fetch::Status(i), sheets.fetch_range(&gid, &range).await) });
                }
            }
            if !day.gid.is_empty() {
                let sheets = Arc::clone(&self.sheets);
                let gid = day.gid.clone();
                tasks.spawn(async move { (Fetch::Detail(i), sheets.fetch_range(&gid, &detail_range).await) });
            }
        }

        let (source, summary) = self.load_summary().await;

        let n = self.config.days.len();
        let mut status_values: Vec<Option<Grid>> = vec![None; n];
        let mut detail_values: Vec<Option<Result<Grid, ServiceError>>> = (0..n).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((Fetch::Status(i), Ok(grid))) => status_values[i] = Some(grid),
                Ok((Fetch::Status(i), Err(e))) => {
                    error!(title = %self.config.days[i].title, error = %e, "status fetch failed");
                }
                Ok((Fetch::Detail(i), res)) => detail_values[i] = Some(res),
                Err(e) => error!(error = %e, "sheet fetch task failed"),
            }
        }

        let status = self
            .config
            .days
            .iter()
            .zip(&status_values)
            .map(|(day, values)| DayStatus::from_values(&day.title, &self.config.categories, values.as_ref()))
            .collect();

        let details = self
            .config
            .days
            .iter()
            .zip(detail_values)
            .map(|(day, res)| {
                let table = match res {
                    _ if day.gid.is_empty() => Section::Failed(gid_missing_message(&day.title)),
                    Some(Ok(grid)) => Section::Ready(styled_table(&grid, &detail_range)),
                    Some(Err(e)) => {
                        error!(title = %day.title, gid = %day.gid, error = %e, "detail fetch failed");
                        Section::Failed(detail_failed_message(&day.title))
                    }
                    None => Section::Failed(detail_failed_message(&day.title)),
                };
                DayDetail { title: day.title.clone(), table }
            })
            .collect();

        Board { source, summary, status, details }
    }

    async fn load_summary(&self) -> (String, Section<Vec<DaySummary>>) {
        let (source, result) = if self.config.csv_url.is_empty() {
            (self.reservations.source_name(), self.reservations.load().await)
        } else {
            (CSV_SOURCE.to_string(), self.sheets.fetch_csv(&self.config.csv_url).await)
        };
        match result {
            Ok(store) => (source, Section::Ready(summarize(&store))),
            Err(e) => {
                error!(%source, error = %e, "summary load failed");
                (source, Section::Failed(SUMMARY_FAILED.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use configs::SheetDay;
    use models::range::CellRange;
    use models::{ReservationStore, Slot, Day, WebhookOutcome, WebhookUpdate};

    struct FakeSheets {
        ranges: HashMap<(String, String), Grid>,
        csv: Option<ReservationStore>,
    }

    #[async_trait]
    impl SheetSource for FakeSheets {
        async fn fetch_range(&self, gid: &str, range: &CellRange) -> Result<Grid, ServiceError> {
            self.ranges
                .get(&(gid.to_string(), range.to_string()))
                .cloned()
                .ok_or_else(|| ServiceError::Upstream("404".into()))
        }

        async fn fetch_csv(&self, _url: &str) -> Result<ReservationStore, ServiceError> {
            self.csv.clone().ok_or_else(|| ServiceError::Upstream("csv unavailable".into()))
        }
    }

    struct MemoryRepo(Option<ReservationStore>);

    #[async_trait]
    impl ReservationRepository for MemoryRepo {
        fn source_name(&self) -> String {
            "reservations.json".into()
        }
        async fn read_raw(&self) -> Result<String, ServiceError> {
            unimplemented!()
        }
        async fn load(&self) -> Result<ReservationStore, ServiceError> {
            self.0.clone().ok_or_else(|| ServiceError::Storage("missing".into()))
        }
        async fn overwrite(&self, _payload: &serde_json::Value) -> Result<(), ServiceError> {
            unimplemented!()
        }
        async fn apply_webhook(&self, _update: &WebhookUpdate) -> Result<WebhookOutcome, ServiceError> {
            unimplemented!()
        }
    }

    fn config() -> SheetsConfig {
        SheetsConfig {
            days: vec![
                SheetDay { title: "Day1".into(), gid: "g1".into(), status_range: "H4:H7".parse().ok() },
                SheetDay { title: "Day2".into(), gid: "".into(), status_range: "H10:H13".parse().ok() },
            ],
            status_gid: "st".into(),
            detail_range: "A1:B2".parse().unwrap(),
            ..SheetsConfig::default()
        }
    }

    fn store() -> ReservationStore {
        let mut day = Day::new("2025-11-21", "Day1");
        day.slots.push(Slot::new("19:00", 20, 3));
        ReservationStore { days: vec![day], ..Default::default() }
    }

    #[tokio::test]
    async fn assembles_all_sections() {
        let mut ranges = HashMap::new();
        ranges.insert(("st".to_string(), "H4:H7".to_string()), vec![vec!["〇".to_string()]]);
        ranges.insert(("g1".to_string(), "A1:B2".to_string()), vec![vec!["✕".to_string(), "x".to_string()]]);
        let svc = BoardService::new(
            Arc::new(FakeSheets { ranges, csv: None }),
            Arc::new(MemoryRepo(Some(store()))),
            config(),
        );

        let board = svc.load_board().await;
        assert_eq!(board.source, "reservations.json");
        assert_eq!(board.summary.ready().unwrap()[0].slots[0].remaining, 17);

        assert_eq!(board.status[0].rows[0].cell.text, "〇");
        // Day2 status fetch fails → placeholders
        assert!(board.status[1].rows.iter().all(|r| r.cell.style.is_none()));

        let table = board.details[0].table.ready().unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table[0][0].style.unwrap().background, "#f5b2b2");
        assert_eq!(board.details[1].table, Section::Failed(gid_missing_message("Day2")));
    }

    #[tokio::test]
    async fn failures_become_messages() {
        let svc = BoardService::new(
            Arc::new(FakeSheets { ranges: HashMap::new(), csv: None }),
            Arc::new(MemoryRepo(None)),
            config(),
        );
        let board = svc.load_board().await;
        assert_eq!(board.summary, Section::Failed(SUMMARY_FAILED.to_string()));
        assert_eq!(board.details[0].table, Section::Failed(detail_failed_message("Day1")));
    }

    #[tokio::test]
    async fn csv_url_switches_summary_source() {
        let cfg = SheetsConfig { csv_url: "https://example.invalid/pub?output=csv".into(), ..config() };
        let svc = BoardService::new(
            Arc::new(FakeSheets { ranges: HashMap::new(), csv: Some(store()) }),
            Arc::new(MemoryRepo(None)),
            cfg,
        );
        let board = svc.load_board().await;
        assert_eq!(board.source, CSV_SOURCE);
        assert_eq!(board.summary.ready().unwrap().len(), 1);
    }
}
