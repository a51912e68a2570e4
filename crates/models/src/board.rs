//! View model for the availability board page.

use serde::Serialize;

use crate::gviz::{pad_grid, Grid};
use crate::range::CellRange;
use crate::reservation::{Day, ReservationStore};
use crate::symbol::{detail_cell_style, status_cell_style, CellStyle, PLACEHOLDER};

/// A board section either carries data or the message shown in its place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Section<T> {
    Ready(T),
    Failed(String),
}

impl<T> Section<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            Self::Failed(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    /// Where the summary came from (`reservations.json` or `Google Sheet (CSV)`).
    pub source: String,
    pub summary: Section<Vec<DaySummary>>,
    pub status: Vec<DayStatus>,
    pub details: Vec<DayDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotSummary {
    pub time: String,
    pub capacity: i64,
    pub reserved: i64,
    pub remaining: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub date: String,
    pub label: String,
    pub slots: Vec<SlotSummary>,
}

impl From<&Day> for DaySummary {
    fn from(day: &Day) -> Self {
        Self {
            date: day.date.clone(),
            label: if day.label.is_empty() { day.date.clone() } else { day.label.clone() },
            slots: day
                .slots
                .iter()
                .map(|s| SlotSummary {
                    time: s.time.clone(),
                    capacity: s.capacity,
                    reserved: s.reserved,
                    remaining: s.remaining(),
                })
                .collect(),
        }
    }
}

pub fn summarize(store: &ReservationStore) -> Vec<DaySummary> {
    store.days.iter().map(DaySummary::from).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyledCell {
    pub text: String,
    pub style: Option<CellStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusRow {
    pub category: String,
    pub cell: StyledCell,
}

/// Condensed per-day availability: one symbol per seating category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayStatus {
    pub title: String,
    pub rows: Vec<StatusRow>,
}

impl DayStatus {
    /// Row `i` takes the first cell of grid row `i`. Missing or blank values
    /// show the placeholder; pass `None` when the fetch failed.
    pub fn from_values(title: &str, categories: &[String], values: Option<&Grid>) -> Self {
        let rows = categories
            .iter()
            .enumerate()
            .map(|(i, category)| {
                let symbol = values
                    .and_then(|g| g.get(i))
                    .and_then(|row| row.first())
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty());
                StatusRow {
                    category: category.clone(),
                    cell: StyledCell {
                        text: symbol.unwrap_or(PLACEHOLDER).to_string(),
                        style: symbol.and_then(status_cell_style),
                    },
                }
            })
            .collect();
        Self { title: title.to_string(), rows }
    }
}

/// Full detail table for one day, exactly the size of the requested range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayDetail {
    pub title: String,
    pub table: Section<Vec<Vec<StyledCell>>>,
}

pub fn styled_table(grid: &Grid, range: &CellRange) -> Vec<Vec<StyledCell>> {
    pad_grid(grid, range.rows(), range.cols())
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|text| {
                    let style = detail_cell_style(&text);
                    StyledCell { text, style }
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation::Slot;

    fn categories() -> Vec<String> {
        ["全体", "地上テーブル", "地上カウンター", "地下テーブル"].map(String::from).to_vec()
    }

    #[test]
    fn status_uses_first_column_and_placeholders() {
        let grid: Grid = vec![vec![" 〇 ".into()], vec!["△".into()], vec!["".into()]];
        let status = DayStatus::from_values("11/21(金)", &categories(), Some(&grid));
        assert_eq!(status.rows.len(), 4);
        assert_eq!(status.rows[0].cell.text, "〇");
        assert_eq!(status.rows[0].cell.style.unwrap().background, "#b9d08b");
        assert_eq!(status.rows[1].cell.style.unwrap().color, "#cc7000");
        assert_eq!(status.rows[2].cell.text, PLACEHOLDER);
        assert_eq!(status.rows[2].cell.style, None);
        assert_eq!(status.rows[3].cell.text, PLACEHOLDER);
    }

    #[test]
    fn failed_status_fetch_is_all_placeholders() {
        let status = DayStatus::from_values("x", &categories(), None);
        assert!(status.rows.iter().all(|r| r.cell.text == PLACEHOLDER && r.cell.style.is_none()));
    }

    #[test]
    fn styled_table_matches_range_size() {
        let range: CellRange = "I2:R19".parse().unwrap();
        let grid: Grid = vec![vec!["✕".into(), "ー".into(), "19:00".into()]];
        let table = styled_table(&grid, &range);
        assert_eq!(table.len(), 18);
        assert!(table.iter().all(|r| r.len() == 10));
        assert_eq!(table[0][0].style.unwrap().background, "#f5b2b2");
        assert_eq!(table[0][1].style.unwrap().color, "inherit");
        assert_eq!(table[0][2].style, None);
    }

    #[test]
    fn summary_reports_remaining_seats() {
        let mut day = Day::new("2025-11-21", "");
        day.slots.push(Slot::new("19:00", 20, 3));
        let s = DaySummary::from(&day);
        assert_eq!(s.label, "2025-11-21");
        assert_eq!(s.slots[0].remaining, 17);
    }
}
