//! Published-sheet CSV export → reservation store.
//!
//! Expected header row: `date,label,time,capacity,reserved` (capitalized
//! names are accepted too). Fields are split on bare commas; quoted commas
//! and escaped quotes are not supported.

use std::collections::HashMap;

use crate::number::{parse_number, to_count};
use crate::reservation::{Day, ReservationStore, Slot};

/// Time shown for rows that leave the `time` column blank.
pub const UNSET_TIME: &str = "未設定";

/// Split one CSV line on commas, trimming each field and stripping one pair
/// of surrounding double quotes.
pub fn split_csv_line(line: &str) -> Vec<String> {
    line.split(',')
        .map(|field| {
            let field = field.trim();
            match field.strip_prefix('"').and_then(|f| f.strip_suffix('"')) {
                Some(inner) => inner.to_string(),
                None => field.to_string(),
            }
        })
        .collect()
}

fn field<'a>(row: &'a HashMap<String, String>, names: [&str; 2]) -> Option<&'a str> {
    names
        .iter()
        .filter_map(|n| row.get(*n))
        .map(String::as_str)
        .find(|v| !v.is_empty())
}

fn count(row: &HashMap<String, String>, names: [&str; 2]) -> i64 {
    field(row, names).and_then(parse_number).map(to_count).unwrap_or(0)
}

/// Parse the CSV text into days grouped by date, sorted by date.
pub fn parse_sheet_csv(text: &str) -> ReservationStore {
    let lines: Vec<&str> = text
        .trim()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < 2 {
        return ReservationStore::default();
    }

    let headers = split_csv_line(lines[0]);
    let mut days: Vec<Day> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for line in &lines[1..] {
        let row: HashMap<String, String> = split_csv_line(line)
            .into_iter()
            .enumerate()
            .map(|(i, value)| {
                let key = headers
                    .get(i)
                    .filter(|h| !h.is_empty())
                    .cloned()
                    .unwrap_or_else(|| format!("col{i}"));
                (key, value)
            })
            .collect();

        let date = field(&row, ["date", "Date"]).unwrap_or_default().to_string();
        let label = field(&row, ["label", "Label"]).unwrap_or(date.as_str()).to_string();
        let time = field(&row, ["time", "Time"]).unwrap_or(UNSET_TIME);
        let slot = Slot::new(time, count(&row, ["capacity", "Capacity"]), count(&row, ["reserved", "Reserved"]));

        let idx = *index.entry(date.clone()).or_insert_with(|| {
            days.push(Day::new(date.clone(), label));
            days.len() - 1
        });
        days[idx].slots.push(slot);
    }

    days.sort_by(|a, b| a.date.cmp(&b.date));
    ReservationStore { days, ..Default::default() }
}
