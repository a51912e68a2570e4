//! Reservation store document: days, their time slots and seat counts.
//!
//! The typed structs are a read model for the board. Webhook bookings are
//! merged into the raw JSON document instead, so slots a booking does not
//! touch are written back exactly as they were stored.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Number, Value};

use crate::errors::ModelError;
use crate::number::{display_value, is_truthy, nonzero_number, to_count, value_number};

/// Seats booked by a webhook call that does not say how many.
pub const DEFAULT_SEATS: i64 = 1;
/// Capacity given to a slot the webhook creates on the fly.
pub const DEFAULT_CAPACITY: i64 = 999;

/// Whole reservation file: `{ "days": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReservationStore {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub days: Vec<Day>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One calendar date and its time slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Day {
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub slots: Vec<Slot>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single time-of-day bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default, deserialize_with = "lenient_text")]
    pub time: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub capacity: i64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub reserved: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(display_value(&Value::deserialize(d)?))
}

fn lenient_count<'de, D: Deserializer<'de>>(d: D) -> Result<i64, D::Error> {
    let v = Value::deserialize(d)?;
    Ok(value_number(&v).map(to_count).unwrap_or(0))
}

fn null_as_empty<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
}

impl Day {
    pub fn new(date: impl Into<String>, label: impl Into<String>) -> Self {
        Self { date: date.into(), label: label.into(), ..Default::default() }
    }
}

impl Slot {
    pub fn new(time: impl Into<String>, capacity: i64, reserved: i64) -> Self {
        Self { time: time.into(), capacity, reserved, extra: Map::new() }
    }

    /// Seats still open; never negative.
    pub fn remaining(&self) -> i64 {
        (self.capacity - self.reserved).max(0)
    }
}

/// Incremental booking pushed by the webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookUpdate {
    pub date: String,
    pub time: String,
    pub seats: i64,
    pub capacity: i64,
}

/// What a webhook update did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Existing slots matched and were incremented.
    Incremented { slots: usize },
    /// Nothing matched; a slot was appended, to a fresh day when `created_day`.
    Appended { created_day: bool },
}

impl WebhookUpdate {
    /// Read `{date, time, seats?, capacity?}`. `date` and `time` must be set;
    /// missing or zero counts fall back to the defaults.
    pub fn from_json(body: &Value) -> Result<Self, ModelError> {
        let obj = body.as_object().ok_or(ModelError::InvalidBody)?;
        let required = |key: &str| -> Result<String, ModelError> {
            match obj.get(key) {
                Some(v @ (Value::String(_) | Value::Number(_))) if is_truthy(v) => Ok(display_value(v)),
                _ => Err(ModelError::InvalidBody),
            }
        };
        let date = required("date")?;
        let time = required("time")?;
        let seats = nonzero_number(obj.get("seats")).map(to_count).unwrap_or(DEFAULT_SEATS);
        let capacity = nonzero_number(obj.get("capacity")).map(to_count).unwrap_or(DEFAULT_CAPACITY);
        Ok(Self { date, time, seats, capacity })
    }
}

/// Text keys (`date`, `time`) compare by their displayed form, so `19` and
/// `"19"` match.
fn key_matches(v: Option<&Value>, key: &str) -> bool {
    matches!(v, Some(v @ (Value::String(_) | Value::Number(_))) if display_value(v) == key)
}

/// A capacity only bounds the count when it is actually a number.
fn capacity_limit(v: Option<&Value>) -> Option<f64> {
    match v? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if !s.trim().is_empty() => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn count_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        json!(n as i64)
    } else {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

/// Add (or with a negative count, release) seats on one stored slot. The
/// count never drops below zero and never exceeds a numeric capacity.
fn book_slot(slot: &mut Map<String, Value>, seats: i64) {
    let current = slot.get("reserved").and_then(value_number).unwrap_or(0.0);
    let mut reserved = (current + seats as f64).max(0.0);
    if let Some(cap) = capacity_limit(slot.get("capacity")) {
        reserved = reserved.min(cap.max(0.0));
    }
    slot.insert("reserved".to_string(), count_value(reserved));
}

/// `null` or missing lists read as empty; any other non-list is malformed.
fn list_mut<'a>(
    obj: &'a mut Map<String, Value>,
    key: &str,
    what: &'static str,
) -> Result<&'a mut Vec<Value>, ModelError> {
    let entry = obj.entry(key.to_string()).or_insert(Value::Null);
    if entry.is_null() {
        *entry = Value::Array(Vec::new());
    }
    entry.as_array_mut().ok_or(ModelError::MalformedStore(what))
}

/// Merge a webhook booking into the stored JSON document. Every slot
/// matching both `date` and `time` is incremented; when none matches, a slot
/// is appended to the day, creating the day first if needed. Nothing else in
/// the document is rewritten.
pub fn apply_webhook(doc: &mut Value, update: &WebhookUpdate) -> Result<WebhookOutcome, ModelError> {
    let root = doc.as_object_mut().ok_or(ModelError::MalformedStore("document is not an object"))?;
    let days = list_mut(root, "days", "days is not a list")?;

    let mut matched = 0;
    for day in days.iter_mut().filter_map(Value::as_object_mut) {
        if !key_matches(day.get("date"), &update.date) {
            continue;
        }
        let Some(slots) = day.get_mut("slots").and_then(Value::as_array_mut) else {
            continue;
        };
        for slot in slots.iter_mut().filter_map(Value::as_object_mut) {
            if key_matches(slot.get("time"), &update.time) {
                book_slot(slot, update.seats);
                matched += 1;
            }
        }
    }
    if matched > 0 {
        return Ok(WebhookOutcome::Incremented { slots: matched });
    }

    let existing = days
        .iter()
        .position(|d| d.as_object().is_some_and(|d| key_matches(d.get("date"), &update.date)));
    let (idx, created_day) = match existing {
        Some(i) => (i, false),
        None => {
            days.push(json!({"date": update.date, "label": update.date, "slots": []}));
            (days.len() - 1, true)
        }
    };
    let day = days[idx]
        .as_object_mut()
        .ok_or(ModelError::MalformedStore("day is not an object"))?;
    let slots = list_mut(day, "slots", "slots is not a list")?;
    let reserved = update.seats.clamp(0, update.capacity.max(0));
    slots.push(json!({"time": update.time, "capacity": update.capacity, "reserved": reserved}));
    Ok(WebhookOutcome::Appended { created_day })
}

/// Admin overwrites replace the file wholesale; the only requirement is an
/// object with a `days` entry. Inner shapes are not checked.
pub fn validate_overwrite(payload: &Value) -> Result<(), ModelError> {
    let obj = payload.as_object().ok_or(ModelError::InvalidPayload)?;
    match obj.get("days") {
        Some(days) if is_truthy(days) => Ok(()),
        _ => Err(ModelError::MissingDays),
    }
}
