//! Chain renderer: turns the ordered event chain into presentational cards.
//!
//! Pure view-model production; the ratatui layer only draws what is built
//! here, so card content is testable without a terminal.

use chrono::NaiveDateTime;

use crate::api::LedgerEvent;

use super::highlight::highlight;

/// Number of hash characters shown before the ellipsis.
const HASH_PREFIX_LEN: usize = 12;

/// Known event kinds, used for accent styling. Anything else renders with
/// neutral styling rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    HarvestCreated,
    SensorReading,
    Transported,
    Other,
}

impl EventKind {
    pub fn from_type(event_type: &str) -> Self {
        match event_type {
            "harvest_created" => EventKind::HarvestCreated,
            "sensor_reading" => EventKind::SensorReading,
            "transported" => EventKind::Transported,
            _ => EventKind::Other,
        }
    }
}

/// Presentational card for one ledger event.
#[derive(Debug, Clone)]
pub struct EventCard {
    pub kind: EventKind,
    /// Uppercased event type.
    pub type_label: String,
    /// Timestamp in fixed 24-hour format (raw value if unparseable).
    pub timestamp: String,
    /// One-line payload highlight (may be empty).
    pub highlight: String,
    /// Full hash values, kept for copy actions.
    pub hash: String,
    pub prev_hash: String,
    /// Fixed-prefix display forms.
    pub hash_short: String,
    pub prev_hash_short: String,
    /// Pretty-printed payload for the collapsed detail panel.
    pub payload_pretty: String,
}

/// Build cards for the whole chain, oldest first. The result fully replaces
/// any previous card list; callers must not append.
pub fn build_cards(events: &[LedgerEvent]) -> Vec<EventCard> {
    events.iter().map(build_card).collect()
}

fn build_card(event: &LedgerEvent) -> EventCard {
    EventCard {
        kind: EventKind::from_type(&event.event_type),
        type_label: event.event_type.to_uppercase(),
        timestamp: format_timestamp(&event.timestamp),
        highlight: highlight(&event.event_type, &event.payload),
        hash: event.hash.clone(),
        prev_hash: event.prev_hash.clone(),
        hash_short: short_hash(&event.hash),
        prev_hash_short: short_hash(&event.prev_hash),
        payload_pretty: serde_json::to_string_pretty(&event.payload)
            .unwrap_or_else(|_| event.payload.to_string()),
    }
}

/// First 12 characters plus an ellipsis; short values pass through.
pub fn short_hash(hash: &str) -> String {
    match hash.char_indices().nth(HASH_PREFIX_LEN) {
        Some((idx, _)) => format!("{}…", &hash[..idx]),
        None => hash.to_string(),
    }
}

/// Render an ISO-8601 timestamp in a fixed 24-hour format. Falls back to the
/// raw string when the value does not parse.
pub fn format_timestamp(raw: &str) -> String {
    let parsed = chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"));

    match parsed {
        Ok(dt) => dt.format("%d/%m/%Y %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}
