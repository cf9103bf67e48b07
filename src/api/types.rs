//! Response types matching the TraceChain backend API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry in a lot's hash-linked event chain.
///
/// Immutable once received; `hash`/`prev_hash` are opaque server-computed
/// values and are never recomputed or checked client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub timestamp: String,
    /// Open mapping of optional fields (temperature_c, humidity_pct, ph,
    /// location, farm_name, ...). Interpreted by the payload highlighter.
    #[serde(default)]
    pub payload: Value,
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub prev_hash: String,
}

/// Aggregate returned by `GET /api/lots/{lot_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotSummary {
    pub lot_id: String,
    #[serde(default)]
    pub farm_name: String,
    #[serde(default)]
    pub crop: String,
    #[serde(default)]
    pub harvest_date: String,
    #[serde(default)]
    pub total_events: u64,
    /// Server-computed integrity flag. Deserialized as an option so a missing
    /// or malformed value degrades to the tampered badge instead of a parse
    /// failure.
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub quality_score: Option<f64>,
    #[serde(default)]
    pub spoilage_risk: Option<String>,
    #[serde(default)]
    pub latest_temperature_c: Option<f64>,
    #[serde(default)]
    pub latest_humidity_pct: Option<f64>,
    #[serde(default)]
    pub latest_ph: Option<f64>,
    /// Ordered oldest-first; render order follows array order.
    #[serde(default)]
    pub chain: Vec<LedgerEvent>,
}

/// Row of the paginated listing (`GET /api/lots`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LotListItem {
    pub lot_id: String,
    #[serde(default)]
    pub farm_name: String,
    #[serde(default)]
    pub crop: String,
    #[serde(default)]
    pub harvest_date: String,
    #[serde(default)]
    pub total_events: u64,
    #[serde(default)]
    pub verified: Option<bool>,
}

/// Envelope for the paginated listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LotListPage {
    #[serde(default)]
    pub items: Vec<LotListItem>,
}

/// Response from `GET /api/seed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedOutcome {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub lot_id: Option<String>,
}

/// Binary QR image fetched for a lot. Not a wire type; assembled by the
/// client from the response headers and body.
#[derive(Debug, Clone)]
pub struct QrImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lot_summary_tolerates_missing_optionals() {
        let summary: LotSummary = serde_json::from_str(
            r#"{"lot_id": "LOT-007", "farm_name": "Green Farm", "crop": "Mango",
                "harvest_date": "2024-01-01", "total_events": 0, "chain": []}"#,
        )
        .unwrap();

        assert_eq!(summary.lot_id, "LOT-007");
        assert_eq!(summary.verified, None);
        assert_eq!(summary.quality_score, None);
        assert_eq!(summary.latest_ph, None);
        assert!(summary.chain.is_empty());
    }

    #[test]
    fn ledger_event_keeps_open_payload() {
        let ev: LedgerEvent = serde_json::from_str(
            r#"{"type": "sensor_reading", "timestamp": "2025-08-15T04:00:00",
                "payload": {"temperature_c": 12.5, "unknown_field": true},
                "hash": "abc", "prev_hash": "GENESIS"}"#,
        )
        .unwrap();

        assert_eq!(ev.event_type, "sensor_reading");
        assert_eq!(ev.payload["unknown_field"], serde_json::json!(true));
    }

    #[test]
    fn list_page_defaults_to_empty() {
        let page: LotListPage = serde_json::from_str("{}").unwrap();
        assert!(page.items.is_empty());
    }
}
