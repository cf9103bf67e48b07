//! Payload highlighter: one-line human-readable summary of an event payload.

use serde_json::Value;

/// Separator between highlight fragments.
const SEP: &str = " • ";

/// Build a short highlight string from an event's free-form payload.
///
/// Scans a fixed, ordered set of optional fields and joins whichever are
/// present. Absent or null fields are skipped silently; unknown payload
/// shapes yield an empty string. `farm_name` is only shown on the genesis
/// `harvest_created` event, where it is the interesting datum.
pub fn highlight(event_type: &str, payload: &Value) -> String {
    let mut items: Vec<String> = Vec::new();

    if let Some(v) = scalar(payload.get("temperature_c")) {
        items.push(format!("Temp {v}°C"));
    }
    if let Some(v) = scalar(payload.get("humidity_pct")) {
        items.push(format!("RH {v}%"));
    }
    if let Some(v) = scalar(payload.get("ph")) {
        items.push(format!("pH {v}"));
    }
    if let Some(v) = text(payload.get("location")) {
        items.push(format!("📍 {v}"));
    }
    if event_type == "harvest_created" {
        if let Some(v) = text(payload.get("farm_name")) {
            items.push(v.to_string());
        }
    }

    items.join(SEP)
}

/// Render a numeric or string scalar, skipping null/absent values.
fn scalar(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

/// Non-empty strings only.
fn text(value: Option<&Value>) -> Option<&str> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn location_only_has_no_separators() {
        let payload = json!({"location": "Bangkok"});
        assert_eq!(highlight("transported", &payload), "📍 Bangkok");
    }

    #[test]
    fn empty_payload_yields_empty_string() {
        assert_eq!(highlight("sensor_reading", &json!({})), "");
    }

    #[test]
    fn non_object_payload_yields_empty_string() {
        assert_eq!(highlight("sensor_reading", &json!(42)), "");
        assert_eq!(highlight("sensor_reading", &Value::Null), "");
    }

    #[test]
    fn fields_join_in_fixed_order() {
        let payload = json!({
            "location": "Cold Room #1",
            "ph": 6.5,
            "humidity_pct": 90,
            "temperature_c": 12.5,
        });
        assert_eq!(
            highlight("sensor_reading", &payload),
            "Temp 12.5°C • RH 90% • pH 6.5 • 📍 Cold Room #1"
        );
    }

    #[test]
    fn farm_name_only_on_harvest_created() {
        let payload = json!({"farm_name": "Baan Mae Rim Farm"});
        assert_eq!(highlight("harvest_created", &payload), "Baan Mae Rim Farm");
        assert_eq!(highlight("sensor_reading", &payload), "");
    }

    #[test]
    fn null_fields_are_skipped() {
        let payload = json!({"temperature_c": null, "ph": 6.6});
        assert_eq!(highlight("sensor_reading", &payload), "pH 6.6");
    }

    #[test]
    fn empty_location_is_skipped() {
        let payload = json!({"location": "", "temperature_c": 10.5});
        assert_eq!(highlight("transported", &payload), "Temp 10.5°C");
    }

    #[test]
    fn payload_is_not_mutated() {
        let payload = json!({"location": "Bangkok"});
        let before = payload.clone();
        let _ = highlight("transported", &payload);
        assert_eq!(payload, before);
    }
}
