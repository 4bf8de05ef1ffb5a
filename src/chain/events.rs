//! Decoding of transaction event logs into keyed attribute maps.

use super::types::Event;
use std::collections::HashMap;

/// Fold an ordered sequence of events into a map from event type to a map
/// from attribute key to attribute value.
///
/// The fold runs in input order and later entries win: within a single
/// event's attribute list the last occurrence of a key survives, and when
/// the same event type appears more than once, the later event's attributes
/// override the earlier event's for overlapping keys. Attribute values pass
/// through untouched; no numeric coercion happens here.
pub fn decode_event_attributes(events: &[Event]) -> HashMap<String, HashMap<String, String>> {
    let mut decoded: HashMap<String, HashMap<String, String>> = HashMap::new();

    for event in events {
        let attributes = decoded.entry(event.event_type.clone()).or_default();
        for attribute in &event.attributes {
            attributes.insert(attribute.key.clone(), attribute.value.clone());
        }
    }

    decoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::types::Attribute;

    fn event(event_type: &str, attributes: &[(&str, &str)]) -> Event {
        Event {
            event_type: event_type.to_string(),
            attributes: attributes
                .iter()
                .map(|(key, value)| Attribute {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_empty_log_decodes_to_empty_map() {
        assert!(decode_event_attributes(&[]).is_empty());
    }

    #[test]
    fn test_distinct_event_types_keep_their_attributes() {
        let events = vec![
            event("wasm", &[("action", "execute_trigger"), ("vault_id", "12")]),
            event("transfer", &[("amount", "1000ukuji")]),
        ];

        let decoded = decode_event_attributes(&events);

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded["wasm"]["action"], "execute_trigger");
        assert_eq!(decoded["wasm"]["vault_id"], "12");
        assert_eq!(decoded["transfer"]["amount"], "1000ukuji");
    }

    #[test]
    fn test_duplicate_key_within_one_event_last_wins() {
        let events = vec![event("wasm", &[("x", "1"), ("x", "2")])];

        let decoded = decode_event_attributes(&events);

        assert_eq!(decoded["wasm"].len(), 1);
        assert_eq!(decoded["wasm"]["x"], "2");
    }

    #[test]
    fn test_repeated_event_type_later_event_wins() {
        let events = vec![event("a", &[("x", "1")]), event("a", &[("x", "2")])];

        let decoded = decode_event_attributes(&events);

        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded["a"].len(), 1);
        assert_eq!(decoded["a"]["x"], "2");
    }

    #[test]
    fn test_repeated_event_type_merges_disjoint_keys() {
        let events = vec![event("a", &[("x", "1")]), event("a", &[("y", "2")])];

        let decoded = decode_event_attributes(&events);

        assert_eq!(decoded["a"].len(), 2);
        assert_eq!(decoded["a"]["x"], "1");
        assert_eq!(decoded["a"]["y"], "2");
    }

    #[test]
    fn test_decodes_events_deserialized_from_tx_log_json() {
        // Same shape the LCD returns under tx_response.logs[0].events.
        let raw = serde_json::json!([
            {
                "type": "wasm",
                "attributes": [
                    {"key": "action", "value": "execute_trigger"},
                    {"key": "vault_id", "value": "12"}
                ]
            }
        ]);

        let events: Vec<Event> = serde_json::from_value(raw).unwrap();
        let decoded = decode_event_attributes(&events);

        assert_eq!(decoded["wasm"]["action"], "execute_trigger");
        assert_eq!(decoded["wasm"]["vault_id"], "12");
    }

    #[test]
    fn test_values_are_opaque_strings() {
        let events = vec![event("wasm", &[("amount", "00123"), ("flag", "")])];

        let decoded = decode_event_attributes(&events);

        assert_eq!(decoded["wasm"]["amount"], "00123");
        assert_eq!(decoded["wasm"]["flag"], "");
    }
}
