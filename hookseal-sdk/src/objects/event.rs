//! Typed webhook event built from a decoded payload.

use serde::{Serialize, Serializer, de::DeserializeOwned};
use serde_json::{Map, Value};
use time::OffsetDateTime;

/// A webhook event.
///
/// Well-known top-level fields are lifted out when they carry the expected
/// JSON type. The complete decoded object is kept alongside them, so fields
/// this crate knows nothing about stay reachable through [`get`](Self::get)
/// and [`raw`](Self::raw).
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    id: Option<String>,
    object: Option<String>,
    event_type: Option<String>,
    created: Option<i64>,
    livemode: Option<bool>,
    api_version: Option<String>,
    values: Map<String, Value>,
}

impl Event {
    /// Build an event from a decoded JSON object.
    ///
    /// Never fails: a well-known field that is missing or has an unexpected
    /// type is simply left unset.
    pub fn construct_from(values: Map<String, Value>) -> Self {
        let string_field = |key: &str| values.get(key).and_then(Value::as_str).map(str::to_owned);

        Self {
            id: string_field("id"),
            object: string_field("object"),
            event_type: string_field("type"),
            created: values.get("created").and_then(Value::as_i64),
            livemode: values.get("livemode").and_then(Value::as_bool),
            api_version: string_field("api_version"),
            values,
        }
    }

    /// Unique event identifier (e.g. `evt_...`).
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Object kind, normally `"event"`.
    pub fn object(&self) -> Option<&str> {
        self.object.as_deref()
    }

    /// Event type (e.g. `"charge.succeeded"`).
    pub fn event_type(&self) -> Option<&str> {
        self.event_type.as_deref()
    }

    /// Raw `created` unix timestamp in seconds.
    pub fn created(&self) -> Option<i64> {
        self.created
    }

    /// `created` as a UTC date-time, if present and in range.
    pub fn created_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.created?).ok()
    }

    pub fn livemode(&self) -> Option<bool> {
        self.livemode
    }

    pub fn api_version(&self) -> Option<&str> {
        self.api_version.as_deref()
    }

    /// The `data` member of the event, if any.
    pub fn data(&self) -> Option<&Value> {
        self.values.get("data")
    }

    /// Look up a value by dot-separated path, e.g. `"data.object.id"`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut parts = path.split('.');
        let mut current = self.values.get(parts.next()?)?;
        for part in parts {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// Look up a string value by dot-separated path.
    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path)?.as_str()
    }

    /// Decode `data.object` into a caller-defined type.
    ///
    /// Returns `Ok(None)` when the event has no `data.object`.
    pub fn data_object<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
        self.get("data.object").map(T::deserialize).transpose()
    }

    /// The complete decoded payload object.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn into_raw(self) -> Map<String, Value> {
        self.values
    }
}

impl Serialize for Event {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.values.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn sample() -> Event {
        Event::construct_from(object(json!({
            "id": "evt_1",
            "object": "event",
            "type": "charge.succeeded",
            "created": 1_700_000_000,
            "livemode": false,
            "api_version": "2017-05-25",
            "data": {
                "object": {
                    "id": "ch_1",
                    "amount": 2000,
                    "currency": "usd"
                }
            },
            "request": "req_1"
        })))
    }

    #[test]
    fn test_construct_lifts_known_fields() {
        let event = sample();
        assert_eq!(event.id(), Some("evt_1"));
        assert_eq!(event.object(), Some("event"));
        assert_eq!(event.event_type(), Some("charge.succeeded"));
        assert_eq!(event.created(), Some(1_700_000_000));
        assert_eq!(event.livemode(), Some(false));
        assert_eq!(event.api_version(), Some("2017-05-25"));
        assert_eq!(event.get_str("request"), Some("req_1"));
    }

    #[test]
    fn test_construct_tolerates_unexpected_types() {
        let event = Event::construct_from(object(json!({
            "id": 42,
            "created": "yesterday",
            "livemode": "no"
        })));
        assert_eq!(event.id(), None);
        assert_eq!(event.created(), None);
        assert_eq!(event.created_at(), None);
        assert_eq!(event.livemode(), None);
        assert_eq!(event.get("id"), Some(&json!(42)));
    }

    #[test]
    fn test_construct_from_empty_object() {
        let event = Event::construct_from(Map::new());
        assert_eq!(event.id(), None);
        assert!(event.data().is_none());
        assert!(event.raw().is_empty());
    }

    #[test]
    fn test_created_at() {
        let created_at = sample().created_at().unwrap();
        assert_eq!(created_at.unix_timestamp(), 1_700_000_000);
        assert_eq!(created_at.year(), 2023);
    }

    #[test]
    fn test_get_nested_path() {
        let event = sample();
        assert_eq!(event.get_str("data.object.id"), Some("ch_1"));
        assert_eq!(event.get("data.object.amount"), Some(&json!(2000)));
        assert!(event.get("data.object.missing").is_none());
        assert!(event.get("id.nested").is_none());
    }

    #[test]
    fn test_data_object_typed() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Charge {
            id: String,
            amount: u64,
            currency: String,
        }

        let charge: Charge = sample().data_object().unwrap().unwrap();
        assert_eq!(
            charge,
            Charge {
                id: "ch_1".to_string(),
                amount: 2000,
                currency: "usd".to_string(),
            }
        );

        let empty = Event::construct_from(Map::new());
        assert!(empty.data_object::<Charge>().unwrap().is_none());

        let mismatched = Event::construct_from(object(json!({"data": {"object": {"id": 1}}})));
        assert!(mismatched.data_object::<Charge>().is_err());
    }

    #[test]
    fn test_serialize_preserves_payload() {
        let event = sample();
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(Value::Object(event.into_raw()), value);
    }
}
