use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One event as delivered by the host feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(default, deserialize_with = "string_or_null")]
    pub event_name: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub start_date_time: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub end_date_time: DateTime<Utc>,
    #[serde(default, deserialize_with = "string_or_null")]
    pub venue_name: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub venue_location: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub slug: String,
    /// Accent colour as a hex string. Absent means the board default applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Flyer image URLs, first one is the cover.
    #[serde(default, deserialize_with = "list_or_null")]
    pub host_flyer: Vec<String>,
}

impl EventRecord {
    pub fn cover_image(&self) -> Option<&str> {
        self.host_flyer.first().map(String::as_str)
    }

    /// Accent colour with blank strings treated as unset.
    pub fn accent(&self) -> Option<&str> {
        self.color.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}

/// Top-level feed response: `{ success, data: { upcomingEvents, pastEvents } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedPayload {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<FeedData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedData {
    #[serde(default, deserialize_with = "lenient_records")]
    pub upcoming_events: Option<Vec<EventRecord>>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub past_events: Option<Vec<EventRecord>>,
}

/// Decodes each record on its own. A record that fails (an unparsable date,
/// a missing timestamp) is logged and dropped so the rest of the feed still
/// renders.
fn lenient_records<'de, D>(deserializer: D) -> Result<Option<Vec<EventRecord>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<Vec<serde_json::Value>>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let records = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<EventRecord>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index, "Skipping malformed event record: {}", e);
                None
            }
        })
        .collect();

    Ok(Some(records))
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn list_or_null<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parses a feed timestamp. Strings with an offset are taken as-is, strings
/// without one are read as local wall-clock time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS.iter().find_map(|fmt| {
        let naive = NaiveDateTime::parse_from_str(raw, fmt).ok()?;
        Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
    })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrMillis {
        String(String),
        Millis(i64),
    }

    match StringOrMillis::deserialize(deserializer)? {
        StringOrMillis::String(s) => parse_timestamp(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s))),
        StringOrMillis::Millis(ms) => DateTime::from_timestamp_millis(ms)
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {}", ms))),
    }
}
