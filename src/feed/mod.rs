//! Typed models of the JMA JSON feeds.

pub mod area;
pub mod element;
pub mod forecast;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub use area::{AreaCatalog, AreaPath};
pub use element::Element;
pub use forecast::{AreaSeries, Forecast, Report};

/// Placeholder the feeds use for a missing name or code.
pub const UNKNOWN: &str = "不明";

pub(crate) fn unknown() -> String {
    UNKNOWN.to_string()
}

// JMA sends strings, but a stray number or null must not fail the whole feed.
fn lenient_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

pub(crate) fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values.into_iter().map(lenient_value).collect())
}

pub(crate) fn lenient_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(lenient_value))
}
