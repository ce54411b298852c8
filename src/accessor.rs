use chrono::{DateTime, Utc};
use log::debug;
use serde_json::{Map, Value};

use crate::attribution::AttributionRecord;
use crate::capture::current_referrer;
use crate::common::{to_iso_timestamp, DIRECT, NONE};
use crate::page::PageContext;

/// Record returned when nothing usable is stored: plain direct traffic on
/// the current page.
pub fn direct_default(page: &PageContext, now: DateTime<Utc>) -> AttributionRecord {
    AttributionRecord {
        utm_source: DIRECT.to_string(),
        utm_medium: NONE.to_string(),
        utm_campaign: NONE.to_string(),
        landing_page: page.path().to_string(),
        landing_page_full: page.href().to_string(),
        referrer: current_referrer(page),
        first_visit: to_iso_timestamp(now),
        ..Default::default()
    }
}

/// Turn raw stored content into the record handed to form submission.
///
/// Missing, empty or unparseable content yields [`direct_default`]. A stored
/// JSON object has every field defaulted on its own when missing or falsy.
/// Valid JSON that is not an object (`42`, `"text"`, `[1,2]`) counts as
/// unparseable, so it also gets the full default with `first_visit` = now.
pub fn resolve_record(
    stored: Option<&str>,
    page: &PageContext,
    now: DateTime<Utc>,
) -> AttributionRecord {
    let data = match stored.filter(|s| !s.is_empty()).map(parse_stored) {
        Some(Some(data)) => data,
        Some(None) => {
            debug!("Stored attribution is not a JSON object, using direct default");
            return direct_default(page, now);
        }
        None => return direct_default(page, now),
    };

    let field = |key: &str| truthy_string(data.get(key));

    AttributionRecord {
        utm_source: field("utm_source").unwrap_or_else(|| DIRECT.to_string()),
        utm_medium: field("utm_medium").unwrap_or_else(|| NONE.to_string()),
        utm_campaign: field("utm_campaign").unwrap_or_else(|| NONE.to_string()),
        utm_term: field("utm_term").unwrap_or_default(),
        utm_content: field("utm_content").unwrap_or_default(),
        gclid: field("gclid").unwrap_or_default(),
        fbclid: field("fbclid").unwrap_or_default(),
        msclkid: field("msclkid").unwrap_or_default(),
        landing_page: field("landing_page").unwrap_or_else(|| page.path().to_string()),
        landing_page_full: field("landing_page_full").unwrap_or_default(),
        referrer: field("referrer").unwrap_or_else(|| DIRECT.to_string()),
        first_visit: field("first_visit").unwrap_or_default(),
    }
}

fn parse_stored(raw: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Text of a truthy scalar. `null`, `false`, `0` and `""` count as missing,
/// and so do arrays and objects, which have no sensible text form.
fn truthy_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().map_or(true, |f| f != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}
