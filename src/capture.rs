use chrono::{DateTime, Utc};
use log::debug;

use crate::attribution::AttributionRecord;
use crate::common::{to_iso_timestamp, DIRECT};
use crate::page::PageContext;

/// Capture attribution for the current page view, stamped with the current time.
pub fn capture(page: &PageContext) -> AttributionRecord {
    capture_at(page, Utc::now())
}

/// Capture attribution for a page view, stamped with `now`.
///
/// Reads only the page; recognized query keys that are missing become empty
/// strings and unrecognized keys are ignored.
pub fn capture_at(page: &PageContext, now: DateTime<Utc>) -> AttributionRecord {
    let param = |key: &str| page.query_param(key).unwrap_or_default();

    let record = AttributionRecord {
        utm_source: param("utm_source"),
        utm_medium: param("utm_medium"),
        utm_campaign: param("utm_campaign"),
        utm_term: param("utm_term"),
        utm_content: param("utm_content"),
        gclid: param("gclid"),
        fbclid: param("fbclid"),
        msclkid: param("msclkid"),
        landing_page: page.path().to_string(),
        landing_page_full: page.href().to_string(),
        referrer: current_referrer(page),
        first_visit: to_iso_timestamp(now),
    };

    debug!(
        "Captured attribution on '{}': source='{}' medium='{}' campaign='{}'",
        record.landing_page, record.utm_source, record.utm_medium, record.utm_campaign
    );
    record
}

/// The page referrer, or `"direct"` when there is none.
pub(crate) fn current_referrer(page: &PageContext) -> String {
    page.referrer().unwrap_or(DIRECT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::parse_iso_timestamp;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_capture_full_campaign() {
        let page = PageContext::new(
            "https://example.com/landing?utm_source=google&utm_medium=cpc&utm_campaign=spring&utm_term=shoes&utm_content=ad_b&gclid=abc123",
            Some("https://www.google.com/"),
        );
        let record = capture_at(&page, fixed_time());

        assert_eq!(record.utm_source, "google");
        assert_eq!(record.utm_medium, "cpc");
        assert_eq!(record.utm_campaign, "spring");
        assert_eq!(record.utm_term, "shoes");
        assert_eq!(record.utm_content, "ad_b");
        assert_eq!(record.gclid, "abc123");
        assert_eq!(record.fbclid, "");
        assert_eq!(record.msclkid, "");
        assert_eq!(record.landing_page, "/landing");
        assert_eq!(record.landing_page_full, "https://example.com/landing");
        assert_eq!(record.referrer, "https://www.google.com/");
        assert_eq!(record.first_visit, "2024-04-01T12:30:00.000Z");
    }

    #[test]
    fn test_capture_ignores_unrecognized_keys() {
        let page = PageContext::new("/blog?ref=newsletter&page=2&UTM_SOURCE=x", None);
        let record = capture_at(&page, fixed_time());

        for (name, value) in record.form_fields().into_iter().take(8) {
            assert_eq!(value, "", "{} should be empty", name);
        }
        assert!(!record.has_campaign_signal());
        assert_eq!(record.landing_page, "/blog");
    }

    #[test]
    fn test_capture_without_referrer_is_direct() {
        let page = PageContext::new("/", None);
        assert_eq!(capture_at(&page, fixed_time()).referrer, "direct");
    }

    #[test]
    fn test_capture_keeps_conflicting_click_ids() {
        let page = PageContext::new("/?gclid=g1&fbclid=f1&msclkid=m1", None);
        let record = capture_at(&page, fixed_time());
        assert_eq!(record.gclid, "g1");
        assert_eq!(record.fbclid, "f1");
        assert_eq!(record.msclkid, "m1");
    }

    #[test]
    fn test_capture_twice_differs_only_in_first_visit() {
        let page = PageContext::new("/?utm_source=bing", Some("https://bing.com/"));
        let first = capture_at(&page, fixed_time());
        let second = capture_at(&page, fixed_time() + chrono::Duration::seconds(5));

        assert_ne!(first.first_visit, second.first_visit);
        assert_eq!(
            AttributionRecord {
                first_visit: String::new(),
                ..first
            },
            AttributionRecord {
                first_visit: String::new(),
                ..second
            }
        );
    }

    #[test]
    fn test_capture_uses_iso_timestamp() {
        let record = capture(&PageContext::new("/", None));
        assert!(parse_iso_timestamp(&record.first_visit).is_some());
    }
}
