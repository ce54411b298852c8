use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Campaign attribution captured from a single page view.
///
/// Every field is a plain string. An empty string means the value was not
/// present, except `referrer`, which holds `"direct"` for visits without one.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionRecord {
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
    pub utm_term: String,
    pub utm_content: String,
    /// Google Ads click ID
    pub gclid: String,
    /// Meta (Facebook) click ID
    pub fbclid: String,
    /// Microsoft Advertising click ID
    pub msclkid: String,
    pub landing_page: String,
    #[serde(default)]
    pub landing_page_full: String,
    pub referrer: String,
    pub first_visit: String,
}

impl AttributionRecord {
    /// True when at least one UTM source/medium/campaign or click ID is set.
    ///
    /// `utm_term` and `utm_content` are refinements of a campaign and do not
    /// count on their own.
    pub fn has_campaign_signal(&self) -> bool {
        [
            &self.utm_source,
            &self.utm_medium,
            &self.utm_campaign,
            &self.gclid,
            &self.fbclid,
            &self.msclkid,
        ]
        .iter()
        .any(|value| !value.is_empty())
    }

    /// Record as `(field, value)` pairs for hidden form inputs, in the
    /// order the fields are declared.
    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("utm_source", self.utm_source.as_str()),
            ("utm_medium", self.utm_medium.as_str()),
            ("utm_campaign", self.utm_campaign.as_str()),
            ("utm_term", self.utm_term.as_str()),
            ("utm_content", self.utm_content.as_str()),
            ("gclid", self.gclid.as_str()),
            ("fbclid", self.fbclid.as_str()),
            ("msclkid", self.msclkid.as_str()),
            ("landing_page", self.landing_page.as_str()),
            ("landing_page_full", self.landing_page_full.as_str()),
            ("referrer", self.referrer.as_str()),
            ("first_visit", self.first_visit.as_str()),
        ]
    }

    /// Encode the form fields as an `application/x-www-form-urlencoded` body.
    pub fn to_form_urlencoded(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.form_fields())
            .finish()
    }
}
