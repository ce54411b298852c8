/// Session storage key the attribution record is kept under
pub const STORAGE_KEY: &str = "ppc_attribution";

/// Query-string keys read from the landing page URL, in record order
pub const RECOGNIZED_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "gclid",
    "fbclid",
    "msclkid",
];

/// Fields whose presence marks a page view as campaign traffic.
/// `utm_term` and `utm_content` never carry a visit on their own.
pub const CAMPAIGN_SIGNAL_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "gclid",
    "fbclid",
    "msclkid",
];

/// Marker used for the source and referrer of non-campaign traffic
pub const DIRECT: &str = "direct";

/// Marker used for medium and campaign of non-campaign traffic
pub const NONE: &str = "none";

/// First line of the CRM note
pub const NOTE_HEADER: &str = "=== CAMPAIGN ATTRIBUTION ===";

/// Base used to resolve origin-relative page URLs such as `/landing?x=1`
pub const RELATIVE_URL_BASE: &str = "http://localhost";

/// Directory name for file-backed session storage
pub const SESSION_DIR_NAME: &str = "utm-attribution";
