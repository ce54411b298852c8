use crate::attribution::AttributionRecord;
use crate::common::NOTE_HEADER;

/// Render a record as the plain-text block pasted into CRM notes.
///
/// Source, medium, campaign, landing page and referrer always appear; the
/// keyword, ad variation and click ID lines only when set. Lines keep the
/// same relative order either way.
pub fn format_attribution_note(record: &AttributionRecord) -> String {
    let mut lines = Vec::with_capacity(11);

    lines.push(NOTE_HEADER.to_string());
    lines.push(format!("Source: {}", record.utm_source));
    lines.push(format!("Medium: {}", record.utm_medium));
    lines.push(format!("Campaign: {}", record.utm_campaign));

    let optional = [
        ("Keyword", &record.utm_term),
        ("Ad Variation", &record.utm_content),
        ("Google Click ID", &record.gclid),
        ("Facebook Click ID", &record.fbclid),
        ("Microsoft Click ID", &record.msclkid),
    ];
    for (label, value) in optional {
        if !value.is_empty() {
            lines.push(format!("{}: {}", label, value));
        }
    }

    lines.push(format!("Landing Page: {}", record.landing_page));
    lines.push(format!("Referrer: {}", record.referrer));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn direct_record() -> AttributionRecord {
        AttributionRecord {
            utm_source: "direct".to_string(),
            utm_medium: "none".to_string(),
            utm_campaign: "none".to_string(),
            landing_page: "/".to_string(),
            referrer: "direct".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_note_direct_visit() {
        let note = format_attribution_note(&direct_record());
        assert_eq!(
            note,
            "=== CAMPAIGN ATTRIBUTION ===\n\
             Source: direct\n\
             Medium: none\n\
             Campaign: none\n\
             Landing Page: /\n\
             Referrer: direct"
        );
    }

    #[test]
    fn test_note_all_optional_lines() {
        let record = AttributionRecord {
            utm_source: "google".to_string(),
            utm_medium: "cpc".to_string(),
            utm_campaign: "spring".to_string(),
            utm_term: "red shoes".to_string(),
            utm_content: "ad_b".to_string(),
            gclid: "g1".to_string(),
            fbclid: "f1".to_string(),
            msclkid: "m1".to_string(),
            landing_page: "/landing".to_string(),
            referrer: "https://www.google.com/".to_string(),
            ..Default::default()
        };

        let lines: Vec<String> = format_attribution_note(&record)
            .lines()
            .map(str::to_string)
            .collect();
        assert_eq!(
            lines,
            vec![
                "=== CAMPAIGN ATTRIBUTION ===",
                "Source: google",
                "Medium: cpc",
                "Campaign: spring",
                "Keyword: red shoes",
                "Ad Variation: ad_b",
                "Google Click ID: g1",
                "Facebook Click ID: f1",
                "Microsoft Click ID: m1",
                "Landing Page: /landing",
                "Referrer: https://www.google.com/",
            ]
        );
    }

    #[test]
    fn test_note_order_with_sparse_optional_lines() {
        let record = AttributionRecord {
            utm_content: "banner".to_string(),
            msclkid: "m9".to_string(),
            ..direct_record()
        };
        let note = format_attribution_note(&record);

        let content = note.find("Ad Variation: banner").unwrap();
        let msclkid = note.find("Microsoft Click ID: m9").unwrap();
        let landing = note.find("Landing Page:").unwrap();
        assert!(content < msclkid && msclkid < landing);
        assert!(!note.contains("Keyword:"));
        assert!(!note.contains("Google Click ID:"));
        assert!(!note.ends_with('\n'));
    }
}
