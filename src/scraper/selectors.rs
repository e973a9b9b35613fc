// selectors.rs

/// One strategy for locating description text in a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorRule {
    /// Site the selector was written for, or "generic".
    pub site: &'static str,
    pub css: &'static str,
}

const fn rule(site: &'static str, css: &'static str) -> SelectorRule {
    SelectorRule { site, css }
}

/// Site-specific selectors first, generic fallbacks last. Every rule is
/// evaluated; the longest text across all of them wins, earlier rules win ties.
pub const DESCRIPTION_SELECTORS: [SelectorRule; 13] = [
    // Zillow
    rule("zillow", ".Text-c11n-8-84-3__sc-aiai24-0.dpf__sc-1me6wg9-0.jHtYqh.hBiUwn"),
    rule("zillow", r#"[data-testid="description-text"]"#),
    rule("zillow", ".ds-overview-section"),
    // Redfin
    rule("redfin", ".remarks"),
    rule("redfin", ".listing-description"),
    // Realtor.com
    rule("realtor", ".ldp-property-description"),
    rule("realtor", ".property-description"),
    // Fallbacks
    rule("generic", ".description"),
    rule("generic", ".property-details"),
    rule("generic", ".listing-details"),
    rule("generic", r#"[class*="description"]"#),
    rule("generic", r#"[class*="remarks"]"#),
    rule("generic", r#"[class*="details"]"#),
];

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    #[test]
    fn every_selector_parses() {
        for rule in DESCRIPTION_SELECTORS {
            assert!(
                Selector::parse(rule.css).is_ok(),
                "selector for {} does not parse: {}",
                rule.site,
                rule.css
            );
        }
    }

    #[test]
    fn generic_rules_come_last() {
        let first_generic = DESCRIPTION_SELECTORS
            .iter()
            .position(|r| r.site == "generic")
            .unwrap();
        assert!(DESCRIPTION_SELECTORS[first_generic..]
            .iter()
            .all(|r| r.site == "generic"));
    }
}
