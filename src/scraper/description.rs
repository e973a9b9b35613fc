// description.rs
use crate::config::FetchConfig;
use crate::scraper::cleaner::clean_description;
use crate::scraper::selectors::{SelectorRule, DESCRIPTION_SELECTORS};
use crate::scraper::{PageFetcher, ScraperError};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, error};
use url::Url;

pub const NO_DESCRIPTION_FOUND: &str = "No description found";
pub const EXTRACTION_ERROR: &str = "Error extracting description";

/// Cleaned descriptions shorter than this are treated as missing.
pub const MIN_DESCRIPTION_CHARS: usize = 50;

/// Result of scraping one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionOutcome {
    Found(String),
    /// Page fetched, but nothing long enough matched.
    NotFound,
    /// Fetch failed; carries the reason for logs and reports.
    Failed(String),
}

impl DescriptionOutcome {
    /// Text stored in the dataset column, with the two sentinels for non-matches.
    pub fn as_text(&self) -> &str {
        match self {
            DescriptionOutcome::Found(text) => text,
            DescriptionOutcome::NotFound => NO_DESCRIPTION_FOUND,
            DescriptionOutcome::Failed(_) => EXTRACTION_ERROR,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            DescriptionOutcome::Found(text) => Some(text),
            _ => None,
        }
    }
}

/// Fetches `url` and returns the best description candidate on the page.
/// Never fails: fetch errors are logged and reported as `Failed`.
pub fn extract_description(
    fetcher: &dyn PageFetcher,
    url: &str,
    config: &FetchConfig,
) -> DescriptionOutcome {
    let html = match Url::parse(url)
        .map_err(|_| ScraperError::InvalidUrl(url.to_string()))
        .and_then(|parsed| fetcher.fetch(parsed.as_str(), config))
    {
        Ok(html) => html,
        Err(e) => {
            error!(url = %url, error = %e, "Error scraping listing page");
            return DescriptionOutcome::Failed(e.to_string());
        }
    };

    let document = Html::parse_document(&html);
    let description = clean_description(&select_longest_text(&document, &DESCRIPTION_SELECTORS));

    if description.chars().count() < MIN_DESCRIPTION_CHARS {
        debug!(url = %url, "No description long enough on page");
        DescriptionOutcome::NotFound
    } else {
        DescriptionOutcome::Found(description)
    }
}

/// Longest element text over every rule. A later rule replaces the current
/// best only when strictly longer.
pub fn select_longest_text(document: &Html, rules: &[SelectorRule]) -> String {
    let mut best = String::new();
    let mut best_len = 0;

    for rule in rules {
        let selector = match Selector::parse(rule.css) {
            Ok(s) => s,
            Err(e) => {
                debug!(site = rule.site, css = rule.css, error = ?e, "Skipping unparseable selector");
                continue;
            }
        };

        let mut rule_best: Option<(usize, String)> = None;
        for element in document.select(&selector) {
            let text = element_text(element);
            let len = text.chars().count();
            if rule_best.as_ref().map_or(true, |(l, _)| len > *l) {
                rule_best = Some((len, text));
            }
        }

        if let Some((len, text)) = rule_best {
            if len > best_len {
                best_len = len;
                best = text;
            }
        }
    }

    best
}

/// Text nodes of an element, each trimmed, joined by single spaces.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct StaticPage {
        result: RefCell<Option<Result<String, ScraperError>>>,
        requested: RefCell<Vec<String>>,
    }

    impl StaticPage {
        fn ok(html: &str) -> Self {
            Self {
                result: RefCell::new(Some(Ok(html.to_string()))),
                requested: RefCell::new(Vec::new()),
            }
        }

        fn err(e: ScraperError) -> Self {
            Self {
                result: RefCell::new(Some(Err(e))),
                requested: RefCell::new(Vec::new()),
            }
        }
    }

    impl PageFetcher for StaticPage {
        fn fetch(&self, url: &str, _config: &FetchConfig) -> Result<String, ScraperError> {
            self.requested.borrow_mut().push(url.to_string());
            self.result
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Err(ScraperError::Network("exhausted".into())))
        }
    }

    const LONG: &str = "Spacious three bedroom craftsman with an updated kitchen and a large fenced backyard.";

    #[test]
    fn longest_text_wins_regardless_of_rule_order() {
        let short = "0123456789";
        let long = "x".repeat(200);
        let html = format!(r#"<div class="a">{short}</div><div class="b">{long}</div>"#);
        let document = Html::parse_document(&html);

        let a_first = [
            SelectorRule { site: "t", css: ".a" },
            SelectorRule { site: "t", css: ".b" },
        ];
        let b_first = [a_first[1], a_first[0]];

        assert_eq!(select_longest_text(&document, &a_first), long);
        assert_eq!(select_longest_text(&document, &b_first), long);
    }

    #[test]
    fn ties_keep_the_earlier_rule() {
        let html = r#"<p class="a">first text</p><p class="b">other text</p>"#;
        let document = Html::parse_document(html);
        let rules = [
            SelectorRule { site: "t", css: ".a" },
            SelectorRule { site: "t", css: ".b" },
        ];
        assert_eq!(select_longest_text(&document, &rules), "first text");
    }

    #[test]
    fn longest_element_within_a_rule() {
        let html = r#"<p class="d">short</p><p class="d">much longer text</p><p class="d">mid text</p>"#;
        let document = Html::parse_document(html);
        let rules = [SelectorRule { site: "t", css: ".d" }];
        assert_eq!(select_longest_text(&document, &rules), "much longer text");
    }

    #[test]
    fn nested_text_nodes_are_joined_with_spaces() {
        let html = r#"<div class="remarks"><p>Bright  unit.</p><p>Near <b>park</b>.</p></div>"#;
        let document = Html::parse_document(html);
        assert_eq!(
            select_longest_text(&document, &DESCRIPTION_SELECTORS),
            "Bright  unit. Near park ."
        );
    }

    #[test]
    fn extracts_and_cleans_found_description() {
        let html = format!(
            r#"<html><body><div data-testid="description-text">Description:  {LONG}</div></body></html>"#
        );
        let page = StaticPage::ok(&html);

        let outcome = extract_description(&page, "https://example.com/home/1", &FetchConfig::default());
        assert_eq!(outcome, DescriptionOutcome::Found(LONG.to_string()));
        assert_eq!(page.requested.borrow().as_slice(), ["https://example.com/home/1"]);
    }

    #[test]
    fn short_text_is_not_found() {
        let page = StaticPage::ok(r#"<div class="description">Nice house.</div>"#);
        let outcome = extract_description(&page, "https://example.com/x", &FetchConfig::default());
        assert_eq!(outcome, DescriptionOutcome::NotFound);
        assert_eq!(outcome.as_text(), NO_DESCRIPTION_FOUND);
    }

    #[test]
    fn page_without_matches_is_not_found() {
        let page = StaticPage::ok("<html><body><h1>Listing</h1></body></html>");
        let outcome = extract_description(&page, "https://example.com/x", &FetchConfig::default());
        assert_eq!(outcome, DescriptionOutcome::NotFound);
    }

    #[test]
    fn exactly_minimum_length_is_kept() {
        let text = "y".repeat(MIN_DESCRIPTION_CHARS);
        let page = StaticPage::ok(&format!(r#"<div class="remarks">{text}</div>"#));
        let outcome = extract_description(&page, "https://example.com/x", &FetchConfig::default());
        assert_eq!(outcome, DescriptionOutcome::Found(text));
    }

    #[test]
    fn fetch_failure_maps_to_error_sentinel() {
        let page = StaticPage::err(ScraperError::Timeout("10s".into()));
        let outcome = extract_description(&page, "https://example.com/x", &FetchConfig::default());
        assert!(matches!(outcome, DescriptionOutcome::Failed(_)));
        assert_eq!(outcome.as_text(), EXTRACTION_ERROR);
    }

    #[test]
    fn non_success_status_maps_to_error_sentinel() {
        let page = StaticPage::err(ScraperError::HttpStatus(403));
        let outcome = extract_description(&page, "https://example.com/x", &FetchConfig::default());
        assert_eq!(outcome, DescriptionOutcome::Failed("HTTP status 403".into()));
    }

    #[test]
    fn invalid_url_never_reaches_the_fetcher() {
        let page = StaticPage::ok(LONG);
        let outcome = extract_description(&page, "not a url", &FetchConfig::default());
        assert!(matches!(outcome, DescriptionOutcome::Failed(_)));
        assert!(page.requested.borrow().is_empty());
    }
}
