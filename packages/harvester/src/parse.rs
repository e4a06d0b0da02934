//! Markup parsing: pagination discovery and card field extraction.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::profile::SelectorSet;
use crate::types::JobPosting;

/// Count result pages advertised by the landing page.
///
/// The page count is the number of links inside the pagination container.
/// When several containers match, the last one wins. Pages without
/// pagination markup report zero.
pub fn count_result_pages(html: &str, selectors: &SelectorSet) -> usize {
    let document = Html::parse_document(html);

    let mut pages = 0;
    for container in document.select(&selectors.pagination) {
        pages = container.select(&selectors.pagination_link).count();
    }

    debug!(pages, "Counted result pages");
    pages
}

/// Collect the outer HTML of every result card, in document order.
///
/// Fragments are owned strings so card extraction can fan out across
/// spawned tasks; `scraper` documents cannot leave the parsing thread.
pub fn card_fragments(html: &str, selectors: &SelectorSet) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&selectors.card)
        .map(|card| card.html())
        .collect()
}

/// Extract one posting from a card fragment.
///
/// Missing fields degrade to empty text rather than failing the run; a
/// card without a company block yields `company: None`.
pub fn extract_posting(card_html: &str, selectors: &SelectorSet) -> JobPosting {
    let fragment = Html::parse_fragment(card_html);

    let Some(card) = fragment.select(&selectors.card).next() else {
        return JobPosting {
            id: String::new(),
            title: String::new(),
            company: None,
            location: String::new(),
            summary: String::new(),
        };
    };

    let id = card
        .value()
        .attr(&selectors.id_attr)
        .unwrap_or_default()
        .to_string();
    let company = selected_text(card, &selectors.company);

    JobPosting {
        id,
        title: selected_text(card, &selectors.title),
        company: (!company.is_empty()).then_some(company),
        location: selected_text(card, &selectors.location),
        summary: selected_text(card, &selectors.summary),
    }
}

/// Text of every selector match under `card`, whitespace-collapsed.
fn selected_text(card: ElementRef, selector: &Selector) -> String {
    let text = card
        .select(selector)
        .map(|el| el.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ");
    collapse_whitespace(&text)
}

/// Collapse runs of whitespace to single spaces and trim the ends.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SiteProfile;

    fn selectors() -> SelectorSet {
        SiteProfile::default().compile().unwrap()
    }

    const RESULT_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
  <div class="content">
    <div class="item_recruit" value="40001">
      <h2 class="job_tit"><a>
        Senior  Backend
        Engineer
      </a></h2>
      <div class="area_corp"><strong class="corp_name"><a>Acme Corp</a></strong></div>
      <div class="job_condition"><span><a>Seoul</a><a>Gangnam-gu</a></span><span>3+ years</span></div>
      <div class="job_sector">Web backend, API platform</div>
    </div>
    <div class="item_recruit" value="40002">
      <h2 class="job_tit"><a>Data Engineer</a></h2>
      <div class="job_condition"><span><a>Busan</a></span></div>
      <div class="job_sector">Pipelines</div>
    </div>
  </div>
  <div class="pagination">
    <a href="?recruitPage=1">1</a>
    <a href="?recruitPage=2">2</a>
    <a href="?recruitPage=3">3</a>
  </div>
</body>
</html>"#;

    #[test]
    fn test_count_result_pages() {
        assert_eq!(count_result_pages(RESULT_PAGE, &selectors()), 3);
    }

    #[test]
    fn test_count_without_pagination() {
        let html = "<html><body><p>no results</p></body></html>";
        assert_eq!(count_result_pages(html, &selectors()), 0);
    }

    #[test]
    fn test_last_pagination_container_wins() {
        let html = r#"<html><body>
          <div class="pagination"><a>1</a><a>2</a><a>3</a><a>4</a></div>
          <div class="pagination"><a>1</a><a>2</a></div>
        </body></html>"#;
        assert_eq!(count_result_pages(html, &selectors()), 2);
    }

    #[test]
    fn test_card_fragments_in_document_order() {
        let fragments = card_fragments(RESULT_PAGE, &selectors());
        assert_eq!(fragments.len(), 2);
        assert!(fragments[0].contains("40001"));
        assert!(fragments[1].contains("40002"));
    }

    #[test]
    fn test_extract_posting_fields() {
        let fragments = card_fragments(RESULT_PAGE, &selectors());
        let posting = extract_posting(&fragments[0], &selectors());

        assert_eq!(posting.id, "40001");
        assert_eq!(posting.title, "Senior Backend Engineer");
        assert_eq!(posting.company.as_deref(), Some("Acme Corp"));
        assert_eq!(posting.location, "Seoul Gangnam-gu");
        assert_eq!(posting.summary, "Web backend, API platform");
    }

    #[test]
    fn test_extract_posting_without_company() {
        let fragments = card_fragments(RESULT_PAGE, &selectors());
        let posting = extract_posting(&fragments[1], &selectors());

        assert_eq!(posting.id, "40002");
        assert_eq!(posting.title, "Data Engineer");
        assert_eq!(posting.company, None);
        assert_eq!(posting.location, "Busan");
    }

    #[test]
    fn test_extract_posting_missing_id() {
        let card = r#"<div class="item_recruit"><h2 class="job_tit"><a>Untitled</a></h2></div>"#;
        let posting = extract_posting(card, &selectors());

        assert_eq!(posting.id, "");
        assert_eq!(posting.title, "Untitled");
        assert_eq!(posting.location, "");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\t b  c  "), "a b c");
        assert_eq!(collapse_whitespace(""), "");
    }
}
