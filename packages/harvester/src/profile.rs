//! Site profile: where to search and how result markup is shaped.

use scraper::Selector;
use url::Url;

use crate::error::{HarvestError, Result};

/// Search endpoint and markup selectors for a job-listing site.
///
/// Defaults target the saramin recruit search. Every selector is a plain
/// CSS string so an alternate deployment (or a test server) can be wired
/// in with the `with_*` builders.
#[derive(Debug, Clone)]
pub struct SiteProfile {
    /// Search endpoint, without query parameters
    pub base_url: String,

    /// Query parameter carrying the search term
    pub term_param: String,

    /// Query parameter carrying the 1-based page number
    pub page_param: String,

    /// Detail-view URL prefix; the posting id is appended to build links
    pub view_url_prefix: String,

    /// Selector matching one result card
    pub card_selector: String,

    /// Attribute on the card element holding the posting id
    pub id_attr: String,

    /// Selectors for the card fields
    pub title_selector: String,
    pub company_selector: String,
    pub location_selector: String,
    pub summary_selector: String,

    /// Selector matching the pagination container
    pub pagination_selector: String,

    /// Selector for page links inside the pagination container
    pub pagination_link_selector: String,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            base_url: "https://www.saramin.co.kr/zf_user/search/recruit".to_string(),
            term_param: "searchword".to_string(),
            page_param: "recruitPage".to_string(),
            view_url_prefix: "https://www.saramin.co.kr/zf_user/jobs/relay/view?isMypage=no&rec_idx="
                .to_string(),
            card_selector: ".item_recruit".to_string(),
            id_attr: "value".to_string(),
            title_selector: ".job_tit>a".to_string(),
            company_selector: ".area_corp>.corp_name>a".to_string(),
            location_selector: ".job_condition>span>a".to_string(),
            summary_selector: ".job_sector".to_string(),
            pagination_selector: ".pagination".to_string(),
            pagination_link_selector: "a".to_string(),
        }
    }
}

impl SiteProfile {
    /// Create a profile with the default saramin values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the profile at a different search endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the detail-view URL prefix used for posting links.
    pub fn with_view_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.view_url_prefix = prefix.into();
        self
    }

    /// Build the search URL for a term; `page = None` is the landing page.
    pub fn search_url(&self, term: &str, page: Option<usize>) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.query_pairs_mut().append_pair(&self.term_param, term);
        if let Some(page) = page {
            url.query_pairs_mut()
                .append_pair(&self.page_param, &page.to_string());
        }
        Ok(url)
    }

    /// Compile the selector strings once for reuse across tasks.
    pub fn compile(&self) -> Result<SelectorSet> {
        Ok(SelectorSet {
            card: compile_selector(&self.card_selector)?,
            id_attr: self.id_attr.clone(),
            title: compile_selector(&self.title_selector)?,
            company: compile_selector(&self.company_selector)?,
            location: compile_selector(&self.location_selector)?,
            summary: compile_selector(&self.summary_selector)?,
            pagination: compile_selector(&self.pagination_selector)?,
            pagination_link: compile_selector(&self.pagination_link_selector)?,
        })
    }
}

/// Compiled selectors for one profile.
#[derive(Debug, Clone)]
pub struct SelectorSet {
    pub(crate) card: Selector,
    pub(crate) id_attr: String,
    pub(crate) title: Selector,
    pub(crate) company: Selector,
    pub(crate) location: Selector,
    pub(crate) summary: Selector,
    pub(crate) pagination: Selector,
    pub(crate) pagination_link: Selector,
}

fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| HarvestError::Selector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_term() {
        let profile = SiteProfile::default();

        let landing = profile.search_url("data engineer", None).unwrap();
        assert_eq!(
            landing.as_str(),
            "https://www.saramin.co.kr/zf_user/search/recruit?searchword=data+engineer"
        );

        let page = profile.search_url("python", Some(3)).unwrap();
        assert_eq!(
            page.as_str(),
            "https://www.saramin.co.kr/zf_user/search/recruit?searchword=python&recruitPage=3"
        );
    }

    #[test]
    fn test_compile_default_selectors() {
        assert!(SiteProfile::default().compile().is_ok());
    }

    #[test]
    fn test_compile_rejects_bad_selector() {
        let profile = SiteProfile {
            card_selector: ":::".to_string(),
            ..SiteProfile::default()
        };
        assert!(matches!(
            profile.compile(),
            Err(HarvestError::Selector { .. })
        ));
    }

    #[test]
    fn test_bad_base_url_is_rejected() {
        let profile = SiteProfile::default().with_base_url("not a url");
        assert!(profile.search_url("python", None).is_err());
    }
}
