//! Harvest orchestration: page-count discovery and the two-level
//! fan-out over result pages and cards.

use tracing::{debug, info};
use url::Url;

use crate::error::Result;
use crate::fetcher::PageFetcher;
use crate::parse;
use crate::profile::{SelectorSet, SiteProfile};
use crate::types::JobPosting;

/// Scrapes every result page for a search term.
///
/// The run is fatal-on-first-error and makes no retry attempts; spawned
/// tasks that are still in flight when an error surfaces are left to
/// finish on their own.
#[derive(Debug, Clone)]
pub struct Harvester {
    fetcher: PageFetcher,
    profile: SiteProfile,
    selectors: SelectorSet,
}

impl Harvester {
    /// Build a harvester for a site profile, compiling its selectors.
    pub fn new(profile: SiteProfile) -> Result<Self> {
        let selectors = profile.compile()?;
        Ok(Self {
            fetcher: PageFetcher::new()?,
            profile,
            selectors,
        })
    }

    /// The profile this harvester was built with.
    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    /// Harvest all postings for a search term.
    ///
    /// Fetches the landing page once to discover the total page count,
    /// then fans out one task per page. Exactly `total_pages` page
    /// fetches are issued; zero pages yields an empty harvest without
    /// further requests.
    pub async fn run(&self, term: &str) -> Result<Vec<JobPosting>> {
        let landing_url = self.profile.search_url(term, None)?;
        let landing = self.fetcher.fetch(landing_url).await?;
        let total_pages = parse::count_result_pages(&landing.html, &self.selectors);

        info!(term = %term, total_pages, "Starting harvest");

        let mut handles = Vec::with_capacity(total_pages);
        for page in 1..=total_pages {
            let fetcher = self.fetcher.clone();
            let selectors = self.selectors.clone();
            let url = self.profile.search_url(term, Some(page))?;

            handles.push(tokio::spawn(async move {
                page_postings(fetcher, url, selectors).await
            }));
        }

        let mut postings = Vec::new();
        for handle in handles {
            postings.extend(handle.await??);
        }

        info!(term = %term, postings = postings.len(), "Harvest complete");
        Ok(postings)
    }
}

/// Fetch one result page and extract its cards concurrently.
async fn page_postings(
    fetcher: PageFetcher,
    url: Url,
    selectors: SelectorSet,
) -> Result<Vec<JobPosting>> {
    let page = fetcher.fetch(url).await?;

    // Fragments are owned strings; the parsed document stays off the
    // task boundary because `scraper::Html` is not `Send`.
    let fragments = parse::card_fragments(&page.html, &selectors);
    debug!(url = %page.url, cards = fragments.len(), "Extracting cards");

    let mut handles = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        let selectors = selectors.clone();
        handles.push(tokio::spawn(async move {
            parse::extract_posting(&fragment, &selectors)
        }));
    }

    let mut postings = Vec::with_capacity(handles.len());
    for handle in handles {
        postings.push(handle.await?);
    }

    Ok(postings)
}
