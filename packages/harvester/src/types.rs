//! Record types produced by a harvest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One job posting extracted from a search result card.
///
/// Constructed once during extraction and immutable afterwards. All
/// fields are plain text pulled out of the result markup; `company`
/// is absent on cards that do not carry a corp block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    /// Site-side posting identifier (the card's id attribute)
    pub id: String,

    /// Posting title
    pub title: String,

    /// Company name if the card carries one
    pub company: Option<String>,

    /// Location text
    pub location: String,

    /// Job sector / summary text
    pub summary: String,
}

impl JobPosting {
    /// Detail-view URL for this posting, built from the profile's view
    /// prefix and the card id.
    pub fn listing_url(&self, view_url_prefix: &str) -> String {
        format!("{}{}", view_url_prefix, self.id)
    }
}

/// A raw fetched page before parsing.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL that was fetched
    pub url: String,

    /// Response body
    pub html: String,

    /// When the page was fetched
    pub fetched_at: DateTime<Utc>,
}

impl FetchedPage {
    /// Create a new fetched page stamped with the current time.
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
            fetched_at: Utc::now(),
        }
    }

    /// Body length in bytes.
    pub fn content_length(&self) -> usize {
        self.html.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_url() {
        let posting = JobPosting {
            id: "49876543".to_string(),
            title: "Backend Engineer".to_string(),
            company: Some("Acme".to_string()),
            location: "Seoul".to_string(),
            summary: "Rust, Python".to_string(),
        };

        assert_eq!(
            posting.listing_url("https://example.com/view?rec_idx="),
            "https://example.com/view?rec_idx=49876543"
        );
    }

    #[test]
    fn test_fetched_page_length() {
        let page = FetchedPage::new("https://example.com", "<html></html>");
        assert_eq!(page.content_length(), 13);
    }
}
