//! CSV export with a UTF-8 byte-order mark for spreadsheet tools.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::profile::SiteProfile;
use crate::types::JobPosting;

/// UTF-8 BOM; Excel needs it to pick the right encoding.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

const HEADERS: [&str; 5] = ["Link", "Title", "Company", "Location", "Summary"];

/// Serialize postings to CSV bytes: BOM, header row, one row per posting.
///
/// The `Link` column is the detail-view URL built from the posting id; a
/// missing company serializes as an empty field. An empty harvest still
/// produces the BOM and header row.
pub fn csv_bytes(postings: &[JobPosting], profile: &SiteProfile) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(buf);
    writer.write_record(HEADERS)?;

    for posting in postings {
        writer.write_record([
            posting.listing_url(&profile.view_url_prefix).as_str(),
            posting.title.as_str(),
            posting.company.as_deref().unwrap_or(""),
            posting.location.as_str(),
            posting.summary.as_str(),
        ])?;
    }

    Ok(writer.into_inner().expect("flush into Vec cannot fail"))
}

/// Write postings to a CSV file at `path`.
pub fn save_to_csv(
    path: impl AsRef<Path>,
    postings: &[JobPosting],
    profile: &SiteProfile,
) -> Result<()> {
    let bytes = csv_bytes(postings, profile)?;
    let mut file = File::create(path)?;
    file.write_all(&bytes)?;
    Ok(())
}
