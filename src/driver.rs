// Driver: the paginate / filter / download loop. Walks the media listing
// page by page, downloads everything created after the cutoff date, and
// stops on the first empty page or at the page cap, whichever comes
// first.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::api::EndpointClient;
use crate::download::{DownloadError, Downloader};

/// Safety bound on pagination, independent of data availability.
pub const PAGE_CAP: u32 = 100;

/// Only media created strictly after this instant is downloaded.
const CUTOFF: &str = "2021-01-01T00:00:00.000Z";

/// Counters reported back to the caller for the summary line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub pages_fetched: u32,
    pub downloaded: u32,
}

fn cutoff() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(CUTOFF)
        .expect("cutoff constant is valid RFC 3339")
        .with_timezone(&Utc)
}

/// Parse a media timestamp; `None` means the record is unusable and
/// should be skipped rather than abort the run.
fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Run the listing workflow: fetch pages, log each item, download those
/// created after the cutoff as `<id>.jpeg`. Listing failures show up as
/// empty pages and end the loop quietly; download failures propagate and
/// terminate the run.
pub fn run_list(
    client: &mut EndpointClient,
    downloader: &Downloader,
) -> Result<RunStats, DownloadError> {
    let cutoff = cutoff();
    let mut stats = RunStats::default();
    for page in 1..=PAGE_CAP {
        let items = client.list_media(page);
        stats.pages_fetched += 1;
        if items.is_empty() {
            break;
        }
        for item in &items {
            info!(
                "media name {}, {}. {}",
                item.id, item.created_at, item.original
            );
            let created = match parse_created_at(&item.created_at) {
                Some(t) => t,
                None => {
                    warn!(
                        "skipping {}: unparseable created_at {:?}",
                        item.id, item.created_at
                    );
                    continue;
                }
            };
            if created > cutoff {
                let name = format!("{}.jpeg", item.id);
                downloader.fetch(&name, &item.original)?;
                stats.downloaded += 1;
            }
        }
    }
    Ok(stats)
}
