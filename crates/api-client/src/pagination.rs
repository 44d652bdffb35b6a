use crate::error::ApiError;
use crate::query::BetsQuery;
use crate::BetSource;
use configuration::FetchSettings;
use core_types::{BetCategory, BetRecord, TimeWindow};

/// Fetches every resolved, non-free bet of `category` inside `window`.
///
/// Pages are requested strictly in order; a page shorter than
/// `settings.page_size` ends the fetch. Any failed page fails the whole fetch
/// and nothing collected so far is returned.
pub async fn fetch_all_bets(
    source: &dyn BetSource,
    category: BetCategory,
    window: TimeWindow,
    settings: &FetchSettings,
) -> Result<Vec<BetRecord>, ApiError> {
    let page_size = settings.page_size;
    let mut bets = Vec::new();
    let mut skip = 0u32;
    let mut pages = 0u32;

    loop {
        if let Some(max_pages) = settings.max_pages {
            if pages >= max_pages {
                tracing::warn!(
                    %category,
                    %window,
                    max_pages,
                    "Page cap reached before a short page."
                );
                return Err(ApiError::PageLimitExceeded { max_pages });
            }
        }

        let query = BetsQuery {
            category,
            window,
            first: page_size,
            skip,
        };
        let page = source.fetch_page(&query).await?;
        pages += 1;

        let received = page.len();
        tracing::debug!(%category, %window, skip, received, "Fetched bet page.");
        bets.extend(page);

        if received < page_size as usize {
            break;
        }
        skip += page_size;
    }

    tracing::info!(%category, %window, pages, bets = bets.len(), "Finished fetching bets.");
    Ok(bets)
}
