//! Search-driven note collection.
//!
//! The collector drives an authenticated browsing context through search
//! result pages: extract visible cards, scroll to trigger lazy loading, pace
//! itself, and stop on limit or exhaustion. Failures below browser launch are
//! degraded to empty or partial results per query; the run continues.

use async_trait::async_trait;
use tracing::{info, warn};
use url::Url;

use crate::Result;
use crate::extract::extract_cards;
use crate::note::NoteRecord;
use crate::pacing::PacingPolicy;

/// Platform landing page, also the base for resolving relative note links.
pub const HOME_URL: &str = "https://www.xiaohongshu.com";

const SEARCH_URL: &str = "https://www.xiaohongshu.com/search_result";

/// The slice of a browsing session the collector needs.
///
/// [`crate::Session`] implements this against a live page; tests implement it
/// against canned HTML snapshots.
#[async_trait]
pub trait Browse: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<()>;
    async fn current_url(&self) -> Result<String>;
    /// Snapshot of the rendered page HTML.
    async fn html(&self) -> Result<String>;
    async fn scroll_by(&self, pixels: u32) -> Result<()>;
}

/// Tunables for the pagination loop.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Give up on a query once this many rounds pass and the latest round
    /// found nothing new (exhaustion heuristic).
    pub stall_rounds: u32,
    /// Hard cap on pagination rounds per query, in case the stall heuristic
    /// never fires before `limit`.
    pub max_rounds: u32,
    /// Timing policy for all delays and scroll simulation.
    pub pacing: PacingPolicy,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self { stall_rounds: 3, max_rounds: 40, pacing: PacingPolicy::default() }
    }
}

/// Drives searches against a [`Browse`] implementation.
pub struct Collector {
    config: CollectorConfig,
}

impl Collector {
    pub fn new(config: CollectorConfig) -> Self {
        Self { config }
    }

    /// Collector with default tunables and human-like pacing.
    pub fn with_defaults() -> Self {
        Self::new(CollectorConfig::default())
    }

    /// Searches one query and returns at most `limit` records, deduplicated
    /// by title.
    ///
    /// A login wall or navigation failure degrades to an empty result with a
    /// warning; the caller's run continues.
    pub async fn search(&self, browse: &dyn Browse, query: &str, limit: usize) -> Result<Vec<NoteRecord>> {
        info!(query, limit, "Searching");

        if let Err(e) = browse.navigate(&search_url(query)?).await {
            warn!(query, error = %e, "Navigation failed, skipping query");
            return Ok(Vec::new());
        }
        self.config.pacing.settle_pause().await;

        // Login wall: the platform redirects unauthenticated viewers.
        match browse.current_url().await {
            Ok(url) if url.to_lowercase().contains("login") => {
                warn!(query, url = %url, "Login required, skipping query");
                return Ok(Vec::new());
            }
            Ok(_) => {}
            Err(e) => {
                warn!(query, error = %e, "Could not read page URL, skipping query");
                return Ok(Vec::new());
            }
        }

        let mut notes: Vec<NoteRecord> = Vec::new();
        let mut rounds = 0u32;

        while notes.len() < limit && rounds < self.config.max_rounds {
            rounds += 1;

            let html = match browse.html().await {
                Ok(html) => html,
                Err(e) => {
                    warn!(query, round = rounds, error = %e, "Page snapshot failed, returning partial result");
                    break;
                }
            };

            let before = notes.len();
            for mut card in extract_cards(&html, HOME_URL) {
                if notes.len() >= limit {
                    break;
                }
                if notes.iter().any(|n| n.title == card.title) {
                    continue;
                }
                card.query = query.to_string();
                notes.push(card);
            }
            let added = notes.len() - before;
            info!(query, round = rounds, added, total = notes.len(), "Pagination round");

            if let Err(e) = self.scroll(browse).await {
                warn!(query, round = rounds, error = %e, "Scroll failed, returning partial result");
                break;
            }
            self.config.pacing.page_pause().await;

            if added == 0 && rounds > self.config.stall_rounds {
                info!(query, total = notes.len(), "No new notes found, query exhausted");
                break;
            }

            let rest_every = self.config.pacing.rest_every;
            if added > 0 && rest_every > 0 && notes.len() % rest_every == 0 {
                info!(query, total = notes.len(), "Resting to reduce request burstiness");
                self.config.pacing.rest_pause().await;
            }
        }

        Ok(notes)
    }

    /// Expands a destination through the given query templates and runs
    /// [`Collector::search`] once per variant, sequentially.
    ///
    /// Results are concatenated as-is; cross-template duplicates are left for
    /// the categorizer's per-bucket dedup.
    pub async fn search_destination(
        &self, browse: &dyn Browse, destination: &str, per_query_limit: usize, queries: &[String],
    ) -> Result<Vec<NoteRecord>> {
        info!(destination, variants = queries.len(), per_query_limit, "Multi-query collection");

        let mut all = Vec::new();
        for (i, query) in queries.iter().enumerate() {
            if i > 0 {
                self.config.pacing.query_pause().await;
            }
            let notes = self.search(browse, query, per_query_limit).await?;
            all.extend(notes);
        }

        info!(destination, total = all.len(), "Multi-query collection done");
        Ok(all)
    }

    /// Simulates incremental human scrolling to trigger lazy-loaded content.
    async fn scroll(&self, browse: &dyn Browse) -> Result<()> {
        for _ in 0..self.config.pacing.scroll_step_count() {
            browse.scroll_by(self.config.pacing.scroll_distance()).await?;
            self.config.pacing.scroll_pause().await;
        }
        Ok(())
    }
}

fn search_url(query: &str) -> Result<String> {
    let url = Url::parse_with_params(
        SEARCH_URL,
        &[("keyword", query), ("source", "web_search_result_notes")],
    )
    .map_err(|e| crate::TripnotesError::InvalidUrl(e.to_string()))?;
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_query() {
        let url = search_url("黄山 攻略").unwrap();
        assert!(url.starts_with("https://www.xiaohongshu.com/search_result?"));
        assert!(url.contains("keyword="));
        assert!(url.contains("source=web_search_result_notes"));
        assert!(!url.contains(' '));
    }

    #[test]
    fn test_default_config() {
        let config = CollectorConfig::default();
        assert_eq!(config.stall_rounds, 3);
        assert!(config.max_rounds > config.stall_rounds);
    }
}
