use std::time::Duration;

use anyhow::{bail, Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::StatusCode;
use scraper::Html;
use tracing::{info, warn};
use url::Url;

use crate::config::Settings;
use crate::parser::detail::{listing_links, parse_detail};
use crate::parser::normalize::normalize;
use crate::parser::{Coordinator, Page};
use crate::record::{DetailRecord, ExhibitorRecord};

pub enum FetchOutcome {
    Page(String),
    NotFound,
}

pub struct Fetcher {
    client: reqwest::Client,
    settings: Settings,
}

impl Fetcher {
    pub fn new(settings: Settings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, settings })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// GET with exponential backoff on 429, 5xx and transport hiccups.
    pub async fn fetch_html(&self, url: &str) -> Result<FetchOutcome> {
        let mut attempt = 0;
        loop {
            let reason = match self.client.get(url).send().await {
                Ok(r) if r.status() == StatusCode::NOT_FOUND => return Ok(FetchOutcome::NotFound),
                Ok(r) if r.status() == StatusCode::TOO_MANY_REQUESTS || r.status().is_server_error() => {
                    r.status().to_string()
                }
                Ok(r) => {
                    let body = r
                        .error_for_status()
                        .with_context(|| format!("GET {}", url))?
                        .text()
                        .await
                        .with_context(|| format!("Failed to read body of {}", url))?;
                    return Ok(FetchOutcome::Page(body));
                }
                Err(e) if e.is_timeout() || e.is_connect() => e.to_string(),
                Err(e) => return Err(e).with_context(|| format!("GET {}", url)),
            };

            if attempt >= self.settings.max_retries {
                bail!("Giving up on {} after {} attempts: {}", url, attempt + 1, reason);
            }
            let backoff = backoff_delay(self.settings.backoff_ms, attempt);
            warn!(
                "{} on {} (attempt {}/{}), backing off {:.1}s",
                reason,
                url,
                attempt + 1,
                self.settings.max_retries,
                backoff.as_secs_f64()
            );
            tokio::time::sleep(backoff).await;
            attempt += 1;
        }
    }
}

const MAX_BACKOFF: Duration = Duration::from_secs(300);

/// `base_ms * 2^attempt`, saturating, capped at [`MAX_BACKOFF`].
fn backoff_delay(base_ms: u64, attempt: u32) -> Duration {
    let ms = base_ms.saturating_mul(2u64.saturating_pow(attempt));
    Duration::from_millis(ms).min(MAX_BACKOFF)
}

/// Listing page `n`, keeping any other query parameters of `base`.
pub fn listing_url(base: &Url, n: usize) -> Url {
    let kept: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(k, _)| k != "pag")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("pag", &n.to_string());
    url
}

#[derive(Debug, Default)]
pub struct ListingCrawl {
    pub records: Vec<ExhibitorRecord>,
    /// Detail-page links, in discovery order across pages.
    pub links: Vec<String>,
    pub pages: usize,
}

struct ListingPage {
    records: Vec<ExhibitorRecord>,
    links: Vec<String>,
}

fn read_listing(coordinator: &Coordinator, url: &Url, html: &str) -> ListingPage {
    let Ok(page) = Page::html(html) else {
        return ListingPage {
            records: Vec::new(),
            links: Vec::new(),
        };
    };
    let links = page
        .document()
        .map(|doc| listing_links(doc, url))
        .unwrap_or_default();
    let extraction = coordinator.extract(&page);
    if let Some(strategy) = extraction.strategy {
        info!(%url, strategy, records = extraction.records.len(), links = links.len(), "listing page");
    }
    ListingPage {
        records: extraction.records,
        links,
    }
}

/// Walk `?pag=1..` until a 404, an empty page, or `max_pages`. A page that
/// keeps failing also ends the walk; what was read before it is returned.
pub async fn crawl_listing(fetcher: &Fetcher, coordinator: &Coordinator) -> Result<ListingCrawl> {
    let settings = fetcher.settings();
    let base = Url::parse(&settings.base_url)
        .with_context(|| format!("Invalid base URL {}", settings.base_url))?;
    let mut crawl = ListingCrawl::default();
    let mut raw_records = Vec::new();

    for n in 1.. {
        if settings.max_pages.is_some_and(|max| n > max) {
            info!("Reached page limit ({})", n - 1);
            break;
        }
        if n > 1 {
            tokio::time::sleep(Duration::from_millis(settings.page_delay_ms)).await;
        }

        let url = listing_url(&base, n);
        info!("Loading page {}...", n);
        let html = match fetcher.fetch_html(url.as_str()).await {
            Ok(FetchOutcome::Page(html)) => html,
            Ok(FetchOutcome::NotFound) => {
                info!("Page {} not found, end of catalog", n);
                break;
            }
            Err(e) => {
                warn!("Stopping at page {}: {:#}", n, e);
                break;
            }
        };

        let page = read_listing(coordinator, &url, &html);
        if page.records.is_empty() && page.links.is_empty() {
            info!("Page {} is empty, end of catalog", n);
            break;
        }
        crawl.pages += 1;
        raw_records.extend(page.records);
        crawl.links.extend(page.links);
    }

    crawl.records = normalize(raw_records);
    Ok(crawl)
}

fn read_detail(link: &str, html: &str) -> DetailRecord {
    parse_detail(&Html::parse_document(html), link)
}

/// Fetch every detail page. Rows come back in the order of `links`; a page
/// that cannot be fetched still yields a row holding its link.
pub async fn crawl_details(fetcher: &Fetcher, links: &[String]) -> Result<Vec<DetailRecord>> {
    let settings = fetcher.settings();
    let delay = Duration::from_millis(settings.detail_delay_ms);

    let pb = ProgressBar::new(links.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let rows: Vec<DetailRecord> = stream::iter(links)
        .map(|link| async move {
            let row = match fetcher.fetch_html(link).await {
                Ok(FetchOutcome::Page(html)) => read_detail(link, &html),
                Ok(FetchOutcome::NotFound) => {
                    warn!("Detail page not found: {}", link);
                    DetailRecord::link_only(link.as_str())
                }
                Err(e) => {
                    warn!("Detail fetch failed for {}: {:#}", link, e);
                    DetailRecord::link_only(link.as_str())
                }
            };
            tokio::time::sleep(delay).await;
            row
        })
        .buffered(settings.concurrency.max(1))
        .inspect(|row| {
            info!("Extracted: {}", row.name);
            pb.inc(1);
        })
        .collect()
        .await;

    pb.finish_and_clear();
    Ok(rows)
}
