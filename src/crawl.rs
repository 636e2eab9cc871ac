use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use fantoccini::ClientBuilder;

use crate::cli::CrawlArgs;
use crate::driver::WebDriverDom;
use crate::listing::Listing;
use crate::page::{self, ProductDom, SkipReason};
use crate::store;

pub async fn run(args: CrawlArgs) -> anyhow::Result<()> {
    let urls = read_url_batch(&args.urls, args.max_urls)?;
    tracing::info!(count = urls.len(), file = %args.urls, "url batch loaded");

    let client = ClientBuilder::native()
        .capabilities(headless_capabilities())
        .connect(&args.webdriver)
        .await
        .with_context(|| format!("connect to webdriver: {}", args.webdriver))?;

    let mut dom = WebDriverDom::new(
        client.clone(),
        Duration::from_secs(args.heading_timeout_secs),
        Duration::from_millis(args.settle_ms),
    );

    let (listings, skipped) = crawl_urls(&mut dom, &urls).await;

    // The session closes before anything is persisted, on every path.
    if let Err(err) = client.close().await {
        tracing::warn!(?err, "close webdriver session");
    }

    for skip in &skipped {
        tracing::warn!(url = %skip.url, reason = %skip.reason, "skipped page");
    }

    let store_path = Path::new(&args.store);
    let prior = store::load_or_empty(store_path);
    let prior_len = prior.len();
    let merged = store::merge_prepend(listings, prior);
    store::write_atomic(store_path, &merged).context("persist listing store")?;

    tracing::info!(
        extracted = merged.len() - prior_len,
        skipped = skipped.len(),
        total = merged.len(),
        store = %args.store,
        "crawl complete"
    );
    Ok(())
}

pub struct Skipped {
    pub url: String,
    pub reason: SkipReason,
}

/// Fold the URL batch into listings, isolating failures per page: one bad
/// page costs one listing, never the run.
pub async fn crawl_urls<D: ProductDom>(
    dom: &mut D,
    urls: &[String],
) -> (Vec<Listing>, Vec<Skipped>) {
    let mut listings = Vec::new();
    let mut skipped = Vec::new();

    for url in urls {
        match page::extract_listing(dom, url).await {
            Ok(listing) => {
                tracing::info!(%url, sizes = listing.sizes.len(), "extracted listing");
                listings.push(listing);
            }
            Err(reason) => skipped.push(Skipped {
                url: url.clone(),
                reason,
            }),
        }
    }

    (listings, skipped)
}

fn read_url_batch(path: &str, cap: usize) -> anyhow::Result<Vec<String>> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("read url list: {path}"))?;

    let mut batch = Vec::new();
    for line in contents.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match url::Url::parse(line) {
            Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {
                batch.push(line.to_owned());
            }
            Ok(parsed) => {
                tracing::warn!(url = line, scheme = parsed.scheme(), "skipping non-http url");
            }
            Err(err) => {
                tracing::warn!(url = line, %err, "skipping unparseable url");
            }
        }
        if batch.len() == cap {
            break;
        }
    }
    Ok(batch)
}

fn headless_capabilities() -> serde_json::Map<String, serde_json::Value> {
    let mut caps = serde_json::Map::new();
    caps.insert(
        "goog:chromeOptions".to_owned(),
        serde_json::json!({ "args": ["--headless=new", "--disable-gpu"] }),
    );
    caps
}
