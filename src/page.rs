//! Page-level extraction: everything between "browser is on the URL" and
//! "we have a Listing". DOM access goes through the [`ProductDom`] trait so
//! the fold and its fallbacks are testable without a browser.

use thiserror::Error;

use crate::listing::{Listing, SizeEntry};
use crate::parse;

/// Why a single page was skipped. A skip never aborts the crawl.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("product heading did not appear within {0}s")]
    HeadingTimeout(u64),
    #[error("extraction failed: {0}")]
    Extraction(String),
}

/// Sizing-unit labels that mark a page with a region selector.
pub const UNIT_LABELS: &[&str] = &["US M", "US W", "US", "EU"];

/// Upper bound of the unit-tab index scan. Carried over from the observed
/// site layout; no tab has ever appeared past index 5.
pub const UNIT_TAB_SCAN_MAX: u32 = 6;

/// Upper bound of the size-row index scan.
pub const SIZE_ROW_SCAN_MAX: u32 = 30;

#[derive(Debug, Clone)]
pub struct SizeRow {
    pub label: String,
    pub price: String,
}

/// Details-panel cells. `style` and `colorway` anchor a layout match;
/// the other two are optional on the page.
#[derive(Debug, Clone)]
pub struct DetailsPanel {
    pub style: String,
    pub colorway: String,
    pub release_date: Option<String>,
    pub retail_price: Option<String>,
}

/// The raw signals extraction needs from a product page, in the order the
/// crawler asks for them.
#[allow(async_fn_in_trait)]
pub trait ProductDom {
    /// Navigate to the URL and wait (bounded) for the product heading;
    /// returns the heading text.
    async fn open_product(&mut self, url: &str) -> Result<String, SkipReason>;

    /// Click the size-selector control and wait (bounded) for the grid.
    async fn open_size_grid(&mut self) -> Result<(), SkipReason>;

    /// Text of the sizing-unit label, if the page has one.
    async fn unit_label(&mut self) -> Option<String>;

    /// Scan the unit tabs for one labeled UK and select it.
    /// Returns whether the UK tab ended up selected.
    async fn select_uk_tab(&mut self) -> bool;

    /// Size row at a 1-based grid index; `None` past the end of the grid.
    async fn size_row(&mut self, index: u32) -> Option<SizeRow>;

    /// Details panel read through the first layout that matches.
    async fn details_panel(&mut self) -> Result<DetailsPanel, SkipReason>;
}

/// Extract one listing from one product page. Field-level trouble degrades
/// (layout fallback, empty-string defaults); only a missing heading or a
/// page with no recognizable details panel skips the page.
pub async fn extract_listing<D: ProductDom>(
    dom: &mut D,
    url: &str,
) -> Result<Listing, SkipReason> {
    let heading = dom.open_product(url).await?;
    let brand = parse::brand_from_heading(&heading);
    let category = parse::category_from_heading(&heading);

    dom.open_size_grid().await?;

    let mut uk_selected = false;
    if let Some(label) = dom.unit_label().await
        && UNIT_LABELS.iter().any(|unit| label.contains(unit))
    {
        uk_selected = dom.select_uk_tab().await;
    }

    let mut sizes = Vec::new();
    for index in 1..SIZE_ROW_SCAN_MAX {
        let Some(row) = dom.size_row(index).await else {
            break;
        };
        // With the UK tab selected the label carries a unit prefix; without
        // it the label is already bare. Either way the first parser that
        // accepts the label wins.
        let parsed = if uk_selected {
            parse::parse_size_label(&row.label)
        } else {
            parse::parse_plain_size_label(&row.label)
        };
        let Some(size) = parsed else {
            break;
        };
        sizes.push(SizeEntry {
            size,
            price: parse::strip_currency(&row.price),
        });
    }

    let panel = dom.details_panel().await?;

    Ok(Listing {
        brand,
        category,
        style: panel.style.trim().to_owned(),
        release_date: panel
            .release_date
            .map(|v| v.trim().to_owned())
            .unwrap_or_default(),
        colorway: panel.colorway.trim().to_owned(),
        retail_price: panel
            .retail_price
            .map(|v| parse::strip_currency(&v))
            .unwrap_or_default(),
        sizes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FixtureDom {
        heading: Option<&'static str>,
        unit_label: Option<&'static str>,
        uk_tab: bool,
        rows: Vec<SizeRow>,
        panel: Option<DetailsPanel>,
    }

    impl ProductDom for FixtureDom {
        async fn open_product(&mut self, _url: &str) -> Result<String, SkipReason> {
            self.heading
                .map(str::to_owned)
                .ok_or(SkipReason::HeadingTimeout(30))
        }

        async fn open_size_grid(&mut self) -> Result<(), SkipReason> {
            Ok(())
        }

        async fn unit_label(&mut self) -> Option<String> {
            self.unit_label.map(str::to_owned)
        }

        async fn select_uk_tab(&mut self) -> bool {
            self.uk_tab
        }

        async fn size_row(&mut self, index: u32) -> Option<SizeRow> {
            self.rows.get(index as usize - 1).cloned()
        }

        async fn details_panel(&mut self) -> Result<DetailsPanel, SkipReason> {
            self.panel
                .clone()
                .ok_or_else(|| SkipReason::Extraction("no details panel".to_owned()))
        }
    }

    fn full_panel() -> DetailsPanel {
        DetailsPanel {
            style: "DD1391-100".to_owned(),
            colorway: "White/Black".to_owned(),
            release_date: Some("2021-03-10".to_owned()),
            retail_price: Some("$115".to_owned()),
        }
    }

    fn row(label: &str, price: &str) -> SizeRow {
        SizeRow {
            label: label.to_owned(),
            price: price.to_owned(),
        }
    }

    #[tokio::test]
    async fn extracts_full_listing_with_uk_sizing() {
        let mut dom = FixtureDom {
            heading: Some("Nike Dunk Low\nRetro White Black"),
            unit_label: Some("US M"),
            uk_tab: true,
            rows: vec![row("UK 8", "$150"), row("UK 8.5", "$155")],
            panel: Some(full_panel()),
        };

        let listing = extract_listing(&mut dom, "https://example.com/p/1")
            .await
            .expect("listing");
        assert_eq!(listing.brand, "Nike");
        assert_eq!(listing.category, "Nike Dunk Low Retro White Black");
        assert_eq!(listing.style, "DD1391-100");
        assert_eq!(listing.colorway, "White/Black");
        assert_eq!(listing.release_date, "2021-03-10");
        assert_eq!(listing.retail_price, "115");
        assert_eq!(listing.sizes.len(), 2);
        assert_eq!(listing.sizes[0].size, "8");
        assert_eq!(listing.sizes[0].price, "150");
        assert_eq!(listing.sizes[1].size, "8.5");
    }

    #[tokio::test]
    async fn plain_labels_when_uk_tab_not_selected() {
        let mut dom = FixtureDom {
            heading: Some("Jordan 1 Retro High OG"),
            unit_label: Some("EU"),
            uk_tab: false,
            rows: vec![row("42", "€180")],
            panel: Some(full_panel()),
        };

        let listing = extract_listing(&mut dom, "https://example.com/p/2")
            .await
            .expect("listing");
        assert_eq!(listing.sizes[0].size, "42");
        assert_eq!(listing.sizes[0].price, "180");
    }

    #[tokio::test]
    async fn missing_release_date_defaults_to_empty_string() {
        let mut dom = FixtureDom {
            heading: Some("New Balance 990v6 Grey"),
            rows: vec![row("9", "$210")],
            panel: Some(DetailsPanel {
                release_date: None,
                retail_price: None,
                ..full_panel()
            }),
            ..FixtureDom::default()
        };

        let listing = extract_listing(&mut dom, "https://example.com/p/3")
            .await
            .expect("listing");
        assert_eq!(listing.brand, "New Balance");
        assert_eq!(listing.release_date, "");
        assert_eq!(listing.retail_price, "");
        assert_eq!(listing.style, "DD1391-100");
        assert_eq!(listing.sizes.len(), 1);
    }

    #[tokio::test]
    async fn heading_timeout_skips_the_page() {
        let mut dom = FixtureDom {
            heading: None,
            ..FixtureDom::default()
        };

        let result = extract_listing(&mut dom, "https://example.com/p/4").await;
        assert!(matches!(result, Err(SkipReason::HeadingTimeout(_))));
    }

    #[tokio::test]
    async fn missing_details_panel_skips_the_page() {
        let mut dom = FixtureDom {
            heading: Some("Nike Dunk Low"),
            rows: vec![row("9", "$150")],
            panel: None,
            ..FixtureDom::default()
        };

        let result = extract_listing(&mut dom, "https://example.com/p/5").await;
        assert!(matches!(result, Err(SkipReason::Extraction(_))));
    }

    #[tokio::test]
    async fn size_scan_stops_at_first_missing_row() {
        let mut dom = FixtureDom {
            heading: Some("Nike Dunk Low"),
            rows: vec![row("8", "$150"), row("", "$0"), row("9", "$160")],
            panel: Some(full_panel()),
            ..FixtureDom::default()
        };

        let listing = extract_listing(&mut dom, "https://example.com/p/6")
            .await
            .expect("listing");
        assert_eq!(listing.sizes.len(), 1);
    }
}
