//! Fantoccini-backed [`ProductDom`]. All marketplace DOM knowledge lives
//! here: the selectors, the unit-tab and size-row index scans, and the
//! details-panel layout table.

use std::time::Duration;

use fantoccini::error::CmdError;
use fantoccini::{Client, Locator};

use crate::page::{DetailsPanel, ProductDom, SizeRow, SkipReason, UNIT_TAB_SCAN_MAX};

const HEADING: &str = "h1[data-component=\"primary-product-title\"]";
const SIZE_SELECTOR_TRIGGER: &str = "div[data-component=\"size-selector\"] > button";
const SIZE_GRID: &str = "div[data-component=\"size-grid\"]";
const UNIT_LABEL: &str = "div[data-component=\"size-selector\"] span[data-component=\"unit-label\"]";
const SIZE_ROW_LABEL: &str = "div:nth-child(1)";
const SIZE_ROW_PRICE: &str = "div:nth-child(2)";

fn unit_tab_selector(index: u32) -> String {
    format!("div[data-component=\"unit-tabs\"] > button:nth-child({index})")
}

fn size_row_selector(index: u32) -> String {
    format!("{SIZE_GRID} > button:nth-child({index})")
}

struct PanelLayout {
    name: &'static str,
    /// Click target that must succeed before the cells exist, if any.
    expand: Option<&'static str>,
    style: &'static str,
    colorway: &'static str,
    release_date: &'static str,
    retail_price: &'static str,
}

/// The two DOM generations observed for the product details panel, tried in
/// order. The expanding layout is current; the inline layout is what older
/// page versions still serve.
const PANEL_LAYOUTS: &[PanelLayout] = &[
    PanelLayout {
        name: "expanding",
        expand: Some("div[data-component=\"product-details\"] > button"),
        style: "div[data-component=\"product-details\"] div:nth-child(2) > p:nth-child(2)",
        colorway: "div[data-component=\"product-details\"] div:nth-child(3) > p:nth-child(2)",
        release_date: "div[data-component=\"product-details\"] div:nth-child(4) > p:nth-child(2)",
        retail_price: "div[data-component=\"product-details\"] div:nth-child(5) > p:nth-child(2)",
    },
    PanelLayout {
        name: "inline",
        expand: None,
        style: "div[data-component=\"product-details\"] span:nth-child(2)",
        colorway: "div[data-component=\"product-details\"] span:nth-child(4)",
        release_date: "div[data-component=\"product-details\"] span:nth-child(6)",
        retail_price: "div[data-component=\"product-details\"] span:nth-child(8)",
    },
];

pub struct WebDriverDom {
    client: Client,
    heading_timeout: Duration,
    settle: Duration,
}

impl WebDriverDom {
    pub fn new(client: Client, heading_timeout: Duration, settle: Duration) -> Self {
        Self {
            client,
            heading_timeout,
            settle,
        }
    }

    async fn element_text(&self, selector: &str) -> Result<String, CmdError> {
        let element = self.client.find(Locator::Css(selector)).await?;
        element.text().await
    }

    /// Bounded wait for a post-click transition. The bound is the contract;
    /// an element that never shows up is handled by whoever reads it next.
    async fn settle_on(&self, selector: &str) {
        let wait = self
            .client
            .wait()
            .at_most(self.settle)
            .for_element(Locator::Css(selector))
            .await;
        if let Err(err) = wait {
            tracing::debug!(selector, ?err, "ui transition did not settle within bound");
        }
    }
}

impl ProductDom for WebDriverDom {
    async fn open_product(&mut self, url: &str) -> Result<String, SkipReason> {
        self.client.goto(url).await.map_err(extraction)?;

        let heading = self
            .client
            .wait()
            .at_most(self.heading_timeout)
            .for_element(Locator::Css(HEADING))
            .await
            .map_err(|err| match err {
                CmdError::WaitTimeout => {
                    SkipReason::HeadingTimeout(self.heading_timeout.as_secs())
                }
                other => extraction(other),
            })?;

        heading.text().await.map_err(extraction)
    }

    async fn open_size_grid(&mut self) -> Result<(), SkipReason> {
        let trigger = self
            .client
            .find(Locator::Css(SIZE_SELECTOR_TRIGGER))
            .await
            .map_err(extraction)?;
        trigger.click().await.map_err(extraction)?;
        self.settle_on(SIZE_GRID).await;
        Ok(())
    }

    async fn unit_label(&mut self) -> Option<String> {
        self.element_text(UNIT_LABEL).await.ok()
    }

    async fn select_uk_tab(&mut self) -> bool {
        for index in 1..UNIT_TAB_SCAN_MAX {
            let selector = unit_tab_selector(index);
            let Ok(tab) = self.client.find(Locator::Css(&selector)).await else {
                continue;
            };
            let Ok(label) = tab.text().await else {
                continue;
            };
            if !label.contains("UK") {
                continue;
            }
            if tab.click().await.is_err() {
                // Fall back to the unconverted grid.
                return false;
            }
            self.settle_on(SIZE_GRID).await;
            return true;
        }
        false
    }

    async fn size_row(&mut self, index: u32) -> Option<SizeRow> {
        let selector = size_row_selector(index);
        let row = self.client.find(Locator::Css(&selector)).await.ok()?;
        let label = row.find(Locator::Css(SIZE_ROW_LABEL)).await.ok()?;
        let label = label.text().await.ok()?;
        let price = row.find(Locator::Css(SIZE_ROW_PRICE)).await.ok()?;
        let price = price.text().await.ok()?;
        Some(SizeRow { label, price })
    }

    async fn details_panel(&mut self) -> Result<DetailsPanel, SkipReason> {
        for layout in PANEL_LAYOUTS {
            if let Some(expand) = layout.expand {
                let Ok(button) = self.client.find(Locator::Css(expand)).await else {
                    continue;
                };
                if button.click().await.is_err() {
                    continue;
                }
                self.settle_on(layout.style).await;
            }

            let Ok(style) = self.element_text(layout.style).await else {
                continue;
            };
            let Ok(colorway) = self.element_text(layout.colorway).await else {
                continue;
            };

            tracing::debug!(layout = layout.name, "details panel layout matched");
            return Ok(DetailsPanel {
                style,
                colorway,
                release_date: self.element_text(layout.release_date).await.ok(),
                retail_price: self.element_text(layout.retail_price).await.ok(),
            });
        }

        Err(SkipReason::Extraction(
            "details panel did not match any known layout".to_owned(),
        ))
    }
}

fn extraction(err: CmdError) -> SkipReason {
    SkipReason::Extraction(err.to_string())
}
