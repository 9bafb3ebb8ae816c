use crate::core::http::PageFetcher;
use crate::core::listing::{listing_page_urls, parse_product_links};
use crate::core::output;
use crate::core::product::{build_product, parse_measurements};
use crate::core::{ConfigProvider, Pipeline, RawProduct, ScrapeReport, Storage};
use crate::domain::model::ExtractIssue;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::progress::ScrapeProgress;
use crate::utils::validation::compile_selector;
use chrono::Utc;
use scraper::Selector;
use std::path::Path;
use url::Url;

const PROGRESS_EVERY: usize = 25;

pub struct SmartEyesPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    fetcher: PageFetcher,
    show_progress: bool,
}

impl<S: Storage, C: ConfigProvider> SmartEyesPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let fetcher = PageFetcher::new(config.user_agent(), config.request_timeout())?;

        Ok(Self {
            storage,
            config,
            fetcher,
            show_progress: false,
        })
    }

    /// Draws terminal progress bars over the listing and product loops.
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    /// Walks the listing until a page yields no product links.
    async fn collect_links(&self, selector: &Selector) -> Result<Vec<String>> {
        let mut hrefs = Vec::new();
        let pages = listing_page_urls(self.config.listing_url(), self.config.max_pages());
        let progress = ScrapeProgress::new(self.show_progress, pages.len(), "Listing");

        for (index, page_url) in pages.iter().enumerate() {
            progress.set_message(page_url);
            let html = match self.fetcher.fetch(page_url).await {
                Ok(html) => html,
                // 第一頁以外的錯誤狀態視為列表結尾
                Err(ScrapeError::HttpError(e)) if index > 0 && e.is_status() => {
                    progress.suspend(|| {
                        tracing::warn!(
                            "Listing page {} answered {}; treating it as the end of the listing",
                            page_url,
                            e.status().map(|s| s.to_string()).unwrap_or_default()
                        )
                    });
                    break;
                }
                Err(e) => {
                    progress.finish();
                    return Err(e);
                }
            };
            progress.inc();

            let links = parse_product_links(&html, selector);
            if links.is_empty() {
                progress.suspend(|| tracing::info!("Last page: {}", page_url));
                break;
            }

            progress.suspend(|| {
                tracing::info!(
                    "Listing page {}/{}: {} products",
                    index + 1,
                    pages.len(),
                    links.len()
                )
            });
            hrefs.extend(links);
        }

        progress.finish();
        Ok(hrefs)
    }

    async fn extract_product(
        &self,
        base: &Url,
        href: String,
        label_selector: &Selector,
        value_selector: &Selector,
        progress: &ScrapeProgress,
    ) -> RawProduct {
        let warn = |href: &str, issue: &ExtractIssue| {
            progress.suspend(|| tracing::warn!("{}: {}", href, issue));
        };

        let url = match base.join(&href) {
            Ok(url) => url.to_string(),
            Err(e) => {
                let issue = ExtractIssue::InvalidLink {
                    reason: e.to_string(),
                };
                warn(&href, &issue);
                return RawProduct::with_issue(href.clone(), href, issue);
            }
        };

        let html = match self.fetcher.fetch(&url).await {
            Ok(html) => html,
            Err(e) => {
                let issue = ExtractIssue::FetchFailed {
                    reason: e.to_string(),
                };
                warn(&href, &issue);
                return RawProduct::with_issue(href, url, issue);
            }
        };

        match parse_measurements(&html, label_selector, value_selector) {
            Ok(measurements) => RawProduct::new(href, url, measurements),
            Err(issue) => {
                warn(&href, &issue);
                RawProduct::with_issue(href, url, issue)
            }
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SmartEyesPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<RawProduct>> {
        let link_selector =
            compile_selector("selectors.product_link", self.config.product_link_selector())?;
        let label_selector = compile_selector(
            "selectors.measurement_label",
            self.config.measurement_label_selector(),
        )?;
        let value_selector = compile_selector(
            "selectors.measurement_value",
            self.config.measurement_value_selector(),
        )?;
        let base = Url::parse(self.config.product_base_url())?;

        let hrefs = self.collect_links(&link_selector).await?;
        let total = hrefs.len();
        tracing::info!("Found {} product links", total);

        let progress = ScrapeProgress::new(self.show_progress, total, "Products");
        let mut products = Vec::with_capacity(total);
        for (index, href) in hrefs.into_iter().enumerate() {
            progress.set_message(&href);
            let raw = self
                .extract_product(&base, href, &label_selector, &value_selector, &progress)
                .await;
            products.push(raw);
            progress.inc();

            let done = index + 1;
            if done % PROGRESS_EVERY == 0 || done == total {
                progress.suspend(|| tracing::info!("Product pages: {}/{}", done, total));
            }
        }
        progress.finish();

        Ok(products)
    }

    async fn transform(&self, data: Vec<RawProduct>) -> Result<ScrapeReport> {
        let mut products = Vec::with_capacity(data.len());
        let mut skipped_fields = 0;
        let mut incomplete_products = 0;

        for raw in &data {
            let (product, skipped) = build_product(raw);
            skipped_fields += skipped;
            if raw.issue.is_some() || !product.has_dimensions() {
                incomplete_products += 1;
            }
            products.push(product);
        }

        let scraped_at = Utc::now();
        let outputs = self
            .config
            .output_formats()
            .iter()
            .map(|&format| output::render(&products, format))
            .collect::<Result<Vec<_>>>()?;

        Ok(ScrapeReport {
            products,
            skipped_fields,
            incomplete_products,
            scraped_at,
            outputs,
        })
    }

    async fn load(&self, report: ScrapeReport) -> Result<Vec<String>> {
        let mut paths = Vec::with_capacity(report.outputs.len());

        for rendered in &report.outputs {
            let filename = format!("{}.{}", self.config.file_stem(), rendered.format.extension());
            tracing::debug!(
                "Writing {} ({} bytes) to storage",
                filename,
                rendered.contents.len()
            );
            self.storage
                .write_file(&filename, rendered.contents.as_bytes())
                .await?;

            paths.push(
                Path::new(self.config.output_dir())
                    .join(&filename)
                    .display()
                    .to_string(),
            );
        }

        Ok(paths)
    }
}
