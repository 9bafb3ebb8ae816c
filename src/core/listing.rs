use scraper::{Html, Selector};

/// Listing page URLs in visiting order. Page 1 is the bare listing URL.
pub fn listing_page_urls(base: &str, max_pages: usize) -> Vec<String> {
    let separator = if base.contains('?') { '&' } else { '?' };

    (1..=max_pages)
        .map(|page| {
            if page == 1 {
                base.to_string()
            } else {
                format!("{}{}page={}", base, separator, page)
            }
        })
        .collect()
}

/// Hrefs of every product link on a listing page, in document order.
pub fn parse_product_links(html: &str, selector: &Selector) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}
