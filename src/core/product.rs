use crate::domain::model::{Dimension, ExtractIssue, Product, RawProduct};
use scraper::{ElementRef, Html, Selector};

/// Label/value text pairs from a product page's measurement block.
///
/// Labels and values are matched by position, so the page must carry the same
/// number of each; otherwise no pairs are returned.
pub fn parse_measurements(
    html: &str,
    label_selector: &Selector,
    value_selector: &Selector,
) -> Result<Vec<(String, String)>, ExtractIssue> {
    let document = Html::parse_document(html);

    let labels: Vec<String> = document.select(label_selector).map(element_text).collect();
    let values: Vec<String> = document.select(value_selector).map(element_text).collect();

    if labels.len() != values.len() {
        return Err(ExtractIssue::CountMismatch {
            labels: labels.len(),
            values: values.len(),
        });
    }

    Ok(labels.into_iter().zip(values).collect())
}

fn element_text(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `Skalmlängd` -> `skalmlangd`
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase().replace('ä', "a")
}

/// Leading integer of a measurement such as `52 mm`.
pub fn parse_millimetres(value: &str) -> Option<u32> {
    value.split_whitespace().next()?.parse().ok()
}

/// Interprets the raw pairs of one product. Returns the product and the
/// number of pairs that had to be skipped.
pub fn build_product(raw: &RawProduct) -> (Product, usize) {
    let mut product = Product::new(raw.url.clone());
    let mut skipped = 0;

    for (label, value) in &raw.measurements {
        let key = normalize_label(label);

        match (Dimension::from_key(&key), parse_millimetres(value)) {
            (Some(dimension), Some(millimetres)) => product.set(dimension, millimetres),
            _ => {
                tracing::warn!(
                    "{}: invalid measurement value '{}' or key '{}'.",
                    raw.href,
                    value,
                    key
                );
                skipped += 1;
            }
        }
    }

    (product, skipped)
}
