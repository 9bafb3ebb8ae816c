use crate::domain::model::{OutputFormat, Product, RenderedOutput};
use crate::utils::error::{Result, ScrapeError};

pub fn render(products: &[Product], format: OutputFormat) -> Result<RenderedOutput> {
    let contents = match format {
        OutputFormat::Csv => render_delimited(products, b',')?,
        OutputFormat::Tsv => render_delimited(products, b'\t')?,
        OutputFormat::Json => serde_json::to_string_pretty(products)?,
    };

    Ok(RenderedOutput { format, contents })
}

fn render_delimited(products: &[Product], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    // serialize() only emits the header alongside the first row
    if products.is_empty() {
        writer.write_record(Product::COLUMNS)?;
    }
    for product in products {
        writer.serialize(product)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ScrapeError::IoError(e.into_error()))?;

    String::from_utf8(bytes).map_err(|e| ScrapeError::ProcessingError {
        message: format!("Rendered output is not UTF-8: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Dimension;

    fn products() -> Vec<Product> {
        let mut complete = Product::new("https://www.smarteyes.se/glasogon/1/1");
        complete.set(Dimension::FrameWidth, 140);
        complete.set(Dimension::BridgeWidth, 21);
        complete.set(Dimension::LensWidth, 51);
        complete.set(Dimension::TempleLength, 145);

        let mut partial = Product::new("https://www.smarteyes.se/glasogon/2/2");
        partial.set(Dimension::LensWidth, 49);

        vec![complete, partial]
    }

    #[test]
    fn test_render_csv() {
        let output = render(&products(), OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = output.contents.lines().collect();

        assert_eq!(output.format, OutputFormat::Csv);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "url,bredd,brygga,glasbredd,skalmlangd");
        assert_eq!(lines[1], "https://www.smarteyes.se/glasogon/1/1,140,21,51,145");
        assert_eq!(lines[2], "https://www.smarteyes.se/glasogon/2/2,,,49,");
    }

    #[test]
    fn test_render_tsv() {
        let output = render(&products(), OutputFormat::Tsv).unwrap();
        let lines: Vec<&str> = output.contents.lines().collect();

        assert_eq!(lines[0], "url\tbredd\tbrygga\tglasbredd\tskalmlangd");
        assert_eq!(lines[2], "https://www.smarteyes.se/glasogon/2/2\t\t\t49\t");
    }

    #[test]
    fn test_render_empty_csv_keeps_header() {
        let output = render(&[], OutputFormat::Csv).unwrap();
        assert_eq!(output.contents.trim_end(), "url,bredd,brygga,glasbredd,skalmlangd");
    }

    #[test]
    fn test_render_json_is_product_array() {
        let output = render(&products(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output.contents).unwrap();

        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["url"], "https://www.smarteyes.se/glasogon/1/1");
        assert_eq!(rows[0]["skalmlangd"], 145);
        assert!(rows[1]["bredd"].is_null());
        assert_eq!(rows[1]["glasbredd"], 49);
    }

    #[test]
    fn test_render_empty_json() {
        let output = render(&[], OutputFormat::Json).unwrap();
        assert_eq!(output.contents, "[]");
    }
}
