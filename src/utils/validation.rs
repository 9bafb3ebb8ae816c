use crate::utils::error::{Result, ScrapeError};
use scraper::Selector;
use std::fmt::Display;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ScrapeError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number<T>(field_name: &str, value: T, min_value: T) -> Result<()>
where
    T: PartialOrd + Display,
{
    if value < min_value {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScrapeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Parses a CSS selector, reporting the offending field on failure.
pub fn compile_selector(field_name: &str, css: &str) -> Result<Selector> {
    validate_non_empty_string(field_name, css)?;
    Selector::parse(css).map_err(|e| ScrapeError::SelectorError {
        selector: css.to_string(),
        message: format!("{} ({})", e, field_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source.listing_url", "https://smarteyes.se").is_ok());
        assert!(validate_url("source.listing_url", "http://localhost:8080/list").is_ok());
        assert!(validate_url("source.listing_url", "").is_err());
        assert!(validate_url("source.listing_url", "invalid-url").is_err());
        assert!(validate_url("source.listing_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("source.max_pages", 100, 1).is_ok());
        assert!(validate_positive_number("source.max_pages", 0, 1).is_err());
    }

    #[test]
    fn test_validate_positive_number_keeps_full_u64_range() {
        // 2^32 would truncate to 0 as a 32-bit usize
        assert!(validate_positive_number("source.timeout_seconds", 1u64 << 32, 1).is_ok());
        assert!(validate_positive_number("source.timeout_seconds", u64::MAX, 1).is_ok());

        match validate_positive_number("source.timeout_seconds", 0u64, 1) {
            Err(ScrapeError::InvalidConfigValueError { field, value, .. }) => {
                assert_eq!(field, "source.timeout_seconds");
                assert_eq!(value, "0");
            }
            other => panic!("expected invalid value error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output.directory", "data/").is_ok());
        assert!(validate_path("output.directory", "").is_err());
        assert!(validate_path("output.directory", "da\0ta").is_err());
    }

    #[test]
    fn test_compile_selector() {
        assert!(compile_selector("selectors.product_link", "a.product-block-images").is_ok());
        assert!(compile_selector(
            "selectors.measurement_label",
            "p._text_3kw2f_1._mb-5_1jxbs_120._text-caption-head_3kw2f_213"
        )
        .is_ok());
        assert!(compile_selector("selectors.product_link", "   ").is_err());

        match compile_selector("selectors.product_link", "a..product") {
            Err(ScrapeError::SelectorError { selector, .. }) => assert_eq!(selector, "a..product"),
            other => panic!("expected selector error, got {:?}", other.map(|_| ())),
        }
    }
}
