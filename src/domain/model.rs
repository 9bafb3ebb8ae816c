use crate::utils::error::ScrapeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A frame measurement published on a product page, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    FrameWidth,
    BridgeWidth,
    LensWidth,
    TempleLength,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::FrameWidth,
        Dimension::BridgeWidth,
        Dimension::LensWidth,
        Dimension::TempleLength,
    ];

    /// Column name, which is also the normalised label on the retailer's page.
    pub fn key(self) -> &'static str {
        match self {
            Dimension::FrameWidth => "bredd",
            Dimension::BridgeWidth => "brygga",
            Dimension::LensWidth => "glasbredd",
            Dimension::TempleLength => "skalmlangd",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.key() == key)
    }
}

/// Why a product row carries no measurements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractIssue {
    CountMismatch { labels: usize, values: usize },
    InvalidLink { reason: String },
    FetchFailed { reason: String },
}

impl fmt::Display for ExtractIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractIssue::CountMismatch { labels, values } => write!(
                f,
                "not equal number of properties ({}) and measurements ({})",
                labels, values
            ),
            ExtractIssue::InvalidLink { reason } => write!(f, "invalid product link: {}", reason),
            ExtractIssue::FetchFailed { reason } => write!(f, "fetch failed: {}", reason),
        }
    }
}

/// A product page as read off the wire, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProduct {
    pub href: String,
    pub url: String,
    pub measurements: Vec<(String, String)>,
    pub issue: Option<ExtractIssue>,
}

impl RawProduct {
    pub fn new(href: String, url: String, measurements: Vec<(String, String)>) -> Self {
        Self {
            href,
            url,
            measurements,
            issue: None,
        }
    }

    pub fn with_issue(href: String, url: String, issue: ExtractIssue) -> Self {
        Self {
            href,
            url,
            measurements: Vec::new(),
            issue: Some(issue),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub url: String,
    #[serde(rename = "bredd")]
    pub frame_width: Option<u32>,
    #[serde(rename = "brygga")]
    pub bridge_width: Option<u32>,
    #[serde(rename = "glasbredd")]
    pub lens_width: Option<u32>,
    #[serde(rename = "skalmlangd")]
    pub temple_length: Option<u32>,
}

impl Product {
    pub const COLUMNS: [&'static str; 5] = ["url", "bredd", "brygga", "glasbredd", "skalmlangd"];

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn get(&self, dimension: Dimension) -> Option<u32> {
        match dimension {
            Dimension::FrameWidth => self.frame_width,
            Dimension::BridgeWidth => self.bridge_width,
            Dimension::LensWidth => self.lens_width,
            Dimension::TempleLength => self.temple_length,
        }
    }

    pub fn set(&mut self, dimension: Dimension, millimetres: u32) {
        let slot = match dimension {
            Dimension::FrameWidth => &mut self.frame_width,
            Dimension::BridgeWidth => &mut self.bridge_width,
            Dimension::LensWidth => &mut self.lens_width,
            Dimension::TempleLength => &mut self.temple_length,
        };
        *slot = Some(millimetres);
    }

    pub fn has_dimensions(&self) -> bool {
        Dimension::ALL.into_iter().any(|d| self.get(d).is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = ScrapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            other => Err(ScrapeError::InvalidConfigValueError {
                field: "output.formats".to_string(),
                value: other.to_string(),
                reason: "Unsupported format. Valid formats: csv, tsv, json".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub format: OutputFormat,
    pub contents: String,
}

#[derive(Debug, Clone)]
pub struct ScrapeReport {
    pub products: Vec<Product>,
    pub skipped_fields: usize,
    pub incomplete_products: usize,
    pub scraped_at: DateTime<Utc>,
    pub outputs: Vec<RenderedOutput>,
}

/// Outcome of a full run, returned by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub product_count: usize,
    pub output_paths: Vec<String>,
}
