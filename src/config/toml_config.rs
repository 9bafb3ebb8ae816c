use crate::core::ConfigProvider;
use crate::domain::model::OutputFormat;
use crate::utils::error::{Result, ScrapeError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_LISTING_URL: &str = "https://smarteyes.se/glasogon/herr-bagar";
pub const DEFAULT_PRODUCT_BASE_URL: &str = "https://www.smarteyes.se";
pub const DEFAULT_MAX_PAGES: usize = 100;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

pub const DEFAULT_PRODUCT_LINK_SELECTOR: &str = "a.product-block-images";
pub const DEFAULT_LABEL_SELECTOR: &str =
    "p._text_3kw2f_1._mb-5_1jxbs_120._text-caption-head_3kw2f_213";
pub const DEFAULT_VALUE_SELECTOR: &str =
    "p._text_3kw2f_1._text-caption-head_3kw2f_213.product-detail-frame-measurements__details";

pub const DEFAULT_OUTPUT_DIR: &str = "data";
pub const DEFAULT_FILE_STEM: &str = "smarteyes-herrbagar";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub source: SourceConfig,
    pub selectors: SelectorConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub listing_url: String,
    pub product_base_url: String,
    pub max_pages: usize,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            product_base_url: DEFAULT_PRODUCT_BASE_URL.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// CSS selectors for the retailer's markup. The class names are generated
/// by their build and change between deployments.
///
/// Compound class selectors such as `p.a.b` match any element carrying at
/// least those classes, so an element with an extra class still matches.
/// That is looser than comparing the whole `class` attribute. To require the
/// exact class list, use an attribute selector like `p[class="a b"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub product_link: String,
    pub measurement_label: String,
    pub measurement_value: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            product_link: DEFAULT_PRODUCT_LINK_SELECTOR.to_string(),
            measurement_label: DEFAULT_LABEL_SELECTOR.to_string(),
            measurement_value: DEFAULT_VALUE_SELECTOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: String,
    pub file_stem: String,
    pub formats: Vec<OutputFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: DEFAULT_OUTPUT_DIR.to_string(),
            file_stem: DEFAULT_FILE_STEM.to_string(),
            formats: vec![OutputFormat::Csv],
        }
    }
}

impl ScraperConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ScrapeError::ConfigError {
                message: format!("Cannot read config file {}: {}", path.display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        Ok(toml::from_str(&processed_content)?)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScrapeError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ScrapeError::ConfigError {
            message: e.to_string(),
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("source.listing_url", &self.source.listing_url)?;
        validation::validate_url("source.product_base_url", &self.source.product_base_url)?;
        validation::validate_positive_number("source.max_pages", self.source.max_pages, 1)?;
        validation::validate_non_empty_string("source.user_agent", &self.source.user_agent)?;
        validation::validate_positive_number(
            "source.timeout_seconds",
            self.source.timeout_seconds,
            1,
        )?;

        validation::compile_selector("selectors.product_link", &self.selectors.product_link)?;
        validation::compile_selector(
            "selectors.measurement_label",
            &self.selectors.measurement_label,
        )?;
        validation::compile_selector(
            "selectors.measurement_value",
            &self.selectors.measurement_value,
        )?;

        validation::validate_path("output.directory", &self.output.directory)?;
        validation::validate_non_empty_string("output.file_stem", &self.output.file_stem)?;
        if self.output.formats.is_empty() {
            return Err(ScrapeError::MissingConfigError {
                field: "output.formats".to_string(),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for ScraperConfig {
    fn listing_url(&self) -> &str {
        &self.source.listing_url
    }

    fn product_base_url(&self) -> &str {
        &self.source.product_base_url
    }

    fn max_pages(&self) -> usize {
        self.source.max_pages
    }

    fn user_agent(&self) -> &str {
        &self.source.user_agent
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds)
    }

    fn product_link_selector(&self) -> &str {
        &self.selectors.product_link
    }

    fn measurement_label_selector(&self) -> &str {
        &self.selectors.measurement_label
    }

    fn measurement_value_selector(&self) -> &str {
        &self.selectors.measurement_value
    }

    fn output_dir(&self) -> &str {
        &self.output.directory
    }

    fn file_stem(&self) -> &str {
        &self.output.file_stem
    }

    fn output_formats(&self) -> &[OutputFormat] {
        &self.output.formats
    }
}

impl Validate for ScraperConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
