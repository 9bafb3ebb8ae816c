use crate::config::toml_config::ScraperConfig;
use crate::domain::model::OutputFormat;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "smarteyes-scraper")]
#[command(about = "Scrapes frame dimensions from the SmartEyes glasses catalogue")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// First listing page; later pages append ?page=N
    #[arg(long)]
    pub listing_url: Option<String>,

    /// Base URL that product links are resolved against
    #[arg(long)]
    pub product_base_url: Option<String>,

    /// Upper bound on listing pages to visit
    #[arg(long)]
    pub max_pages: Option<usize>,

    #[arg(long)]
    pub user_agent: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Directory the output files are written to
    #[arg(short, long)]
    pub output_dir: Option<String>,

    #[arg(long)]
    pub file_stem: Option<String>,

    /// Output formats (csv, tsv, json)
    #[arg(short, long = "format", value_delimiter = ',')]
    pub formats: Vec<OutputFormat>,

    #[arg(long, help = "Log process CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    /// Print the resolved configuration and exit
    #[arg(long)]
    pub dry_run: bool,
}

impl CliConfig {
    /// Loads the config file (or defaults) and applies command-line overrides.
    pub fn resolve(&self) -> Result<ScraperConfig> {
        let mut config = match &self.config {
            Some(path) => ScraperConfig::from_file(path)?,
            None => ScraperConfig::default(),
        };

        if let Some(url) = &self.listing_url {
            config.source.listing_url = url.clone();
        }
        if let Some(url) = &self.product_base_url {
            config.source.product_base_url = url.clone();
        }
        if let Some(max_pages) = self.max_pages {
            config.source.max_pages = max_pages;
        }
        if let Some(user_agent) = &self.user_agent {
            config.source.user_agent = user_agent.clone();
        }
        if let Some(timeout) = self.timeout_secs {
            config.source.timeout_seconds = timeout;
        }
        if let Some(dir) = &self.output_dir {
            config.output.directory = dir.clone();
        }
        if let Some(stem) = &self.file_stem {
            config.output.file_stem = stem.clone();
        }
        if !self.formats.is_empty() {
            config.output.formats = self.formats.clone();
        }

        Ok(config)
    }
}
