pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{LocalStorage, ScraperConfig};

pub use core::{etl::ScrapeEngine, pipeline::SmartEyesPipeline};
pub use domain::model::{Dimension, OutputFormat, Product, RunSummary};
pub use utils::error::{Result, ScrapeError};
