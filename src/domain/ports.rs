use crate::domain::model::{OutputFormat, RawProduct, ScrapeReport};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn listing_url(&self) -> &str;
    fn product_base_url(&self) -> &str;
    fn max_pages(&self) -> usize;
    fn user_agent(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn product_link_selector(&self) -> &str;
    fn measurement_label_selector(&self) -> &str;
    fn measurement_value_selector(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn file_stem(&self) -> &str;
    fn output_formats(&self) -> &[OutputFormat];
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawProduct>>;
    async fn transform(&self, data: Vec<RawProduct>) -> Result<ScrapeReport>;
    async fn load(&self, report: ScrapeReport) -> Result<Vec<String>>;
}
