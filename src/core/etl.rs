use crate::core::Pipeline;
use crate::domain::model::RunSummary;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct ScrapeEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> ScrapeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Scraping SmartEyes");
        self.monitor.log_stats("Start");

        // Extract
        let raw_data = self.pipeline.extract().await?;
        tracing::info!("Extracted {} product pages", raw_data.len());
        self.monitor.log_stats("Extract");

        // Transform
        let report = self.pipeline.transform(raw_data).await?;
        let product_count = report.products.len();
        tracing::info!(
            "Transformed {} products ({} incomplete, {} fields skipped), scraped at {}",
            product_count,
            report.incomplete_products,
            report.skipped_fields,
            report.scraped_at.to_rfc3339()
        );
        self.monitor.log_stats("Transform");

        // Load
        let output_paths = self.pipeline.load(report).await?;
        for path in &output_paths {
            tracing::info!("Output saved to: {}", path);
        }
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(RunSummary {
            product_count,
            output_paths,
        })
    }
}
