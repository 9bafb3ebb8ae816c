use clap::Parser;
use smarteyes_scraper::utils::{logger, validation::Validate};
use smarteyes_scraper::{CliConfig, LocalStorage, ScrapeEngine, ScrapeError, SmartEyesPipeline};

fn exit_with(e: &ScrapeError) -> ! {
    tracing::error!(
        "❌ Scrape failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code().max(1));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI arguments: {:?}", cli);

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be fetched");
        println!("{}", config.to_toml_string()?);
        return Ok(());
    }

    if cli.monitor {
        tracing::info!("🔍 Process monitoring enabled");
    }

    let storage = LocalStorage::new(config.output.directory.clone());
    let pipeline = match SmartEyesPipeline::new(storage, config) {
        // JSON logs go to a collector, so no bars
        Ok(pipeline) => pipeline.with_progress(!cli.log_json),
        Err(e) => exit_with(&e),
    };
    let engine = ScrapeEngine::new_with_monitoring(pipeline, cli.monitor);

    match engine.run().await {
        Ok(summary) => {
            println!("Number of glasses found: {}", summary.product_count);
            for path in &summary.output_paths {
                println!("📁 Output saved to: {}", path);
            }
            println!("Script complete!");
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}
