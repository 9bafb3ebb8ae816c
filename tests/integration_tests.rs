use httpmock::prelude::*;
use smarteyes_scraper::{
    LocalStorage, OutputFormat, ScrapeEngine, ScrapeError, ScraperConfig, SmartEyesPipeline,
};
use tempfile::TempDir;

const LISTING: &str = include_str!("fixtures/listing.html");
const LISTING_EMPTY: &str = include_str!("fixtures/listing_empty.html");
const PRODUCT: &str = include_str!("fixtures/product.html");
const PRODUCT_MISMATCH: &str = include_str!("fixtures/product_mismatch.html");
const PRODUCT_PARTIAL: &str = include_str!("fixtures/product_partial.html");

fn config_for(server: &MockServer, output_path: &str) -> ScraperConfig {
    let mut config = ScraperConfig::default();
    config.source.listing_url = server.url("/glasogon/herr-bagar");
    config.source.product_base_url = server.base_url();
    config.source.timeout_seconds = 5;
    config.output.directory = output_path.to_string();
    config
}

fn mock_retailer(server: &MockServer) {
    // Registered before the bare listing path so the page query matches first.
    server.mock(|when, then| {
        when.method(GET)
            .path("/glasogon/herr-bagar")
            .query_param("page", "2");
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(LISTING_EMPTY);
    });
    server.mock(|when, then| {
        when.method(GET).path("/glasogon/herr-bagar");
        then.status(200)
            .header("Content-Type", "text/html; charset=utf-8")
            .body(LISTING);
    });
    server.mock(|when, then| {
        when.method(GET).path("/glasogon/8056262201190/8056262201190");
        then.status(200).body(PRODUCT);
    });
    server.mock(|when, then| {
        when.method(GET).path("/glasogon/7350104550017/7350104550017");
        then.status(200).body(PRODUCT_MISMATCH);
    });
    server.mock(|when, then| {
        when.method(GET).path("/glasogon/0713132547658/0713132547658");
        then.status(200).body(PRODUCT_PARTIAL);
    });
}

#[tokio::test]
async fn test_end_to_end_scrape_writes_csv() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("data").to_str().unwrap().to_string();

    let server = MockServer::start();
    mock_retailer(&server);

    let config = config_for(&server, &output_path);
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = SmartEyesPipeline::new(storage, config).unwrap();
    let engine = ScrapeEngine::new(pipeline);

    let summary = engine.run().await.unwrap();

    assert_eq!(summary.product_count, 3);
    assert_eq!(summary.output_paths.len(), 1);
    assert!(summary.output_paths[0].ends_with("smarteyes-herrbagar.csv"));

    let full_path = std::path::Path::new(&output_path).join("smarteyes-herrbagar.csv");
    assert!(full_path.exists());

    let mut reader = csv::Reader::from_path(&full_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["url", "bredd", "brygga", "glasbredd", "skalmlangd"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);

    assert_eq!(
        &rows[0][0],
        server.url("/glasogon/8056262201190/8056262201190")
    );
    assert_eq!(
        rows[0].iter().skip(1).collect::<Vec<_>>(),
        vec!["140", "21", "51", "145"]
    );

    // Mismatched label/value counts leave only the URL
    assert_eq!(
        rows[1].iter().skip(1).collect::<Vec<_>>(),
        vec!["", "", "", ""]
    );

    assert_eq!(
        rows[2].iter().skip(1).collect::<Vec<_>>(),
        vec!["136", "", "", "150"]
    );
}

#[tokio::test]
async fn test_end_to_end_all_formats() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    mock_retailer(&server);

    let mut config = config_for(&server, &output_path);
    config.output.file_stem = "herr".to_string();
    config.output.formats = vec![OutputFormat::Csv, OutputFormat::Tsv, OutputFormat::Json];

    let storage = LocalStorage::new(output_path.clone());
    let pipeline = SmartEyesPipeline::new(storage, config).unwrap();
    let engine = ScrapeEngine::new_with_monitoring(pipeline, true);

    let summary = engine.run().await.unwrap();
    assert_eq!(summary.output_paths.len(), 3);

    let dir = std::path::Path::new(&output_path);
    assert!(dir.join("herr.csv").exists());

    let tsv = std::fs::read_to_string(dir.join("herr.tsv")).unwrap();
    assert!(tsv.starts_with("url\tbredd\tbrygga\tglasbredd\tskalmlangd"));

    let json = std::fs::read_to_string(dir.join("herr.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["glasbredd"], 51);
    assert!(rows[1]["glasbredd"].is_null());
}

#[tokio::test]
async fn test_end_to_end_empty_catalogue() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let listing_mock = server.mock(|when, then| {
        when.method(GET).path("/glasogon/herr-bagar");
        then.status(200).body(LISTING_EMPTY);
    });

    let config = config_for(&server, &output_path);
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = SmartEyesPipeline::new(storage, config).unwrap();
    let engine = ScrapeEngine::new(pipeline);

    let summary = engine.run().await.unwrap();

    listing_mock.assert_hits(1);
    assert_eq!(summary.product_count, 0);

    let csv = std::fs::read_to_string(
        std::path::Path::new(&output_path).join("smarteyes-herrbagar.csv"),
    )
    .unwrap();
    assert_eq!(csv.trim_end(), "url,bredd,brygga,glasbredd,skalmlangd");
}

#[tokio::test]
async fn test_end_to_end_unreachable_listing() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let listing_mock = server.mock(|when, then| {
        when.method(GET).path("/glasogon/herr-bagar");
        then.status(500);
    });

    let config = config_for(&server, &output_path);
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = SmartEyesPipeline::new(storage, config).unwrap();
    let engine = ScrapeEngine::new(pipeline);

    let result = engine.run().await;

    listing_mock.assert();
    let err = result.unwrap_err();
    assert!(matches!(err, ScrapeError::HttpError(_)));
    assert_eq!(err.severity().exit_code(), 2);
    assert!(!std::path::Path::new(&output_path)
        .join("smarteyes-herrbagar.csv")
        .exists());
}
