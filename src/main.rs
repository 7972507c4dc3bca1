// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use area_crawler::config::settings::Settings;
use area_crawler::domain::models::area::TreeSummary;
use area_crawler::domain::services::crawl_service::AreaCrawler;
use area_crawler::domain::services::export_service::AreaExporter;
use area_crawler::engines::page_fetcher::StatsPageFetcher;
use area_crawler::engines::reqwest_engine::ReqwestEngine;
use area_crawler::infrastructure::storage::LocalStorage;
use area_crawler::utils::telemetry;
use tracing::{error, info};

/// 主函数
///
/// 用法：`area-crawler [year]`，未指定年份时使用配置中的 `crawl.year`。
/// 任何致命错误都以非零状态退出，且不写出部分结果。
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting area-crawler...");

    // 2. Load configuration
    let mut settings = Settings::new()?;
    if let Some(year) = std::env::args().nth(1) {
        settings = settings.with_year(year);
    }
    settings.validate()?;
    info!(
        year = %settings.crawl.year,
        host = %settings.crawl.host,
        "Configuration loaded"
    );

    // 3. Build the fetch pipeline
    let engine = ReqwestEngine::new()?;
    let fetcher = StatsPageFetcher::from_settings(engine, &settings)?;
    let crawler = AreaCrawler::new(fetcher, settings.crawl.year.clone());

    // 4. Crawl
    let provinces = crawler.crawl().await.inspect_err(|e| {
        error!(error = %e, "抓取失败，未写出任何结果");
    })?;
    let summary = TreeSummary::of(&provinces);
    info!(
        provinces = summary.provinces,
        cities = summary.cities,
        counties = summary.counties,
        total = summary.total(),
        "抓取完成"
    );

    // 5. Export
    let exporter = AreaExporter::new(
        LocalStorage::from_settings(&settings.storage),
        settings.storage.file_prefix.clone(),
    );
    let key = exporter.export(&provinces).await.inspect_err(|e| {
        error!(error = %e, "导出失败");
    })?;
    info!(
        path = %exporter.storage().base_path().join(&key).display(),
        "Done"
    );

    Ok(())
}
