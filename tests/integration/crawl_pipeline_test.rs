// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{listing_page, province_page, FakeStatsSite, SITE_PREFIX, TEST_COOLDOWN};
use area_crawler::domain::models::area::{Area, TreeSummary};
use area_crawler::domain::services::crawl_service::AreaCrawler;
use area_crawler::domain::services::export_service::AreaExporter;
use area_crawler::infrastructure::storage::LocalStorage;
use area_crawler::utils::errors::CrawlError;
use std::time::Instant;

async fn mount_small_site(site: &FakeStatsSite) {
    site.page(
        "/2019/index.html",
        &province_page(&[("11", "北京市"), ("13", "河北省")]),
    )
    .await;
    site.page(
        "/2019/11.html",
        &listing_page("citytr", &[("110100000000", "市辖区")]),
    )
    .await;
    site.page(
        "/2019/13.html",
        &listing_page(
            "citytr",
            &[("130100000000", "石家庄市"), ("130200000000", "唐山市")],
        ),
    )
    .await;
    site.page(
        "/2019/11/1101.html",
        &listing_page(
            "countytr",
            &[("110101000000", "东城区"), ("110102000000", "西城区")],
        ),
    )
    .await;
    site.page(
        "/2019/13/1301.html",
        &listing_page("countytr", &[("130102000000", "长安区")]),
    )
    .await;
    site.page(
        "/2019/13/1302.html",
        &listing_page("countytr", &[("130202000000", "路南区")]),
    )
    .await;
}

#[tokio::test]
async fn test_crawl_small_site_end_to_end() {
    let site = FakeStatsSite::start().await;
    mount_small_site(&site).await;
    let crawler = AreaCrawler::new(site.fetcher(), "2019");

    let tree = crawler.crawl().await.expect("crawl should succeed");

    let provinces: Vec<(&str, &str)> = tree
        .iter()
        .map(|p| (p.code.as_str(), p.name.as_str()))
        .collect();
    assert_eq!(provinces, vec![("11", "北京市"), ("13", "河北省")]);
    assert_eq!(tree[0].children[0].name, "市辖区");
    assert_eq!(
        tree[0].children[0].children,
        vec![
            Area::new("110101000000", "东城区"),
            Area::new("110102000000", "西城区"),
        ]
    );
    assert_eq!(tree[1].children[1].children[0].name, "路南区");

    let summary = TreeSummary::of(&tree);
    assert_eq!((summary.provinces, summary.cities, summary.counties), (2, 3, 4));

    let expected: Vec<String> = [
        "/2019/index.html",
        "/2019/11.html",
        "/2019/11/1101.html",
        "/2019/13.html",
        "/2019/13/1301.html",
        "/2019/13/1302.html",
    ]
    .iter()
    .map(|route| format!("{}{}", SITE_PREFIX, route))
    .collect();
    assert_eq!(site.request_paths().await, expected);
}

#[tokio::test]
async fn test_crawl_retries_after_upstream_failure() {
    let site = FakeStatsSite::start().await;
    site.failing("/2019/11.html", 503, 1).await;
    mount_small_site(&site).await;
    let crawler = AreaCrawler::new(site.fetcher(), "2019");
    let start = Instant::now();

    let tree = crawler.crawl().await.expect("retry should be absorbed");

    assert!(start.elapsed() >= TEST_COOLDOWN);
    assert_eq!(tree[0].children.len(), 1);
    let city_requests = site
        .request_paths()
        .await
        .into_iter()
        .filter(|p| p.ends_with("/2019/11.html"))
        .count();
    assert_eq!(city_requests, 2);
}

#[tokio::test]
async fn test_crawl_malformed_code_aborts_without_output() {
    let site = FakeStatsSite::start().await;
    site.page("/2019/index.html", &province_page(&[("1", "坏数据")]))
        .await;
    let crawler = AreaCrawler::new(site.fetcher(), "2019");

    let result = crawler.crawl().await;

    assert!(matches!(
        result,
        Err(CrawlError::MalformedCode { ref code, required: 2 }) if code == "1"
    ));
    assert_eq!(
        site.request_paths().await,
        vec![format!("{}/2019/index.html", SITE_PREFIX)]
    );
}

#[tokio::test]
async fn test_crawl_and_export_to_local_storage() {
    let site = FakeStatsSite::start().await;
    mount_small_site(&site).await;
    let crawler = AreaCrawler::new(site.fetcher(), "2019");
    let dir = tempfile::tempdir().unwrap();
    let exporter = AreaExporter::new(LocalStorage::new(dir.path().join("dist")), "area");

    let tree = crawler.crawl().await.unwrap();
    let key = exporter.export(&tree).await.unwrap();

    let written = std::fs::read(dir.path().join("dist").join(&key)).unwrap();
    let restored: Vec<Area> = serde_json::from_slice(&written).unwrap();
    assert_eq!(restored, tree);
}
