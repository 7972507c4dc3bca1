// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{gbk, start_truncated_site, FakeStatsSite, SITE_PREFIX};
use area_crawler::domain::repositories::page_source::PageSource;
use area_crawler::engines::page_fetcher::StatsPageFetcher;
use area_crawler::engines::reqwest_engine::ReqwestEngine;
use area_crawler::utils::errors::CrawlError;
use area_crawler::utils::retry_policy::RetryPolicy;
use std::time::{Duration, Instant};
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_fetch_sends_browser_headers() {
    let site = FakeStatsSite::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/2019/index.html", SITE_PREFIX)))
        .and(header_exists("user-agent"))
        .and(header_exists("accept-charset"))
        .and(header_exists("accept-language"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(gbk("北京市")))
        .expect(1)
        .mount(&site.server)
        .await;

    let text = site.fetcher().fetch_page("/2019/index.html").await.unwrap();

    assert_eq!(text, "北京市");
}

#[tokio::test]
async fn test_fetch_returns_raw_gbk_bytes() {
    let site = FakeStatsSite::start().await;
    site.page("/2019/11.html", "市辖区").await;

    let body = site.fetcher().fetch("/2019/11.html").await.unwrap();

    assert_eq!(body, gbk("市辖区"));
}

#[tokio::test]
async fn test_capped_retry_reports_upstream_unavailable() {
    let site = FakeStatsSite::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&site.server)
        .await;
    let fetcher = StatsPageFetcher::new(ReqwestEngine::new().unwrap(), site.host())
        .with_retry_policy(RetryPolicy::capped(Duration::from_millis(10), 2));

    let result = fetcher.fetch("/2019/index.html").await;

    assert!(matches!(
        result,
        Err(CrawlError::UpstreamUnavailable {
            status: 502,
            attempts: 3,
            ..
        })
    ));
}

#[tokio::test]
async fn test_connection_refused_is_fatal_and_not_retried() {
    // 端口1上没有服务
    let fetcher = StatsPageFetcher::new(ReqwestEngine::new().unwrap(), "http://127.0.0.1:1")
        .with_retry_policy(RetryPolicy::unbounded(Duration::from_secs(3600)));
    let start = Instant::now();

    let result = fetcher.fetch("/2019/index.html").await;

    match result {
        Err(CrawlError::Transport(e)) => assert!(e.is_connect()),
        other => panic!("expected transport error, got {:?}", other),
    }
    assert!(start.elapsed() < Duration::from_secs(3600));
}

#[tokio::test]
async fn test_invalid_host_is_transport_error() {
    let fetcher = StatsPageFetcher::new(ReqwestEngine::new().unwrap(), "not a url");

    let result = fetcher.fetch("/2019/index.html").await;

    assert!(matches!(result, Err(CrawlError::Transport(_))));
}

#[tokio::test]
async fn test_truncated_body_is_decoded_best_effort() {
    let host = start_truncated_site(gbk("北京")).await;
    let fetcher = StatsPageFetcher::new(ReqwestEngine::new().unwrap(), host);

    let text = fetcher.fetch_page("/2019/index.html").await.unwrap();

    assert_eq!(text, "北京");
}
