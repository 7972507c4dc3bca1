// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::Settings;
use crate::domain::repositories::page_source::PageSource;
use crate::engines::traits::{FetchRequest, HttpEngine};
use crate::utils::errors::CrawlError;
use crate::utils::retry_policy::RetryPolicy;
use crate::utils::text_encoding::TextDecoder;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, warn};

/// 统计局区划代码页面根地址
pub const DEFAULT_HOST: &str = "http://www.stats.gov.cn/tjsj/tjbz/tjyqhdmhcxhfdm";
/// 浏览器标识
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/80.0.3987.132 Safari/537.36";
/// 字符集偏好
pub const DEFAULT_ACCEPT_CHARSET: &str = "GBK,utf-8;q=0.7,*;q=0.3";

/// 列表页抓取器
///
/// 根地址与路径直接拼接成URL。传输错误立即返回；
/// 非200状态按 [`RetryPolicy`] 冷却后重试同一请求，调用方看不到这些失败。
pub struct StatsPageFetcher<E: HttpEngine> {
    engine: E,
    host: String,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
    retry_policy: RetryPolicy,
    decoder: TextDecoder,
}

impl<E: HttpEngine> StatsPageFetcher<E> {
    /// 使用默认请求头、30秒无限重试和GBK解码创建抓取器，不设请求超时
    pub fn new(engine: E, host: impl Into<String>) -> Self {
        Self {
            engine,
            host: host.into(),
            headers: Self::default_headers(),
            timeout: None,
            retry_policy: RetryPolicy::default(),
            decoder: TextDecoder::gbk(),
        }
    }

    /// 根据配置创建抓取器
    pub fn from_settings(engine: E, settings: &Settings) -> Result<Self, CrawlError> {
        Ok(Self {
            engine,
            host: settings.crawl.host.clone(),
            headers: settings.request_headers(),
            timeout: settings.fetch_timeout(),
            retry_policy: settings.retry_policy(),
            decoder: settings.decoder()?,
        })
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// 固定的请求头：浏览器标识、字符集偏好和空的语言偏好
    pub fn default_headers() -> HashMap<String, String> {
        HashMap::from([
            ("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string()),
            ("Accept-Charset".to_string(), DEFAULT_ACCEPT_CHARSET.to_string()),
            ("Accept-Language".to_string(), String::new()),
        ])
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }

    pub fn url_for(&self, route: &str) -> String {
        format!("{}{}", self.host, route)
    }

    /// 获取页面原始字节
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<u8>)` - 状态码为200的响应体，读取中断时为已读取的部分
    /// * `Err(CrawlError::Transport)` - 传输错误，不重试
    /// * `Err(CrawlError::UpstreamUnavailable)` - 仅在配置了重试上限且已用尽时返回
    pub async fn fetch(&self, route: &str) -> Result<Vec<u8>, CrawlError> {
        let request = FetchRequest {
            url: self.url_for(route),
            headers: self.headers.clone(),
            timeout: self.timeout,
        };

        let mut retries: u32 = 0;
        loop {
            let response = self.engine.get(&request).await.map_err(|e| {
                error!(url = %request.url, engine = self.engine.name(), error = %e, "请求发送失败");
                CrawlError::Transport(e)
            })?;

            if response.is_ok() {
                if response.short_read {
                    warn!(
                        url = %request.url,
                        bytes = response.body.len(),
                        "响应体读取不完整，使用已读取的部分继续解码"
                    );
                }
                debug!(
                    url = %request.url,
                    bytes = response.body.len(),
                    elapsed_ms = response.response_time_ms,
                    "页面获取成功"
                );
                return Ok(response.body);
            }

            if !self.retry_policy.should_retry(retries) {
                return Err(CrawlError::UpstreamUnavailable {
                    url: request.url,
                    status: response.status_code,
                    attempts: retries + 1,
                });
            }

            retries += 1;
            let cooldown = self.retry_policy.cooldown();
            warn!(
                url = %request.url,
                status = response.status_code,
                retry = retries,
                "[Error] {} 休眠 {} 秒重试",
                response.status_code,
                cooldown.as_secs_f64()
            );
            tokio::time::sleep(cooldown).await;
        }
    }
}

#[async_trait]
impl<E: HttpEngine> PageSource for StatsPageFetcher<E> {
    async fn fetch_page(&self, route: &str) -> Result<String, CrawlError> {
        let body = self.fetch(route).await?;
        Ok(self.decoder.decode(&body))
    }
}

#[cfg(test)]
#[path = "page_fetcher_test.rs"]
mod tests;
