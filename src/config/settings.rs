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

use crate::engines::page_fetcher::{DEFAULT_ACCEPT_CHARSET, DEFAULT_HOST, DEFAULT_USER_AGENT};
use crate::utils::retry_policy::{RetryPolicy, DEFAULT_COOLDOWN_SECS};
use crate::utils::text_encoding::TextDecoder;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// 应用程序配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 抓取目标配置
    pub crawl: CrawlSettings,
    /// 请求配置
    pub fetch: FetchSettings,
    /// 重试配置
    pub retry: RetrySettings,
    /// 存储配置
    pub storage: StorageSettings,
}

/// 抓取目标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlSettings {
    /// 页面根地址，与路径直接拼接
    pub host: String,
    /// 抓取年份，原样拼入路径
    pub year: String,
}

/// 请求配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    pub user_agent: String,
    pub accept_charset: String,
    pub accept_language: String,
    /// 单次请求超时时间（秒）
    ///
    /// 默认不设超时，慢速上游会一直等待。设置后超时按传输错误处理并终止抓取，
    /// 若在读取响应体时超时，则按读取不完整处理，只解码已读取的部分
    pub timeout_secs: Option<u64>,
    /// 页面源编码标签
    pub source_encoding: String,
}

/// 重试配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    /// 非200响应后的冷却时间（秒）
    pub cooldown_secs: u64,
    /// 最大重试次数，未设置时无限重试
    pub max_retries: Option<u32>,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 本地输出目录
    pub local_path: String,
    /// 输出文件名前缀
    pub file_prefix: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `AREA_CRAWLER__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Config::builder()
            .set_default("crawl.host", DEFAULT_HOST)?
            .set_default("crawl.year", "2019")?
            .set_default("fetch.user_agent", DEFAULT_USER_AGENT)?
            .set_default("fetch.accept_charset", DEFAULT_ACCEPT_CHARSET)?
            .set_default("fetch.accept_language", "")?
            .set_default("fetch.source_encoding", "gbk")?
            .set_default("retry.cooldown_secs", DEFAULT_COOLDOWN_SECS)?
            .set_default("storage.local_path", "dist")?
            .set_default("storage.file_prefix", "area")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("AREA_CRAWLER").separator("__"));

        builder.build()?.try_deserialize()
    }

    /// 覆盖抓取年份
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.crawl.year = year.into();
        self
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crawl.year.trim().is_empty() {
            return Err(ConfigError::Message("crawl.year must not be empty".into()));
        }
        Url::parse(&self.crawl.host)
            .map_err(|e| ConfigError::Message(format!("crawl.host is not a valid URL: {}", e)))?;
        if self.fetch.timeout_secs == Some(0) {
            return Err(ConfigError::Message(
                "fetch.timeout_secs must be greater than 0".into(),
            ));
        }
        self.decoder()?;
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let cooldown = Duration::from_secs(self.retry.cooldown_secs);
        match self.retry.max_retries {
            Some(max_retries) => RetryPolicy::capped(cooldown, max_retries),
            None => RetryPolicy::unbounded(cooldown),
        }
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch.timeout_secs.map(Duration::from_secs)
    }

    pub fn request_headers(&self) -> HashMap<String, String> {
        HashMap::from([
            ("User-Agent".to_string(), self.fetch.user_agent.clone()),
            ("Accept-Charset".to_string(), self.fetch.accept_charset.clone()),
            ("Accept-Language".to_string(), self.fetch.accept_language.clone()),
        ])
    }

    pub fn decoder(&self) -> Result<TextDecoder, ConfigError> {
        TextDecoder::for_label(&self.fetch.source_encoding)
            .map_err(|e| ConfigError::Message(format!("fetch.source_encoding: {}", e)))
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
