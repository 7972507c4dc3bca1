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

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

/// 引擎错误类型
///
/// 均为传输层错误：请求无法构造、发送或未收到响应
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// URL无效
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// 请求头无效
    #[error("Invalid header: {0}")]
    InvalidHeader(String),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl EngineError {
    /// 是否为连接失败（例如连接被拒绝）
    pub fn is_connect(&self) -> bool {
        matches!(self, EngineError::RequestFailed(e) if e.is_connect())
    }
}

/// 抓取请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// 目标URL
    pub url: String,
    /// 请求头
    pub headers: HashMap<String, String>,
    /// 超时时间，`None` 表示不限时
    pub timeout: Option<Duration>,
}

/// 抓取响应
#[derive(Debug, Clone, Default)]
pub struct FetchResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 原始响应体，仅在状态码为200时读取
    pub body: Vec<u8>,
    /// 读取响应体时中途出错，`body` 只包含已读取的部分
    pub short_read: bool,
    /// 响应时间（毫秒）
    pub response_time_ms: u64,
}

impl FetchResponse {
    pub fn is_ok(&self) -> bool {
        self.status_code == 200
    }
}

/// HTTP引擎特质
#[async_trait]
pub trait HttpEngine: Send + Sync {
    /// 发送一次GET请求，不做任何重试
    async fn get(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
