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

use crate::engines::traits::{EngineError, FetchRequest, FetchResponse, HttpEngine};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Instant;
use tracing::debug;
use url::Url;

/// HTTP引擎
///
/// 基于reqwest实现，复用同一个客户端的连接池
pub struct ReqwestEngine {
    client: reqwest::Client,
}

impl ReqwestEngine {
    /// 创建引擎
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 引擎实例
    /// * `Err(EngineError)` - 客户端构建失败
    pub fn new() -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(2)
            .build()?;
        Ok(Self { client })
    }

    fn build_headers(request: &FetchRequest) -> Result<HeaderMap, EngineError> {
        let mut headers = HeaderMap::new();
        for (k, v) in &request.headers {
            let name = HeaderName::from_bytes(k.as_bytes())
                .map_err(|_| EngineError::InvalidHeader(k.clone()))?;
            let value =
                HeaderValue::from_str(v).map_err(|_| EngineError::InvalidHeader(k.clone()))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

/// 读取完整响应体，中途出错时返回已读取的部分
async fn drain_body(response: &mut reqwest::Response) -> (Vec<u8>, bool) {
    let mut body = Vec::new();
    loop {
        match response.chunk().await {
            Ok(Some(chunk)) => body.extend_from_slice(&chunk),
            Ok(None) => return (body, false),
            Err(e) => {
                debug!(error = %e, bytes = body.len(), "响应体读取中断");
                return (body, true);
            }
        }
    }
}

#[async_trait]
impl HttpEngine for ReqwestEngine {
    /// 执行一次GET请求
    ///
    /// 非200响应不读取响应体，直接返回状态码
    async fn get(&self, request: &FetchRequest) -> Result<FetchResponse, EngineError> {
        let url = Url::parse(&request.url)?;
        let headers = Self::build_headers(request)?;

        let start = Instant::now();
        let mut builder = self.client.get(url).headers(headers);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        let mut response = builder.send().await?;

        let status_code = response.status().as_u16();
        let (body, short_read) = if status_code == 200 {
            drain_body(&mut response).await
        } else {
            (Vec::new(), false)
        };

        Ok(FetchResponse {
            status_code,
            body,
            short_read,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
