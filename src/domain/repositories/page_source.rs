// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::utils::errors::CrawlError;
use async_trait::async_trait;

/// 页面来源特质
///
/// 抓取服务只依赖该接口，按路径获取已解码为UTF-8的列表页文本
#[async_trait]
pub trait PageSource: Send + Sync {
    /// 获取 `route` 对应的页面文本，`route` 以 `/` 开头
    async fn fetch_page(&self, route: &str) -> Result<String, CrawlError>;
}
