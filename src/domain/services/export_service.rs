// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::area::Area;
use crate::domain::repositories::storage_repository::StorageRepository;
use crate::utils::errors::CrawlError;
use chrono::Utc;
use tracing::info;

/// 导出服务
///
/// 把完整的区划树序列化为JSON，以 `{prefix}-{毫秒时间戳}.json` 为键保存。
/// 存储失败作为错误返回。
pub struct AreaExporter<S: StorageRepository> {
    storage: S,
    file_prefix: String,
}

impl<S: StorageRepository> AreaExporter<S> {
    pub fn new(storage: S, file_prefix: impl Into<String>) -> Self {
        Self {
            storage,
            file_prefix: file_prefix.into(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// 本次导出使用的键
    pub fn key_for(&self, timestamp_millis: i64) -> String {
        format!("{}-{}.json", self.file_prefix, timestamp_millis)
    }

    /// 导出区划树
    ///
    /// # 返回值
    ///
    /// * `Ok(String)` - 保存使用的键
    /// * `Err(CrawlError)` - 序列化或存储失败
    pub async fn export(&self, provinces: &[Area]) -> Result<String, CrawlError> {
        let data = serde_json::to_vec(provinces)?;
        let key = self.key_for(Utc::now().timestamp_millis());
        self.storage.save(&key, &data).await?;
        info!(key = %key, bytes = data.len(), "区划数据导出完成");
        Ok(key)
    }
}
