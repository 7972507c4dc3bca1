// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::storage_repository::StorageError;
use crate::engines::traits::EngineError;
use thiserror::Error;

/// 抓取流程错误类型
///
/// 除 `UpstreamUnavailable` 仅在配置了重试上限时出现外，其余错误均终止本次抓取
#[derive(Error, Debug)]
pub enum CrawlError {
    /// 无法构造或发送请求，或未收到任何响应
    #[error("传输错误: {0}")]
    Transport(#[from] EngineError),

    /// 上游持续返回非200状态且已达到重试上限
    #[error("上游不可用: {url} 在 {attempts} 次请求后仍返回状态 {status}")]
    UpstreamUnavailable {
        url: String,
        status: u16,
        attempts: u32,
    },

    /// 地区编码长度不足以截取子级页面所需的前缀
    #[error("地区编码格式错误: {code:?} 少于 {required} 个字符")]
    MalformedCode { code: String, required: usize },

    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("配置错误: {0}")]
    Config(#[from] config::ConfigError),
}

impl CrawlError {
    /// 是否为传输层错误
    pub fn is_transport(&self) -> bool {
        matches!(self, CrawlError::Transport(_))
    }
}
