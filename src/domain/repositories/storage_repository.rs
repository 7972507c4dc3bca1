// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use thiserror::Error;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 存储错误
    #[error("Storage error: {0}")]
    Other(String),
}

/// 导出结果的持久化接口
///
/// 每次运行只写入一次，写入失败必须原样返回给调用方
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// 以 `key` 为名写入完整的导出数据，已存在时覆盖
    async fn save(&self, key: &str, data: &[u8]) -> Result<(), StorageError>;
}
