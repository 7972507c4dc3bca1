// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;

/// 默认冷却时间（秒）
pub const DEFAULT_COOLDOWN_SECS: u64 = 30;

/// 重试策略配置
///
/// 上游返回非200状态时使用固定冷却时间重试，不做指数退避。
/// `max_retries` 为 `None` 时无限重试。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 每次重试前的冷却时间
    cooldown: Duration,
    /// 最大重试次数（不含首次请求）
    max_retries: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_secs(DEFAULT_COOLDOWN_SECS),
            max_retries: None,
        }
    }
}

impl RetryPolicy {
    /// 创建无限重试策略
    pub fn unbounded(cooldown: Duration) -> Self {
        Self {
            cooldown,
            max_retries: None,
        }
    }

    /// 创建有上限的重试策略
    pub fn capped(cooldown: Duration, max_retries: u32) -> Self {
        Self {
            cooldown,
            max_retries: Some(max_retries),
        }
    }

    /// 每次重试前的等待时间
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn max_retries(&self) -> Option<u32> {
        self.max_retries
    }

    /// 已重试 `retries` 次后是否还应继续重试
    pub fn should_retry(&self, retries: u32) -> bool {
        match self.max_retries {
            Some(max) => retries < max,
            None => true,
        }
    }
}
