// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理抓取目标、重试策略和存储的配置设置
pub mod config;

/// 领域模块
///
/// 包含区划实体、列表页提取和三级递归抓取
pub mod domain;

/// 引擎模块
///
/// 实现HTTP请求引擎和带冷却重试的页面抓取器
pub mod engines;

/// 基础设施模块
///
/// 提供结果存储的具体实现
pub mod infrastructure;

/// 工具模块
///
/// 提供错误类型、重试策略、文本解码和日志初始化
pub mod utils;
