// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理抓取目标、请求头、重试策略和输出存储等配置
pub mod settings;
